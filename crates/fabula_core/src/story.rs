//! Story types: the artifact carried through the production stages.

use crate::{Character, Segment, Video};
use chrono::{DateTime, Utc};
use fabula_error::{
    FabulaResult, PreconditionError, PreconditionErrorKind, ValidationError, ValidationErrorKind,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a story.
pub type StoryId = Uuid;

/// Parse a story identifier.
///
/// # Errors
///
/// Returns a precondition error when `raw` is not a valid identifier.
///
/// # Examples
///
/// ```
/// use fabula_core::parse_story_id;
///
/// assert!(parse_story_id("not-an-id").is_err());
/// assert!(parse_story_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
/// ```
pub fn parse_story_id(raw: &str) -> FabulaResult<StoryId> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        PreconditionError::new(PreconditionErrorKind::InvalidId(raw.to_string())).into()
    })
}

/// Genre of a story. Drives character templates and default video style.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Theme {
    /// Swords, sorcery, and old kingdoms
    Fantasy,
    /// Starships, AIs, and distant futures
    SciFi,
    /// Crimes, clues, and detectives
    Mystery,
    /// Love stories
    Romance,
    /// Quests and expeditions
    Adventure,
    /// Dread and the uncanny
    Horror,
}

impl Theme {
    /// Parse a theme from its kebab-case name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or unknown name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::Theme;
    ///
    /// assert_eq!(Theme::parse("sci-fi").unwrap(), Theme::SciFi);
    /// assert!(Theme::parse("  ").is_err());
    /// ```
    pub fn parse(raw: &str) -> FabulaResult<Self> {
        let name = raw.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTheme).into());
        }
        Theme::from_str(&name)
            .map_err(|_| ValidationError::new(ValidationErrorKind::UnknownTheme(name)).into())
    }

    /// Default visual style handed to video providers.
    pub fn default_style(self) -> &'static str {
        match self {
            Theme::Fantasy => "painterly, golden-hour light, epic wide shots",
            Theme::SciFi => "clean futuristic, neon accents, anamorphic lens",
            Theme::Mystery => "noir, low-key lighting, rain-slicked streets",
            Theme::Romance => "soft focus, warm palette, intimate framing",
            Theme::Adventure => "vivid, sweeping landscapes, dynamic camera",
            Theme::Horror => "desaturated, deep shadows, handheld unease",
        }
    }
}

/// Intended length of a story.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StoryLength {
    /// A vignette
    Short,
    /// A full scene sequence
    #[default]
    Medium,
    /// An episode
    Long,
}

impl StoryLength {
    /// Parse a length from its kebab-case name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown name.
    pub fn parse(raw: &str) -> FabulaResult<Self> {
        let name = raw.trim().to_ascii_lowercase();
        StoryLength::from_str(&name)
            .map_err(|_| ValidationError::new(ValidationErrorKind::UnknownLength(name)).into())
    }

    /// Target duration of the final video, in seconds.
    pub fn target_duration_secs(self) -> u32 {
        match self {
            StoryLength::Short => 30,
            StoryLength::Medium => 60,
            StoryLength::Long => 120,
        }
    }
}

/// Lifecycle status of a story.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StoryStatus {
    /// Being written
    #[default]
    Draft,
    /// A generation is in flight
    Processing,
    /// A video exists
    Completed,
    /// Marked failed by an external collaborator
    Failed,
}

/// The creative artifact moving through the workflow.
///
/// Characters, segments, and videos are owned by the story: removing the
/// story removes them.
///
/// # Examples
///
/// ```
/// use fabula_core::{Story, StoryLength, StoryStatus, Theme};
///
/// let story = Story::new("owner-1", "The Lantern", "Once upon a time", Theme::Fantasy, StoryLength::Short);
/// assert_eq!(story.status, StoryStatus::Draft);
/// assert!(story.characters.is_empty());
/// assert_eq!(story.created_at, story.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Story identifier
    pub id: StoryId,
    /// Owning user
    pub owner_id: String,
    /// Title
    pub title: String,
    /// Body text
    pub text: String,
    /// Genre
    pub theme: Theme,
    /// Intended length
    #[serde(default)]
    pub length: StoryLength,
    /// Lifecycle status
    #[serde(default)]
    pub status: StoryStatus,
    /// Characters, in order
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Scene segments, in order
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Generated videos, in order
    #[serde(default)]
    pub videos: Vec<Video>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Create a draft story with a fresh id and no children.
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        theme: Theme,
        length: StoryLength,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            text: text.into(),
            theme,
            length,
            status: StoryStatus::Draft,
            characters: Vec::new(),
            segments: Vec::new(),
            videos: Vec::new(),
            metadata: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of Unicode scalar values in the body text.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check that the story can be handed to a generation provider.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title or body text.
    pub fn validate_for_generation(&self) -> FabulaResult<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTitle).into());
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyText).into());
        }
        Ok(())
    }

    /// Mark the story as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn theme_names_round_trip_through_parse() {
        for theme in Theme::iter() {
            assert_eq!(Theme::parse(&theme.to_string()).unwrap(), theme);
        }
    }

    #[test]
    fn theme_parse_is_case_insensitive() {
        assert_eq!(Theme::parse(" Horror ").unwrap(), Theme::Horror);
    }

    #[test]
    fn unknown_theme_is_a_validation_error() {
        let err = Theme::parse("western").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn story_serializes_theme_in_kebab_case() {
        let story = Story::new("o", "t", "x", Theme::SciFi, StoryLength::Long);
        let json = serde_json::to_value(&story).unwrap();
        assert_eq!(json["theme"], "sci-fi");
        assert_eq!(json["length"], "long");
        assert_eq!(json["status"], "draft");
    }

    #[test]
    fn validation_rejects_blank_text() {
        let story = Story::new("o", "Title", "   ", Theme::Mystery, StoryLength::Short);
        assert!(story.validate_for_generation().unwrap_err().is_validation());
    }
}
