//! Character types.

use crate::StoryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Narrative role of a character.
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
pub enum CharacterRole {
    /// Drives the story
    Protagonist,
    /// Opposes the protagonist
    Antagonist,
    /// Everyone else
    #[default]
    Supporting,
}

/// Structured appearance attributes.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(default, setter(into))]
pub struct Appearance {
    /// Apparent age or age range
    #[builder(setter(into, strip_option))]
    pub age: Option<String>,
    /// Body type and posture
    #[builder(setter(into, strip_option))]
    pub physique: Option<String>,
    /// Hair color and style
    #[builder(setter(into, strip_option))]
    pub hair: Option<String>,
    /// Eye color
    #[builder(setter(into, strip_option))]
    pub eyes: Option<String>,
    /// Typical clothing
    #[builder(setter(into, strip_option))]
    pub clothing: Option<String>,
    /// Scars, marks, accessories
    #[serde(default)]
    pub distinguishing_features: Vec<String>,
}

impl Appearance {
    /// One-line summary used in visual prompts.
    pub fn summary(&self) -> String {
        [&self.age, &self.physique, &self.hair, &self.eyes, &self.clothing]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .chain(self.distinguishing_features.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Reference to a photo of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Where the photo lives
    pub url: String,
    /// Whether the user picked this photo
    #[serde(default)]
    pub selected: bool,
}

/// A character as produced by a provider or template, before it belongs to a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CharacterDraft {
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Personality traits, in order
    #[builder(default)]
    #[serde(default)]
    pub traits: Vec<String>,
    /// Appearance
    #[builder(default)]
    #[serde(default)]
    pub appearance: Appearance,
    /// Role
    #[builder(default)]
    #[serde(default)]
    pub role: CharacterRole,
}

impl CharacterDraft {
    /// Create a builder for a character draft.
    pub fn builder() -> CharacterDraftBuilder {
        CharacterDraftBuilder::default()
    }

    /// Assign identity and ownership.
    pub fn into_character(self, story_id: StoryId) -> Character {
        Character {
            id: Uuid::new_v4(),
            story_id,
            name: self.name,
            description: self.description,
            traits: self.traits,
            appearance: self.appearance,
            role: self.role,
            photos: Vec::new(),
        }
    }
}

/// A character owned by a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier
    pub id: Uuid,
    /// Owning story
    pub story_id: StoryId,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Personality traits, in order
    #[serde(default)]
    pub traits: Vec<String>,
    /// Appearance
    #[serde(default)]
    pub appearance: Appearance,
    /// Role
    #[serde(default)]
    pub role: CharacterRole,
    /// Photos, in order
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

impl Character {
    /// The photo consumers should show: first selected, else first.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::{CharacterDraft, PhotoRef};
    /// use uuid::Uuid;
    ///
    /// let mut character = CharacterDraft::builder()
    ///     .name("Mira")
    ///     .description("A cartographer")
    ///     .build()
    ///     .unwrap()
    ///     .into_character(Uuid::new_v4());
    /// assert!(character.primary_photo().is_none());
    ///
    /// character.photos = vec![
    ///     PhotoRef { url: "a.png".into(), selected: false },
    ///     PhotoRef { url: "b.png".into(), selected: true },
    /// ];
    /// assert_eq!(character.primary_photo().unwrap().url, "b.png");
    /// ```
    pub fn primary_photo(&self) -> Option<&PhotoRef> {
        self.photos
            .iter()
            .find(|photo| photo.selected)
            .or_else(|| self.photos.first())
    }
}
