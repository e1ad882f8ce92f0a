//! Progress classification: which production stage a story is at.
//!
//! The stage is derived from what the story currently contains and is never
//! stored. Classification looks only at presence and length facts, never at
//! the status tag or timestamps, so two stories with the same facts always
//! classify the same way.

use crate::Story;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body text must be longer than this many characters to leave story editing.
pub const TEXT_LENGTH_THRESHOLD: usize = 100;

/// Production stages, in workflow order.
///
/// The derived `Ord` is the stage ordering:
/// story-editing < character-extraction < scene-segmentation < video-generation < completed.
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
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    /// Still writing the text
    StoryEditing,
    /// Enough text to extract characters
    CharacterExtraction,
    /// Characters exist, scenes next
    SceneSegmentation,
    /// Scenes exist, video next
    VideoGeneration,
    /// A video exists
    Completed,
}

impl Stage {
    /// Overall completion percentage for this stage.
    pub fn percent(self) -> u8 {
        match self {
            Stage::StoryEditing => 20,
            Stage::CharacterExtraction => 40,
            Stage::SceneSegmentation => 60,
            Stage::VideoGeneration => 85,
            Stage::Completed => 100,
        }
    }

    /// Human label.
    pub fn label(self) -> &'static str {
        match self {
            Stage::StoryEditing => "Story editing",
            Stage::CharacterExtraction => "Character extraction",
            Stage::SceneSegmentation => "Scene segmentation",
            Stage::VideoGeneration => "Video generation",
            Stage::Completed => "Completed",
        }
    }

    /// What the user should do next.
    pub fn next_action(self) -> NextAction {
        match self {
            Stage::StoryEditing => NextAction::ContinueWriting,
            Stage::CharacterExtraction | Stage::SceneSegmentation => NextAction::ContinueCreation,
            Stage::VideoGeneration => NextAction::GenerateVideo,
            Stage::Completed => NextAction::ViewResult,
        }
    }
}

/// Suggested next action for a stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum NextAction {
    /// Open the finished video
    #[strum(serialize = "view result")]
    ViewResult,
    /// Start video generation
    #[strum(serialize = "generate video")]
    GenerateVideo,
    /// Resume the creation flow
    #[strum(serialize = "continue creation")]
    ContinueCreation,
    /// Keep writing the text
    #[strum(serialize = "continue writing")]
    ContinueWriting,
}

/// Derived description of where a story stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StageDescriptor {
    stage: Stage,
    percent: u8,
    label: String,
    next_action: NextAction,
}

impl From<Stage> for StageDescriptor {
    fn from(stage: Stage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
            label: stage.label().to_string(),
            next_action: stage.next_action(),
        }
    }
}

/// The presence and length facts classification depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StoryFacts {
    /// Number of videos
    pub videos: usize,
    /// Number of segments
    pub segments: usize,
    /// Number of characters
    pub characters: usize,
    /// Body text length in characters
    pub text_chars: usize,
}

impl From<&Story> for StoryFacts {
    fn from(story: &Story) -> Self {
        Self {
            videos: story.videos.len(),
            segments: story.segments.len(),
            characters: story.characters.len(),
            text_chars: story.text_len(),
        }
    }
}

impl StoryFacts {
    /// Stage implied by these facts. First match wins.
    pub fn stage(&self) -> Stage {
        if self.videos > 0 {
            Stage::Completed
        } else if self.segments > 0 {
            Stage::VideoGeneration
        } else if self.characters > 0 {
            Stage::SceneSegmentation
        } else if self.text_chars > TEXT_LENGTH_THRESHOLD {
            Stage::CharacterExtraction
        } else {
            Stage::StoryEditing
        }
    }
}

/// Classify a story snapshot.
///
/// # Examples
///
/// ```
/// use fabula_core::{classify, NextAction, Stage, Story, StoryLength, Theme};
///
/// let story = Story::new("owner", "Title", "x".repeat(150), Theme::Fantasy, StoryLength::Short);
/// let descriptor = classify(&story);
/// assert_eq!(*descriptor.stage(), Stage::CharacterExtraction);
/// assert_eq!(*descriptor.percent(), 40);
/// assert_eq!(*descriptor.next_action(), NextAction::ContinueCreation);
/// ```
pub fn classify(story: &Story) -> StageDescriptor {
    StoryFacts::from(story).stage().into()
}
