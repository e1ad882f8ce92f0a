//! Request and response types exchanged with generation providers.

use fabula_core::{Character, Segment, StoryId, Theme, VideoProviderKind, VideoStatus};
use serde::{Deserialize, Serialize};

/// Input for character generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRequest {
    /// Story the characters will belong to
    pub story_id: StoryId,
    /// Story genre
    pub theme: Theme,
    /// Story body text
    pub story_text: String,
}

/// One scene in a video request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoScene {
    /// What happens
    pub description: String,
    /// Seconds
    pub duration_secs: u32,
    /// Visual prompt
    pub visual_prompt: String,
}

impl From<&Segment> for VideoScene {
    fn from(segment: &Segment) -> Self {
        Self {
            description: segment.description.clone(),
            duration_secs: segment.duration_secs,
            visual_prompt: segment.visual_prompt.clone(),
        }
    }
}

/// A character reference handed to video providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRef {
    /// Name
    pub name: String,
    /// Description with appearance folded in
    pub description: String,
    /// Primary photo, if any
    pub photo_url: Option<String>,
}

impl From<&Character> for CharacterRef {
    fn from(character: &Character) -> Self {
        let appearance = character.appearance.summary();
        let description = if appearance.is_empty() {
            character.description.clone()
        } else {
            format!("{} ({appearance})", character.description)
        };
        Self {
            name: character.name.clone(),
            description,
            photo_url: character.primary_photo().map(|photo| photo.url.clone()),
        }
    }
}

/// Input for video generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct VideoRequest {
    /// Scenes in order, never empty
    pub scenes: Vec<VideoScene>,
    /// Cast
    #[builder(default)]
    pub characters: Vec<CharacterRef>,
    /// Target total duration in seconds
    pub target_duration_secs: u32,
    /// Aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
    /// Visual style
    pub style: String,
}

impl VideoRequest {
    /// Create a builder for a video request.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }
}

/// What a video provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    /// Which provider produced it
    pub provider: VideoProviderKind,
    /// Rendered asset
    pub asset_url: Option<String>,
    /// Thumbnail image
    pub thumbnail_url: Option<String>,
    /// Actual duration in seconds
    pub duration_secs: Option<u32>,
    /// Rendering status
    pub status: VideoStatus,
    /// Human instructions returned instead of an asset
    pub instructions: Option<String>,
}

impl VideoResponse {
    /// A completed response with an asset.
    pub fn completed(provider: VideoProviderKind, asset_url: impl Into<String>) -> Self {
        Self {
            provider,
            asset_url: Some(asset_url.into()),
            thumbnail_url: None,
            duration_secs: None,
            status: VideoStatus::Completed,
            instructions: None,
        }
    }
}
