//! Video types.

use crate::StoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which generator produced a video.
///
/// `Placeholder` is the guaranteed fallback: a video never lacks a provider tag.
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
pub enum VideoProviderKind {
    /// Runway
    Runway,
    /// Pika
    Pika,
    /// Luma Dream Machine
    Luma,
    /// Kling
    Kling,
    /// Terminal fallback when every real provider failed
    Placeholder,
}

impl VideoProviderKind {
    /// Whether this is the terminal fallback tag.
    pub fn is_fallback(self) -> bool {
        self == VideoProviderKind::Placeholder
    }
}

/// Status of a generated video.
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
pub enum VideoStatus {
    /// Queued at the provider
    #[default]
    Pending,
    /// Rendering
    Processing,
    /// Ready to view
    Completed,
    /// Rendering failed
    Failed,
}

/// A video owned by a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Video identifier
    pub id: Uuid,
    /// Owning story
    pub story_id: StoryId,
    /// Where the rendered asset lives
    pub url: Option<String>,
    /// Thumbnail image
    pub thumbnail_url: Option<String>,
    /// Duration in seconds
    pub duration_secs: Option<u32>,
    /// Producing provider
    pub provider: VideoProviderKind,
    /// Status
    pub status: VideoStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a video record for a story with a fresh id.
    pub fn new(story_id: StoryId, provider: VideoProviderKind, status: VideoStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            story_id,
            url: None,
            thumbnail_url: None,
            duration_secs: None,
            provider,
            status,
            created_at: Utc::now(),
        }
    }
}
