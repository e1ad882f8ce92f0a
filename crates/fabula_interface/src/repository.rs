//! Persistent artifact repository trait.

use async_trait::async_trait;
use fabula_core::{Character, Segment, Story, StoryId, Video};
use fabula_error::FabulaResult;

/// Remote store for stories and their children.
///
/// Implementations own durability; the state synchronizer treats every call
/// as fallible and bounded by a timeout.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Store a new story together with any children it already has.
    async fn create_story(&self, story: &Story) -> FabulaResult<()>;

    /// Update a story's own fields (title, text, theme, length, status, metadata).
    async fn update_story(&self, story: &Story) -> FabulaResult<()>;

    /// Delete a story and, by cascade, its characters, segments, and videos.
    async fn delete_story(&self, id: StoryId) -> FabulaResult<()>;

    /// Append characters to a story.
    async fn insert_characters(&self, story_id: StoryId, characters: &[Character])
    -> FabulaResult<()>;

    /// Replace a story's segments.
    async fn replace_segments(&self, story_id: StoryId, segments: &[Segment]) -> FabulaResult<()>;

    /// Append a video to its story.
    async fn insert_video(&self, video: &Video) -> FabulaResult<()>;

    /// Fetch one story with all of its children.
    async fn fetch_story(&self, id: StoryId) -> FabulaResult<Option<Story>>;

    /// List an owner's stories with children, newest first.
    async fn list_stories(&self, owner_id: &str) -> FabulaResult<Vec<Story>>;
}
