//! In-memory implementation of ArtifactRepository.
//!
//! Stores stories with their children in a HashMap. Used by the CLI and by
//! tests; an availability switch and an artificial latency let callers
//! simulate an unreachable or slow remote store.

use async_trait::async_trait;
use fabula_core::{Character, Segment, Story, StoryId, Video};
use fabula_error::{FabulaResult, PersistenceError, PersistenceErrorKind};
use fabula_interface::ArtifactRepository;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory artifact repository.
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryArtifactRepository {
    stories: Arc<RwLock<HashMap<StoryId, Story>>>,
    available: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryArtifactRepository {
    /// Create an empty, available repository.
    pub fn new() -> Self {
        Self {
            stories: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            latency_ms: Arc::new(AtomicU64::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every subsequent call succeed or fail as unavailable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Delay every subsequent call.
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Stored copy of a story, bypassing the availability switch.
    pub async fn stored(&self, id: StoryId) -> Option<Story> {
        self.stories.read().await.get(&id).cloned()
    }

    /// Number of stored stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }

    async fn enter(&self, operation: &str) -> FabulaResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if !self.available.load(Ordering::SeqCst) {
            debug!(operation, "Repository unavailable");
            return Err(PersistenceError::new(PersistenceErrorKind::Unavailable(format!(
                "{} rejected: repository offline",
                operation
            )))
            .into());
        }
        Ok(())
    }

    async fn with_story<F>(&self, id: StoryId, operation: &str, change: F) -> FabulaResult<()>
    where
        F: FnOnce(&mut Story),
    {
        self.enter(operation).await?;
        let mut stories = self.stories.write().await;
        let story = stories.get_mut(&id).ok_or_else(|| {
            PersistenceError::new(PersistenceErrorKind::Write(format!(
                "{}: story {} not found",
                operation, id
            )))
        })?;
        change(story);
        Ok(())
    }
}

impl Default for InMemoryArtifactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactRepository for InMemoryArtifactRepository {
    async fn create_story(&self, story: &Story) -> FabulaResult<()> {
        self.enter("create story").await?;
        self.stories.write().await.insert(story.id, story.clone());
        Ok(())
    }

    async fn update_story(&self, story: &Story) -> FabulaResult<()> {
        self.with_story(story.id, "update story", |stored| {
            stored.title = story.title.clone();
            stored.text = story.text.clone();
            stored.theme = story.theme;
            stored.length = story.length;
            stored.status = story.status;
            stored.metadata = story.metadata.clone();
            stored.updated_at = story.updated_at;
        })
        .await
    }

    async fn delete_story(&self, id: StoryId) -> FabulaResult<()> {
        self.enter("delete story").await?;
        // Children live inside the story, so they go with it
        self.stories.write().await.remove(&id);
        Ok(())
    }

    async fn insert_characters(
        &self,
        story_id: StoryId,
        characters: &[Character],
    ) -> FabulaResult<()> {
        self.with_story(story_id, "insert characters", |stored| {
            stored.characters.extend_from_slice(characters);
        })
        .await
    }

    async fn replace_segments(&self, story_id: StoryId, segments: &[Segment]) -> FabulaResult<()> {
        self.with_story(story_id, "replace segments", |stored| {
            stored.segments = segments.to_vec();
        })
        .await
    }

    async fn insert_video(&self, video: &Video) -> FabulaResult<()> {
        self.with_story(video.story_id, "insert video", |stored| {
            stored.videos.push(video.clone());
        })
        .await
    }

    async fn fetch_story(&self, id: StoryId) -> FabulaResult<Option<Story>> {
        self.enter("fetch story").await?;
        Ok(self.stories.read().await.get(&id).cloned())
    }

    async fn list_stories(&self, owner_id: &str) -> FabulaResult<Vec<Story>> {
        self.enter("list stories").await?;
        let mut owned: Vec<Story> = self
            .stories
            .read()
            .await
            .values()
            .filter(|story| story.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
