//! The canonical story collection and its remote mirror.

use crate::StoryMutation;
use derive_getters::Getters;
use fabula_core::{Story, StoryId, Warning, WarningSource};
use fabula_error::{
    FabulaResult, PersistenceError, PersistenceErrorKind, PreconditionError,
    PreconditionErrorKind,
};
use fabula_interface::ArtifactRepository;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Result of applying a mutation.
#[derive(Debug, Clone, Getters)]
pub struct ApplyOutcome {
    /// The story as committed locally
    story: Story,
    /// Set when the remote write failed and the local copy diverged
    warning: Option<Warning>,
}

impl ApplyOutcome {
    /// Consume the outcome, returning the story and any warning.
    pub fn into_parts(self) -> (Story, Option<Warning>) {
        (self.story, self.warning)
    }
}

/// The local-wins policy: a remote failure never fails the write.
///
/// Returns the warning to surface when the remote result is an error.
pub fn local_wins(operation: &str, remote: FabulaResult<()>) -> Option<Warning> {
    match remote {
        Ok(()) => None,
        Err(e) => {
            warn!(operation, error = %e, "Remote write failed, keeping local change");
            Some(Warning::new(
                WarningSource::Persistence,
                format!("{} was saved locally only: {}", operation, e),
            ))
        }
    }
}

/// Owns the canonical in-memory map of stories.
///
/// Only the synchronizer mutates the map; everyone else receives snapshots.
pub struct StateSynchronizer {
    repository: Arc<dyn ArtifactRepository>,
    stories: RwLock<HashMap<StoryId, Story>>,
    timeout: Duration,
}

impl std::fmt::Debug for StateSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateSynchronizer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl StateSynchronizer {
    /// Create a synchronizer with an empty local map.
    ///
    /// `timeout` bounds every remote call.
    pub fn new(repository: Arc<dyn ArtifactRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            stories: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    async fn remote<T, F>(&self, operation: &'static str, call: F) -> FabulaResult<T>
    where
        F: Future<Output = FabulaResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::new(PersistenceErrorKind::Timeout {
                operation: operation.to_string(),
                millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })
            .into()),
        }
    }

    async fn attempt_remote(&self, mutation: &StoryMutation, staged: &Story) -> FabulaResult<()> {
        let repo = &self.repository;
        let operation = mutation.operation();
        match mutation {
            StoryMutation::Create(_) => self.remote(operation, repo.create_story(staged)).await,
            StoryMutation::Update { .. } | StoryMutation::SetStatus { .. } => {
                self.remote(operation, repo.update_story(staged)).await
            }
            StoryMutation::AttachCharacters {
                story_id,
                characters,
            } => {
                self.remote(operation, repo.insert_characters(*story_id, characters))
                    .await
            }
            StoryMutation::ReplaceSegments { story_id, segments } => {
                self.remote(operation, repo.replace_segments(*story_id, segments))
                    .await
            }
            StoryMutation::AttachVideo(video) => {
                // The story's own status changes too
                self.remote(operation, repo.insert_video(video)).await?;
                self.remote(operation, repo.update_story(staged)).await
            }
        }
    }

    /// Apply a mutation: attempt remote, apply locally, then let local win.
    ///
    /// One call is one step for cancellation purposes: callers check their
    /// token before `apply`, never inside it. Attaching a video issues two
    /// remote calls (insert video, update story); both run, each bounded by
    /// the persistence timeout, unless the first fails.
    ///
    /// # Errors
    ///
    /// Returns a precondition error, before any remote call, when the target
    /// story is not in the local map. Remote failures are never errors; they
    /// are reported through [`ApplyOutcome::warning`].
    #[instrument(skip(self, mutation), fields(operation = mutation.operation(), story_id = %mutation.story_id()))]
    pub async fn apply(&self, mutation: StoryMutation) -> FabulaResult<ApplyOutcome> {
        let staged = mutation.preview(&*self.stories.read().await)?;

        let remote = self.attempt_remote(&mutation, &staged).await;

        let story = mutation.apply_local(&mut *self.stories.write().await)?;
        let warning = local_wins(mutation.operation(), remote);
        debug!(diverged = warning.is_some(), "Mutation applied");
        Ok(ApplyOutcome { story, warning })
    }

    /// Delete a story remotely, then locally.
    ///
    /// # Errors
    ///
    /// Returns the remote failure; the local record is left in place.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: StoryId) -> FabulaResult<()> {
        if let Err(e) = self
            .remote("delete story", self.repository.delete_story(id))
            .await
        {
            error!(error = %e, "Remote delete failed, keeping local record");
            return Err(e);
        }
        self.stories.write().await.remove(&id);
        info!("Story removed");
        Ok(())
    }

    /// Replace the owner's local stories with a fresh remote read.
    ///
    /// Returns the owner's stories, newest first.
    ///
    /// # Errors
    ///
    /// Returns the remote failure after clearing the owner's local set.
    #[instrument(skip(self))]
    pub async fn refetch_all(&self, owner_id: &str) -> FabulaResult<Vec<Story>> {
        let fetched = self
            .remote("list stories", self.repository.list_stories(owner_id))
            .await;

        let mut stories = self.stories.write().await;
        stories.retain(|_, story| story.owner_id != owner_id);

        match fetched {
            Ok(fetched) => {
                for story in fetched.iter().filter(|s| s.owner_id == owner_id) {
                    stories.insert(story.id, story.clone());
                }
                drop(stories);
                info!(count = fetched.len(), "Refetched stories");
                Ok(self.stories_for(owner_id).await)
            }
            Err(e) => {
                error!(error = %e, "Refetch failed, cleared local stories for owner");
                Err(e)
            }
        }
    }

    /// Snapshot of one story, if present locally.
    pub async fn snapshot(&self, id: StoryId) -> Option<Story> {
        self.stories.read().await.get(&id).cloned()
    }

    /// Snapshot of one story.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when the story is not present locally.
    pub async fn require(&self, id: StoryId) -> FabulaResult<Story> {
        self.snapshot(id).await.ok_or_else(|| {
            PreconditionError::new(PreconditionErrorKind::StoryNotFound(id.to_string())).into()
        })
    }

    /// The owner's stories, newest first.
    pub async fn stories_for(&self, owner_id: &str) -> Vec<Story> {
        let mut owned: Vec<Story> = self
            .stories
            .read()
            .await
            .values()
            .filter(|story| story.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        owned
    }

    /// Number of stories held locally.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Whether the local map is empty.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}
