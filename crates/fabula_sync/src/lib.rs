//! State synchronization for the Fabula workflow engine.
//!
//! The [`StateSynchronizer`] owns the canonical in-memory map of stories. Writes
//! go to the remote repository first and are then applied locally whatever the
//! remote outcome; a failed remote write becomes a warning, not an error.
//! Deletes are the exception: the local record is only removed once the remote
//! delete succeeded.
//!
//! # Example
//!
//! ```no_run
//! use fabula_core::{Story, StoryLength, Theme};
//! use fabula_sync::{InMemoryArtifactRepository, StateSynchronizer, StoryMutation};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Arc::new(InMemoryArtifactRepository::new());
//! let sync = StateSynchronizer::new(repo, Duration::from_secs(10));
//!
//! let story = Story::new("owner-1", "The Lantern", "Once...", Theme::Fantasy, StoryLength::Short);
//! let outcome = sync.apply(StoryMutation::Create(story)).await?;
//! assert!(outcome.warning().is_none());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod mutation;
mod synchronizer;

pub use memory::InMemoryArtifactRepository;
pub use mutation::{StoryMutation, StoryUpdate};
pub use synchronizer::{ApplyOutcome, StateSynchronizer, local_wins};
