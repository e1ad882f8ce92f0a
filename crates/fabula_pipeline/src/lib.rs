//! Generation pipeline for the Fabula workflow engine.
//!
//! The [`GenerationOrchestrator`] moves a story to its next production stage:
//! it classifies the story, runs the matching provider fallback chain, hands
//! the result to the state synchronizer, and reports progress through a
//! [`ProgressSink`](fabula_interface::ProgressSink).
//!
//! Provider and persistence failures are absorbed: character generation falls
//! back to the per-theme templates and video generation falls back to a
//! placeholder video, so both always finish. Only missing stories, malformed
//! requests, and cancellation are errors.
//!
//! # Example
//!
//! ```no_run
//! use fabula_config::FabulaConfig;
//! use fabula_pipeline::{GenerationOrchestrator, PipelineSettings, progress_channel};
//! use fabula_providers::{character_chain, video_chain};
//! use fabula_sync::{InMemoryArtifactRepository, StateSynchronizer};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(story_id: fabula_core::StoryId) -> Result<(), Box<dyn std::error::Error>> {
//! let config = FabulaConfig::load()?;
//! let repo = Arc::new(InMemoryArtifactRepository::new());
//! let sync = Arc::new(StateSynchronizer::new(repo, config.generation.persistence_timeout()));
//! let orchestrator = GenerationOrchestrator::new(
//!     sync,
//!     character_chain(&config)?,
//!     video_chain(&config)?,
//!     PipelineSettings::from(&config),
//! );
//!
//! let (tx, mut rx) = progress_channel();
//! let report = orchestrator.advance(story_id, &tx, &CancellationToken::new()).await?;
//! while let Ok(event) = rx.try_recv() {
//!     println!("{}% {}", event.percent, event.message);
//! }
//! println!("now at {}", report.stage().stage());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod locks;
mod orchestrator;
mod progress;
mod report;
mod settings;

pub use locks::{StoryGuard, StoryLocks};
pub use orchestrator::GenerationOrchestrator;
pub use progress::{ProgressEmitter, progress_channel};
pub use report::{GenerationKind, WorkflowReport};
pub use settings::PipelineSettings;
