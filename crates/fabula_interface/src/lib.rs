//! Trait definitions for the Fabula workflow engine.
//!
//! This crate defines the seams between the workflow engine and its external
//! collaborators: generation providers, the persistent artifact repository,
//! and progress consumers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod progress;
mod provider;
mod repository;
mod types;

pub use progress::{NullSink, ProgressSink};
pub use provider::{CharacterProvider, Deliverable, GenerationProvider, VideoProvider};
pub use repository::ArtifactRepository;
pub use types::{
    CharacterRef, CharacterRequest, VideoRequest, VideoRequestBuilder, VideoResponse, VideoScene,
};
