//! Core data types for the Fabula story generation workflow engine.
//!
//! This crate provides the story model moved through the production stages,
//! the pure progress classifier, progress events, warnings, and the fixed
//! per-theme character templates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod progress;
mod segment;
mod stage;
mod story;
mod telemetry;
mod templates;
mod video;
mod warning;

pub use character::{
    Appearance, AppearanceBuilder, Character, CharacterDraft, CharacterDraftBuilder,
    CharacterRole, PhotoRef,
};
pub use progress::ProgressEvent;
pub use segment::Segment;
pub use stage::{NextAction, Stage, StageDescriptor, StoryFacts, TEXT_LENGTH_THRESHOLD, classify};
pub use story::{Story, StoryId, StoryLength, StoryStatus, Theme, parse_story_id};
pub use telemetry::{TracingConfig, init_tracing};
pub use video::{Video, VideoProviderKind, VideoStatus};
pub use warning::{Warning, WarningSource};
