//! Fabula - Story Generation Workflow Engine
//!
//! Fabula carries a story through AI-assisted production stages (text,
//! characters, scenes, video) without the caller tracking where it left off,
//! and without ever fully blocking on a failing third-party generator.
//!
//! # Features
//!
//! - **Progress Classifier**: the production stage is derived from what a story contains
//! - **Provider Fallback Chain**: interchangeable providers tried in priority order
//! - **Generation Pipeline**: character and video generation with guaranteed fallbacks
//! - **State Synchronizer**: local-first writes with best-effort remote persistence
//!
//! # Architecture
//!
//! Fabula is organized as a workspace with focused crates:
//!
//! - `fabula_error` - Error types
//! - `fabula_core` - Story model, classifier, templates, tracing setup
//! - `fabula_interface` - Provider, repository, and progress traits
//! - `fabula_config` - Layered TOML configuration
//! - `fabula_providers` - Fallback chain and provider adapters
//! - `fabula_sync` - State synchronizer and in-memory repository
//! - `fabula_pipeline` - Generation orchestrator
//!
//! This crate (`fabula`) re-exports everything for convenience.

mod story_file;

pub use story_file::read_story;

pub use fabula_config::*;
pub use fabula_core::*;
pub use fabula_error::*;
pub use fabula_interface::*;
pub use fabula_pipeline::*;
pub use fabula_providers::*;
pub use fabula_sync::*;
