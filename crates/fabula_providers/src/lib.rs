//! Generation providers for the Fabula workflow engine.
//!
//! This crate provides the provider fallback chain, which tries
//! interchangeable providers in priority order until one delivers, plus the
//! provider adapters shipped with the workspace:
//!
//! - [`TemplateCharacterProvider`]: deterministic, offline character casts
//! - [`HttpCharacterProvider`] and [`HttpVideoProvider`]: JSON over HTTP
//!
//! # Example
//!
//! ```no_run
//! use fabula_config::FabulaConfig;
//! use fabula_providers::{character_chain, video_chain};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FabulaConfig::load()?;
//! let characters = character_chain(&config)?;
//! let video = video_chain(&config)?;
//! println!("{} character providers, {} video providers", characters.len(), video.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod http;
mod registry;
mod template;

pub use chain::{ChainOutcome, CharacterChain, FallbackChain, VideoChain};
pub use http::{HttpCharacterProvider, HttpVideoProvider};
pub use registry::{character_chain, offline_character_chain, video_chain};
pub use template::TemplateCharacterProvider;
