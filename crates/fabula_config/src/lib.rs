//! Configuration for the Fabula workflow engine.
//!
//! Configuration is layered from TOML files:
//! - Bundled defaults (include_str! from fabula.toml)
//! - User overrides (~/.config/fabula/fabula.toml, then ./fabula.toml)
//!
//! Later sources override earlier ones key by key.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    CharacterProviderConfig, FabulaConfig, FallbackVideoConfig, GenerationConfig, ProvidersConfig,
    VideoProviderConfig,
};
