//! Build fallback chains from configuration.

use crate::{
    CharacterChain, HttpCharacterProvider, HttpVideoProvider, TemplateCharacterProvider,
    VideoChain,
};
use fabula_config::FabulaConfig;
use fabula_error::FabulaResult;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Character chain with every configured HTTP provider, in order.
///
/// Providers whose key variable is unset are skipped with a warning.
///
/// # Errors
///
/// Returns an error only if an HTTP client cannot be built.
#[instrument(skip(config))]
pub fn character_chain(config: &FabulaConfig) -> FabulaResult<CharacterChain> {
    let mut chain = CharacterChain::new("characters", config.generation.provider_timeout());
    for entry in &config.providers.characters {
        match HttpCharacterProvider::from_config(entry) {
            Ok(provider) => chain.push(Arc::new(provider)),
            Err(e) if e.is_config() => {
                warn!(provider = %entry.name, error = %e, "Skipping character provider")
            }
            Err(e) => return Err(e),
        }
    }
    info!(providers = ?chain.provider_names(), "Character chain ready");
    Ok(chain)
}

/// Character chain that only uses the offline templates.
pub fn offline_character_chain(config: &FabulaConfig) -> CharacterChain {
    CharacterChain::new("characters", config.generation.provider_timeout())
        .with_provider(Arc::new(TemplateCharacterProvider))
}

/// Video chain with every configured HTTP provider, in order.
///
/// Providers whose key variable is unset are skipped with a warning.
///
/// # Errors
///
/// Returns an error only if an HTTP client cannot be built.
#[instrument(skip(config))]
pub fn video_chain(config: &FabulaConfig) -> FabulaResult<VideoChain> {
    let mut chain = VideoChain::new("video", config.generation.provider_timeout());
    for entry in &config.providers.video {
        match HttpVideoProvider::from_config(entry) {
            Ok(provider) => chain.push(Arc::new(provider)),
            Err(e) if e.is_config() => {
                warn!(provider = %entry.name, error = %e, "Skipping video provider")
            }
            Err(e) => return Err(e),
        }
    }
    info!(providers = ?chain.provider_names(), "Video chain ready");
    Ok(chain)
}
