//! Orchestrator settings derived from configuration.

use derive_getters::Getters;
use fabula_config::{FabulaConfig, FallbackVideoConfig};
use fabula_core::Theme;

/// Video request defaults and the terminal fallback video.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct PipelineSettings {
    /// Aspect ratio handed to video providers
    #[setters(into)]
    aspect_ratio: String,
    /// Style override; the story theme's default style when absent
    #[setters(strip_option, into)]
    style: Option<String>,
    /// Placeholder used when every video provider fails
    fallback_video: FallbackVideoConfig,
}

impl PipelineSettings {
    /// Style for a story of the given theme.
    pub fn style_for(&self, theme: Theme) -> String {
        self.style
            .clone()
            .unwrap_or_else(|| theme.default_style().to_string())
    }
}

impl From<&FabulaConfig> for PipelineSettings {
    fn from(config: &FabulaConfig) -> Self {
        Self {
            aspect_ratio: config.generation.aspect_ratio.clone(),
            style: config.generation.style.clone(),
            fallback_video: config.fallback_video.clone(),
        }
    }
}
