//! Configuration structures and loading.

use config::{Config, File, FileFormat};
use fabula_core::VideoProviderKind;
use fabula_error::{ConfigError, FabulaError, FabulaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../fabula.toml");

/// Timeouts and video request defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Upper bound for one provider call, in seconds
    pub provider_timeout_secs: u64,
    /// Upper bound for one remote repository call, in seconds
    pub persistence_timeout_secs: u64,
    /// Aspect ratio handed to video providers
    pub aspect_ratio: String,
    /// Visual style; the story theme's default style when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl GenerationConfig {
    /// Provider call timeout.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Repository call timeout.
    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_secs(self.persistence_timeout_secs)
    }
}

/// The placeholder video used when every video provider fails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FallbackVideoConfig {
    /// Placeholder asset
    pub asset_url: String,
    /// Placeholder thumbnail
    pub thumbnail_url: String,
    /// Placeholder duration in seconds
    pub duration_secs: u32,
}

/// A JSON-over-HTTP character provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CharacterProviderConfig {
    /// Name used in logs and failure records
    pub name: String,
    /// Endpoint receiving the request as JSON
    pub endpoint: String,
    /// Environment variable holding a bearer key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// A JSON-over-HTTP video provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoProviderConfig {
    /// Name used in logs and failure records
    pub name: String,
    /// Provider tag recorded on produced videos
    pub kind: VideoProviderKind,
    /// Endpoint receiving the request as JSON
    pub endpoint: String,
    /// Environment variable holding a bearer key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// Provider lists, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Character providers
    #[serde(default)]
    pub characters: Vec<CharacterProviderConfig>,
    /// Video providers
    #[serde(default)]
    pub video: Vec<VideoProviderConfig>,
}

/// Top-level Fabula configuration.
///
/// # Example
///
/// ```no_run
/// use fabula_config::FabulaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FabulaConfig::load()?;
/// println!("Provider timeout: {:?}", config.generation.provider_timeout());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FabulaConfig {
    /// Timeouts and request defaults
    pub generation: GenerationConfig,
    /// Terminal video fallback
    pub fallback_video: FallbackVideoConfig,
    /// Configured providers
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl FabulaConfig {
    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse or validate.
    pub fn bundled() -> FabulaResult<Self> {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load configuration from a specific file path.
    ///
    /// The file must be complete; bundled defaults are not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FabulaResult<Self> {
        debug!("Loading configuration from file");
        let builder = Config::builder().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file fails to parse, or the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load() -> FabulaResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut overrides = Vec::new();
        if let Some(home) = dirs::home_dir() {
            overrides.push(home.join(".config/fabula/fabula.toml"));
        }
        overrides.push("fabula.toml".into());

        Self::load_layered(overrides.as_slice())
    }

    /// Bundled defaults overlaid with each existing file in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file fails to parse, or the merged
    /// configuration fails validation.
    pub fn load_layered(overrides: &[impl AsRef<Path>]) -> FabulaResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        for path in overrides {
            debug!(path = %path.as_ref().display(), "Adding optional configuration layer");
            builder = builder.add_source(File::from(path.as_ref()).required(false));
        }
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FabulaResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                FabulaError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FabulaError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero timeouts, a blank fallback
    /// asset, or a provider without a name or endpoint.
    pub fn validate(&self) -> FabulaResult<()> {
        if self.generation.provider_timeout_secs == 0 {
            return Err(ConfigError::new("generation.provider_timeout_secs must be positive").into());
        }
        if self.generation.persistence_timeout_secs == 0 {
            return Err(
                ConfigError::new("generation.persistence_timeout_secs must be positive").into(),
            );
        }
        if self.fallback_video.asset_url.trim().is_empty() {
            return Err(ConfigError::new("fallback_video.asset_url must not be empty").into());
        }

        let endpoints = self
            .providers
            .characters
            .iter()
            .map(|p| (&p.name, &p.endpoint))
            .chain(self.providers.video.iter().map(|p| (&p.name, &p.endpoint)));
        for (name, endpoint) in endpoints {
            if name.trim().is_empty() {
                return Err(ConfigError::new("provider name must not be empty").into());
            }
            if endpoint.trim().is_empty() {
                return Err(
                    ConfigError::new(format!("provider '{}' has an empty endpoint", name)).into(),
                );
            }
        }
        Ok(())
    }
}
