//! JSON-over-HTTP provider adapters.
//!
//! The request is POSTed as JSON; the response body is the abstract provider
//! contract serialized as JSON. Nothing here is specific to any vendor.

use async_trait::async_trait;
use fabula_config::{CharacterProviderConfig, VideoProviderConfig};
use fabula_core::{CharacterDraft, VideoProviderKind, VideoStatus};
use fabula_error::{ConfigError, FabulaResult, HttpError, ProviderError, ProviderErrorKind};
use fabula_interface::{CharacterRequest, GenerationProvider, VideoRequest, VideoResponse};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, instrument};

/// A named endpoint with an optional bearer key.
#[derive(Debug, Clone)]
struct JsonEndpoint {
    name: String,
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl JsonEndpoint {
    fn new(name: &str, endpoint: &str, api_key_env: Option<&str>) -> FabulaResult<Self> {
        let api_key = match api_key_env {
            Some(var) => Some(std::env::var(var).map_err(|e| {
                ConfigError::new(format!("{} not set for provider '{}': {}", var, name, e))
            })?),
            None => None,
        };

        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            api_key,
            client,
        })
    }

    fn failed(&self, message: String) -> ProviderError {
        ProviderError::new(ProviderErrorKind::Failed {
            provider: self.name.clone(),
            message,
        })
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, body: &B) -> FabulaResult<R> {
        debug!(endpoint = %self.endpoint, "Sending provider request");

        let mut req = self
            .client
            .post(&self.endpoint)
            .json(body)
            .header("Content-Type", "application/json");

        if let Some(api_key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            self.failed(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, "Provider returned error");
            return Err(ProviderError::new(ProviderErrorKind::Rejected {
                provider: self.name.clone(),
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let decoded = response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            self.failed(format!("Failed to parse response: {}", e))
        })?;
        Ok(decoded)
    }
}

#[derive(Debug, Deserialize)]
struct CharacterPayload {
    #[serde(default)]
    characters: Vec<CharacterDraft>,
}

#[derive(Debug, Deserialize)]
struct VideoPayload {
    #[serde(default)]
    asset_url: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    duration_secs: Option<u32>,
    #[serde(default)]
    status: VideoStatus,
    #[serde(default)]
    instructions: Option<String>,
}

/// Character provider reached over HTTP.
///
/// Expects a response of the form `{"characters": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpCharacterProvider {
    endpoint: JsonEndpoint,
}

impl HttpCharacterProvider {
    /// Build from configuration, reading the bearer key from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key variable is named but unset,
    /// or an HTTP error when the client cannot be built.
    pub fn from_config(config: &CharacterProviderConfig) -> FabulaResult<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new(
                &config.name,
                &config.endpoint,
                config.api_key_env.as_deref(),
            )?,
        })
    }
}

#[async_trait]
impl GenerationProvider for HttpCharacterProvider {
    type Request = CharacterRequest;
    type Output = Vec<CharacterDraft>;

    fn name(&self) -> &str {
        &self.endpoint.name
    }

    #[instrument(skip(self, request), fields(provider = %self.endpoint.name, story_id = %request.story_id))]
    async fn generate(&self, request: &CharacterRequest) -> FabulaResult<Vec<CharacterDraft>> {
        let payload: CharacterPayload = self.endpoint.post(request).await?;
        debug!(count = payload.characters.len(), "Characters received");
        Ok(payload.characters)
    }
}

/// Video provider reached over HTTP.
///
/// Produced videos carry the configured provider tag.
#[derive(Debug, Clone)]
pub struct HttpVideoProvider {
    endpoint: JsonEndpoint,
    kind: VideoProviderKind,
}

impl HttpVideoProvider {
    /// Build from configuration, reading the bearer key from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key variable is named but unset
    /// or the kind is the placeholder tag, or an HTTP error when the client
    /// cannot be built.
    pub fn from_config(config: &VideoProviderConfig) -> FabulaResult<Self> {
        if config.kind.is_fallback() {
            return Err(ConfigError::new(format!(
                "provider '{}' cannot use the placeholder kind",
                config.name
            ))
            .into());
        }
        Ok(Self {
            endpoint: JsonEndpoint::new(
                &config.name,
                &config.endpoint,
                config.api_key_env.as_deref(),
            )?,
            kind: config.kind,
        })
    }
}

#[async_trait]
impl GenerationProvider for HttpVideoProvider {
    type Request = VideoRequest;
    type Output = VideoResponse;

    fn name(&self) -> &str {
        &self.endpoint.name
    }

    #[instrument(skip(self, request), fields(provider = %self.endpoint.name, scenes = request.scenes.len()))]
    async fn generate(&self, request: &VideoRequest) -> FabulaResult<VideoResponse> {
        let payload: VideoPayload = self.endpoint.post(request).await?;
        debug!(status = %payload.status, "Video response received");
        Ok(VideoResponse {
            provider: self.kind,
            asset_url: payload.asset_url,
            thumbnail_url: payload.thumbnail_url,
            duration_secs: payload.duration_secs,
            status: payload.status,
            instructions: payload.instructions,
        })
    }
}
