//! Generation provider traits.

use crate::{CharacterRequest, VideoRequest, VideoResponse};
use async_trait::async_trait;
use fabula_core::{CharacterDraft, VideoStatus};
use fabula_error::FabulaResult;

/// Decides whether a well-formed provider result is usable.
///
/// A provider may answer successfully with something the workflow cannot
/// use, such as instructions instead of a rendered video. The fallback chain
/// treats those answers as failures.
pub trait Deliverable {
    /// Why this result cannot be used, or `None` if it can.
    fn undeliverable_reason(&self) -> Option<String>;
}

/// One interchangeable generator for a single generation kind.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// What the provider is asked for.
    type Request: Send + Sync;
    /// What the provider returns.
    type Output: Deliverable + Send;

    /// Provider name used in logs and failure records.
    fn name(&self) -> &str;

    /// Run one generation.
    async fn generate(&self, request: &Self::Request) -> FabulaResult<Self::Output>;
}

/// A character generation provider.
pub type CharacterProvider =
    dyn GenerationProvider<Request = CharacterRequest, Output = Vec<CharacterDraft>>;

/// A video generation provider.
pub type VideoProvider = dyn GenerationProvider<Request = VideoRequest, Output = VideoResponse>;

impl Deliverable for Vec<CharacterDraft> {
    fn undeliverable_reason(&self) -> Option<String> {
        if self.is_empty() {
            Some("no characters returned".to_string())
        } else {
            None
        }
    }
}

impl Deliverable for VideoResponse {
    fn undeliverable_reason(&self) -> Option<String> {
        if self.status != VideoStatus::Completed {
            return Some(match &self.instructions {
                Some(_) => format!("instructions only, status {}", self.status),
                None => format!("video not completed, status {}", self.status),
            });
        }
        match self.asset_url.as_deref() {
            Some(url) if !url.trim().is_empty() => None,
            _ => Some("completed without an asset URL".to_string()),
        }
    }
}
