//! Test utilities for provider tests.
//!
//! This module provides a scripted mock provider and request helpers.

use async_trait::async_trait;
use fabula_core::{CharacterDraft, Theme, VideoProviderKind};
use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind};
use fabula_interface::{
    CharacterRequest, GenerationProvider, VideoRequest, VideoResponse, VideoScene,
};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior<Out> {
    /// Always return this output
    Succeed(Out),
    /// Always fail
    Fail(String),
    /// Sleep longer than any test timeout
    Hang,
}

/// Mock provider that counts calls.
pub struct MockProvider<Req, Out> {
    name: String,
    behavior: MockBehavior<Out>,
    calls: Arc<AtomicUsize>,
    _request: PhantomData<fn(&Req)>,
}

impl<Req, Out: Clone> MockProvider<Req, Out> {
    pub fn new(name: &str, behavior: MockBehavior<Out>) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            _request: PhantomData,
        }
    }

    pub fn succeeding(name: &str, output: Out) -> Arc<Self> {
        Arc::new(Self::new(name, MockBehavior::Succeed(output)))
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self::new(name, MockBehavior::Fail("connection refused".into())))
    }

    pub fn hanging(name: &str) -> Arc<Self> {
        Arc::new(Self::new(name, MockBehavior::Hang))
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<Req, Out> GenerationProvider for MockProvider<Req, Out>
where
    Req: Send + Sync + 'static,
    Out: fabula_interface::Deliverable + Clone + Send + Sync + 'static,
{
    type Request = Req;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _request: &Req) -> FabulaResult<Out> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Succeed(output) => Ok(output.clone()),
            MockBehavior::Fail(message) => Err(ProviderError::new(ProviderErrorKind::Failed {
                provider: self.name.clone(),
                message: message.clone(),
            })
            .into()),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ProviderError::new(ProviderErrorKind::Failed {
                    provider: self.name.clone(),
                    message: "woke up".into(),
                })
                .into())
            }
        }
    }
}

pub type MockCharacters = MockProvider<CharacterRequest, Vec<CharacterDraft>>;
pub type MockVideo = MockProvider<VideoRequest, VideoResponse>;

pub fn character_request() -> CharacterRequest {
    CharacterRequest {
        story_id: uuid::Uuid::new_v4(),
        theme: Theme::Fantasy,
        story_text: "A ranger follows a river of light into the old forest.".to_string(),
    }
}

#[allow(dead_code)]
pub fn video_request() -> VideoRequest {
    VideoRequest::builder()
        .scenes(vec![VideoScene {
            description: "The ranger reaches the glade".to_string(),
            duration_secs: 10,
            visual_prompt: "moonlit glade, glowing river".to_string(),
        }])
        .target_duration_secs(10u32)
        .aspect_ratio("16:9")
        .style("painterly")
        .build()
        .expect("Failed to build test video request")
}

#[allow(dead_code)]
pub fn rendered(kind: VideoProviderKind) -> VideoResponse {
    VideoResponse::completed(kind, format!("https://cdn.example.com/{kind}.mp4"))
}
