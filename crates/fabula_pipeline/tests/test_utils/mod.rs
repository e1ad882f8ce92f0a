//! Test utilities for orchestrator tests.
//!
//! This module provides scripted providers, a recording progress sink, and a
//! helper that wires an orchestrator over the in-memory repository.

use async_trait::async_trait;
use fabula_config::FabulaConfig;
use fabula_core::{
    CharacterDraft, ProgressEvent, Story, StoryLength, Theme, VideoProviderKind,
};
use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind};
use fabula_interface::{
    CharacterRequest, Deliverable, GenerationProvider, ProgressSink, VideoRequest, VideoResponse,
};
use fabula_pipeline::{GenerationOrchestrator, PipelineSettings};
use fabula_providers::{CharacterChain, VideoChain};
use fabula_sync::{InMemoryArtifactRepository, StateSynchronizer, StoryMutation};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior<Out> {
    /// Always return this output
    Succeed(Out),
    /// Always fail
    Fail,
    /// Wait, then return this output
    Slow(Duration, Out),
}

/// Mock provider that counts calls and tracks how many run at once.
pub struct MockProvider<Req, Out> {
    name: String,
    behavior: MockBehavior<Out>,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    _request: std::marker::PhantomData<fn(&Req)>,
}

impl<Req, Out> MockProvider<Req, Out> {
    pub fn new(name: &str, behavior: MockBehavior<Out>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            behavior,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            _request: std::marker::PhantomData,
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Self::new(name, MockBehavior::Fail)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<Req, Out> GenerationProvider for MockProvider<Req, Out>
where
    Req: Send + Sync + 'static,
    Out: Deliverable + Clone + Send + Sync + 'static,
{
    type Request = Req;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _request: &Req) -> FabulaResult<Out> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        let result = match &self.behavior {
            MockBehavior::Succeed(output) => Ok(output.clone()),
            MockBehavior::Slow(delay, output) => {
                tokio::time::sleep(*delay).await;
                Ok(output.clone())
            }
            MockBehavior::Fail => Err(ProviderError::new(ProviderErrorKind::Failed {
                provider: self.name.clone(),
                message: "service unavailable".to_string(),
            })
            .into()),
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub type MockCharacters = MockProvider<CharacterRequest, Vec<CharacterDraft>>;
pub type MockVideo = MockProvider<VideoRequest, VideoResponse>;

/// Collects every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}

/// Orchestrator over an in-memory repository.
pub struct Harness {
    pub repo: Arc<InMemoryArtifactRepository>,
    pub sync: Arc<StateSynchronizer>,
    pub orchestrator: Arc<GenerationOrchestrator>,
    pub config: FabulaConfig,
}

impl Harness {
    pub fn new(characters: CharacterChain, video: VideoChain) -> Self {
        let config = FabulaConfig::bundled().expect("bundled configuration");
        let repo = Arc::new(InMemoryArtifactRepository::new());
        let sync = Arc::new(StateSynchronizer::new(repo.clone(), Duration::from_secs(5)));
        let orchestrator = Arc::new(GenerationOrchestrator::new(
            sync.clone(),
            characters,
            video,
            PipelineSettings::from(&config),
        ));
        Self {
            repo,
            sync,
            orchestrator,
            config,
        }
    }

    pub async fn seed(&self, story: Story) -> Story {
        self.sync
            .apply(StoryMutation::Create(story))
            .await
            .expect("seed story")
            .story()
            .clone()
    }
}

pub fn chains() -> (CharacterChain, VideoChain) {
    (
        CharacterChain::new("characters", Duration::from_secs(5)),
        VideoChain::new("video", Duration::from_secs(5)),
    )
}

pub fn long_story(theme: Theme) -> Story {
    Story::new(
        "owner-1",
        "The Drowned Bell",
        "Every night at three the bell beneath the harbor rings, and every night one more \
         lantern on the pier goes dark. Nobody in town will say who rang it first.",
        theme,
        StoryLength::Short,
    )
}

#[allow(dead_code)]
pub fn rendered(kind: VideoProviderKind) -> VideoResponse {
    VideoResponse::completed(kind, format!("https://cdn.example.com/{kind}.mp4"))
}

/// Percent never decreases and exactly the last event is terminal.
#[allow(dead_code)]
pub fn assert_well_formed(events: &[ProgressEvent]) {
    assert!(!events.is_empty(), "no progress events");
    for pair in events.windows(2) {
        assert!(
            pair[0].percent <= pair[1].percent,
            "percent decreased: {:?}",
            events
        );
    }
    assert_eq!(events.iter().filter(|e| e.is_complete).count(), 1);
    let last = events.last().expect("non-empty");
    assert!(last.is_complete);
    assert_eq!(last.percent, 100);
}
