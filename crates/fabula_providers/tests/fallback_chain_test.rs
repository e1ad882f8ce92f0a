//! Tests for the provider fallback chain.

mod test_utils;

use fabula_core::{Theme, VideoProviderKind, VideoStatus};
use fabula_interface::VideoResponse;
use fabula_providers::{ChainOutcome, CharacterChain, TemplateCharacterProvider, VideoChain};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    MockCharacters, MockVideo, character_request, rendered, video_request,
};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn falls_through_to_the_first_provider_that_delivers() -> anyhow::Result<()> {
    let p1 = MockVideo::failing("p1");
    let p2 = MockVideo::succeeding("p2", rendered(VideoProviderKind::Pika));
    let p3 = MockVideo::succeeding("p3", rendered(VideoProviderKind::Luma));

    let chain = VideoChain::new("video", Duration::from_secs(5))
        .with_provider(p1.clone())
        .with_provider(p2.clone())
        .with_provider(p3.clone());

    let outcome = chain.run(&video_request(), &CancellationToken::new()).await?;
    match outcome {
        ChainOutcome::Delivered {
            provider,
            output,
            failures,
        } => {
            assert_eq!(provider, "p2");
            assert_eq!(output.provider, VideoProviderKind::Pika);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].kind.provider(), "p1");
        }
        ChainOutcome::Exhausted { .. } => panic!("chain should have delivered"),
    }

    assert_eq!(p1.call_count(), 1);
    assert_eq!(p2.call_count(), 1);
    assert_eq!(p3.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn all_failures_exhaust_without_error() -> anyhow::Result<()> {
    let providers = [
        MockCharacters::failing("a"),
        MockCharacters::failing("b"),
        MockCharacters::failing("c"),
    ];
    let mut chain = CharacterChain::new("characters", Duration::from_secs(5));
    for provider in &providers {
        chain.push(provider.clone());
    }

    let outcome = chain
        .run(&character_request(), &CancellationToken::new())
        .await?;
    assert!(outcome.is_exhausted());
    let names: Vec<_> = outcome.failures().iter().map(|f| f.kind.provider()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    // No provider is retried within one traversal
    for provider in &providers {
        assert_eq!(provider.call_count(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn empty_chain_is_exhausted() -> anyhow::Result<()> {
    let chain = CharacterChain::new("characters", Duration::from_secs(5));
    assert!(chain.is_empty());
    let outcome = chain
        .run(&character_request(), &CancellationToken::new())
        .await?;
    assert!(outcome.is_exhausted());
    assert!(outcome.failures().is_empty());
    Ok(())
}

#[tokio::test]
async fn timeout_counts_as_failure() -> anyhow::Result<()> {
    let slow = MockVideo::hanging("slow");
    let fast = MockVideo::succeeding("fast", rendered(VideoProviderKind::Kling));
    let chain = VideoChain::new("video", Duration::from_millis(250))
        .with_provider(slow.clone())
        .with_provider(fast.clone());

    let outcome = chain.run(&video_request(), &CancellationToken::new()).await?;
    let failures = outcome.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].kind.is_timeout());
    assert!(matches!(outcome, ChainOutcome::Delivered { ref provider, .. } if provider == "fast"));
    Ok(())
}

#[tokio::test]
async fn undeliverable_results_are_skipped() -> anyhow::Result<()> {
    let instructions = VideoResponse {
        provider: VideoProviderKind::Runway,
        asset_url: None,
        thumbnail_url: None,
        duration_secs: None,
        status: VideoStatus::Pending,
        instructions: Some("Open the web console".to_string()),
    };
    let chain = VideoChain::new("video", Duration::from_secs(5))
        .with_provider(MockVideo::succeeding("instructions-only", instructions));

    let outcome = chain.run(&video_request(), &CancellationToken::new()).await?;
    assert!(outcome.is_exhausted());
    assert!(outcome.failures()[0].to_string().contains("undeliverable"));

    let empty = CharacterChain::new("characters", Duration::from_secs(5))
        .with_provider(MockCharacters::succeeding("empty", Vec::new()))
        .with_provider(Arc::new(TemplateCharacterProvider));
    let outcome = empty
        .run(&character_request(), &CancellationToken::new())
        .await?;
    match outcome {
        ChainOutcome::Delivered {
            provider, output, ..
        } => {
            assert_eq!(provider, "templates");
            assert_eq!(output, Theme::Fantasy.character_templates());
        }
        ChainOutcome::Exhausted { .. } => panic!("templates always deliver"),
    }
    Ok(())
}

#[tokio::test]
async fn cancellation_stops_before_the_next_provider() {
    let p1 = MockVideo::failing("p1");
    let chain = VideoChain::new("video", Duration::from_secs(5)).with_provider(p1.clone());

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = chain.run(&video_request(), &cancel).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(p1.call_count(), 0);
}

#[tokio::test]
async fn cancellation_interrupts_an_in_flight_call() {
    let slow = MockVideo::hanging("slow");
    let chain = VideoChain::new("video", Duration::from_secs(600)).with_provider(slow.clone());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let err = chain.run(&video_request(), &cancel).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(slow.call_count(), 1);
}

#[test]
fn debug_lists_provider_names_in_order() {
    let chain = CharacterChain::new("characters", Duration::from_secs(5))
        .with_provider(MockCharacters::failing("primary"))
        .with_provider(Arc::new(TemplateCharacterProvider));

    let rendered = format!("{chain:?}");
    assert!(rendered.contains("characters"));
    assert!(rendered.contains(r#"["primary", "templates"]"#));
}
