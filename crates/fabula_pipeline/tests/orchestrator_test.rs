//! Tests for the generation pipeline orchestrator.

mod test_utils;

use fabula_core::{
    CharacterDraft, NextAction, Segment, Stage, StoryStatus, Theme, VideoProviderKind,
    VideoStatus, WarningSource,
};
use fabula_interface::NullSink;
use fabula_pipeline::GenerationKind;
use fabula_providers::TemplateCharacterProvider;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    Harness, MockBehavior, MockCharacters, MockVideo, RecordingSink, assert_well_formed, chains,
    long_story, rendered,
};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn all_video_providers_failing_yields_placeholder_video() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let a = MockVideo::failing("provider-a");
    let b = MockVideo::failing("provider-b");
    let harness = Harness::new(
        characters,
        video.with_provider(a.clone()).with_provider(b.clone()),
    );
    let story = harness.seed(long_story(Theme::Mystery)).await;

    let sink = RecordingSink::default();
    let report = harness
        .orchestrator
        .generate_video(story.id, &sink, &CancellationToken::new())
        .await?;

    let video = report.story().videos.last().expect("video attached");
    assert_eq!(video.provider, VideoProviderKind::Placeholder);
    assert_eq!(video.status, VideoStatus::Completed);
    assert_eq!(
        video.url.as_deref(),
        Some(harness.config.fallback_video.asset_url.as_str())
    );
    assert!(*report.used_fallback());
    assert_eq!(report.provider_failures().len(), 2);
    assert!(
        report
            .warnings()
            .iter()
            .any(|w| w.source == WarningSource::Fallback)
    );
    assert_eq!(report.story().status, StoryStatus::Completed);
    assert_eq!(*report.stage().stage(), Stage::Completed);
    assert_eq!(a.call_count(), 1);
    assert_eq!(b.call_count(), 1);
    assert_well_formed(&sink.events());

    // Committed through the synchronizer to both sides
    assert_eq!(harness.sync.require(story.id).await?.videos.len(), 1);
    assert_eq!(harness.repo.stored(story.id).await.map(|s| s.videos.len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn second_video_provider_wins_when_first_fails() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(
        characters,
        video
            .with_provider(MockVideo::failing("provider-a"))
            .with_provider(MockVideo::new(
                "provider-b",
                MockBehavior::Succeed(rendered(VideoProviderKind::Luma)),
            )),
    );
    let story = harness.seed(long_story(Theme::SciFi)).await;

    let report = harness
        .orchestrator
        .generate_video(story.id, &NullSink, &CancellationToken::new())
        .await?;

    let video = &report.story().videos[0];
    assert_eq!(video.provider, VideoProviderKind::Luma);
    assert_eq!(video.url.as_deref(), Some("https://cdn.example.com/luma.mp4"));
    assert!(!*report.used_fallback());
    assert_eq!(report.provider_failures().len(), 1);
    assert!(report.warnings().is_empty());
    Ok(())
}

#[tokio::test]
async fn video_request_uses_segments_when_present() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(
        characters,
        video.with_provider(MockVideo::new(
            "runway",
            MockBehavior::Succeed(rendered(VideoProviderKind::Runway)),
        )),
    );
    let mut story = long_story(Theme::Adventure);
    story.segments = vec![
        Segment {
            index: 0,
            description: "Dawn at the dig site".to_string(),
            duration_secs: 12,
            visual_prompt: "dusty tents at sunrise".to_string(),
        },
        Segment {
            index: 1,
            description: "The map is revealed".to_string(),
            duration_secs: 8,
            visual_prompt: "close-up of a torn map".to_string(),
        },
    ];
    let story = harness.seed(story).await;

    let report = harness
        .orchestrator
        .generate_video(story.id, &NullSink, &CancellationToken::new())
        .await?;
    // The provider left duration empty, so the scene total is recorded
    assert_eq!(report.story().videos[0].duration_secs, Some(20));
    Ok(())
}

#[tokio::test]
async fn oversized_segment_durations_saturate() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let mut story = long_story(Theme::Horror);
    story.segments = vec![
        Segment::synthetic("The ward goes quiet", u32::MAX),
        Segment::synthetic("A bed is empty", 1),
    ];
    let story = harness.seed(story).await;

    let sink = RecordingSink::default();
    let report = harness
        .orchestrator
        .generate_video(story.id, &sink, &CancellationToken::new())
        .await?;

    let video = report.story().videos.last().expect("video attached");
    assert_eq!(video.status, VideoStatus::Completed);
    assert_eq!(video.provider, VideoProviderKind::Placeholder);
    assert_well_formed(&sink.events());
    Ok(())
}

#[tokio::test]
async fn characters_fall_back_to_templates_without_providers() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let story = harness.seed(long_story(Theme::Horror)).await;

    let sink = RecordingSink::default();
    let report = harness
        .orchestrator
        .generate_characters(story.id, &sink, &CancellationToken::new())
        .await?;

    let names: Vec<_> = report.story().characters.iter().map(|c| c.name.clone()).collect();
    let expected: Vec<_> = Theme::Horror
        .character_templates()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, expected);
    assert!(report.story().characters.iter().all(|c| c.story_id == story.id));
    assert!(*report.used_fallback());
    assert_eq!(*report.generated(), Some(GenerationKind::Characters));
    assert_eq!(*report.stage().stage(), Stage::SceneSegmentation);

    let events = sink.events();
    assert_well_formed(&events);
    assert_eq!(events[0].label, "analyzing");
    assert_eq!(events[0].percent, 10);
    assert!(
        events
            .iter()
            .filter(|e| !e.is_complete && e.label == "generating")
            .all(|e| (40..=70).contains(&e.percent))
    );
    Ok(())
}

#[tokio::test]
async fn delivered_characters_are_attached_in_order() -> anyhow::Result<()> {
    let drafts = vec![
        CharacterDraft::builder()
            .name("Wren")
            .description("Bell-ringer's apprentice")
            .build()?,
        CharacterDraft::builder()
            .name("Father Osk")
            .description("Keeper of the harbor chapel")
            .build()?,
    ];
    let (characters, video) = chains();
    let harness = Harness::new(
        characters
            .with_provider(MockCharacters::failing("llm-a"))
            .with_provider(MockCharacters::new("llm-b", MockBehavior::Succeed(drafts)))
            .with_provider(Arc::new(TemplateCharacterProvider)),
        video,
    );
    let story = harness.seed(long_story(Theme::Mystery)).await;

    let report = harness
        .orchestrator
        .generate_characters(story.id, &NullSink, &CancellationToken::new())
        .await?;

    let names: Vec<_> = report.story().characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Wren", "Father Osk"]);
    assert!(!*report.used_fallback());
    assert_eq!(report.provider_failures().len(), 1);
    Ok(())
}

#[tokio::test]
async fn characters_survive_an_unreachable_repository() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let story = harness.seed(long_story(Theme::Fantasy)).await;
    harness.repo.set_available(false);

    let sink = RecordingSink::default();
    let report = harness
        .orchestrator
        .generate_characters(story.id, &sink, &CancellationToken::new())
        .await?;

    assert!(
        report
            .warnings()
            .iter()
            .any(|w| w.source == WarningSource::Persistence)
    );
    let local = harness.sync.require(story.id).await?;
    assert_eq!(local.characters.len(), Theme::Fantasy.character_templates().len());
    assert_well_formed(&sink.events());
    Ok(())
}

#[tokio::test]
async fn advance_dispatches_on_stage() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(
        characters,
        video.with_provider(MockVideo::new(
            "pika",
            MockBehavior::Succeed(rendered(VideoProviderKind::Pika)),
        )),
    );
    let story = harness.seed(long_story(Theme::Romance)).await;
    let cancel = CancellationToken::new();

    let first = harness.orchestrator.advance(story.id, &NullSink, &cancel).await?;
    assert_eq!(*first.generated(), Some(GenerationKind::Characters));

    let second = harness.orchestrator.advance(story.id, &NullSink, &cancel).await?;
    assert_eq!(*second.generated(), Some(GenerationKind::Video));
    assert_eq!(*second.stage().next_action(), NextAction::ViewResult);

    let sink = RecordingSink::default();
    let third = harness.orchestrator.advance(story.id, &sink, &cancel).await?;
    assert_eq!(*third.generated(), None);
    assert_eq!(third.story().videos.len(), 1);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_complete);
    Ok(())
}

#[tokio::test]
async fn advance_rejects_short_text_before_any_provider_call() {
    let (characters, video) = chains();
    let probe = MockCharacters::failing("llm");
    let harness = Harness::new(characters.with_provider(probe.clone()), video);
    let mut story = long_story(Theme::Fantasy);
    story.text = "Too short.".to_string();
    let story = harness.seed(story).await;

    let sink = RecordingSink::default();
    let err = harness
        .orchestrator
        .advance(story.id, &sink, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(probe.call_count(), 0);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn empty_title_is_a_validation_error() {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let mut story = long_story(Theme::Fantasy);
    story.title = "  ".to_string();
    let story = harness.seed(story).await;

    let err = harness
        .orchestrator
        .generate_video(story.id, &NullSink, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(harness.sync.require(story.id).await.unwrap().videos.is_empty());
}

#[tokio::test]
async fn unknown_story_is_a_precondition_error() {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let ghost = long_story(Theme::Fantasy);

    let err = harness
        .orchestrator
        .generate_characters(ghost.id, &NullSink, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_precondition());
    assert!(harness.sync.is_empty().await);
}

#[tokio::test]
async fn cancelled_invocation_emits_nothing_further_and_commits_nothing() -> anyhow::Result<()> {
    let slow = MockVideo::new(
        "slow",
        MockBehavior::Slow(Duration::from_secs(30), rendered(VideoProviderKind::Kling)),
    );
    let (characters, video) = chains();
    let harness = Harness::new(characters, video.with_provider(slow.clone()));
    let story = harness.seed(long_story(Theme::SciFi)).await;

    let story_id = story.id;
    let sink = Arc::new(RecordingSink::default());
    let cancel = CancellationToken::new();
    let task = {
        let orchestrator = harness.orchestrator.clone();
        let sink = sink.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { orchestrator.generate_video(story_id, &*sink, &cancel).await })
    };

    // Wait until the provider call is in flight
    while slow.call_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let emitted_before_cancel = sink.events().len();
    cancel.cancel();

    let err = task.await?.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(sink.events().len(), emitted_before_cancel);
    assert!(sink.events().iter().all(|e| !e.is_complete));
    assert!(harness.sync.require(story.id).await?.videos.is_empty());
    assert!(harness.repo.stored(story.id).await.is_some_and(|s| s.videos.is_empty()));
    Ok(())
}

#[tokio::test]
async fn same_story_invocations_are_serialized() -> anyhow::Result<()> {
    let slow = MockVideo::new(
        "slow",
        MockBehavior::Slow(Duration::from_millis(100), rendered(VideoProviderKind::Runway)),
    );
    let (characters, video) = chains();
    let harness = Harness::new(characters, video.with_provider(slow.clone()));
    let story_id = harness.seed(long_story(Theme::Adventure)).await.id;

    let mut tasks = Vec::new();
    let mut sinks = Vec::new();
    for _ in 0..2 {
        let orchestrator = harness.orchestrator.clone();
        let sink = Arc::new(RecordingSink::default());
        sinks.push(sink.clone());
        tasks.push(tokio::spawn(async move {
            orchestrator
                .generate_video(story_id, &*sink, &CancellationToken::new())
                .await
        }));
    }
    for task in tasks {
        task.await??;
    }

    assert_eq!(slow.call_count(), 2);
    assert_eq!(slow.max_concurrent(), 1);
    for sink in sinks {
        assert_well_formed(&sink.events());
    }
    assert_eq!(harness.sync.require(story_id).await?.videos.len(), 2);
    Ok(())
}

#[tokio::test]
async fn different_stories_run_concurrently() -> anyhow::Result<()> {
    let slow = MockVideo::new(
        "slow",
        MockBehavior::Slow(Duration::from_millis(200), rendered(VideoProviderKind::Runway)),
    );
    let (characters, video) = chains();
    let harness = Harness::new(characters, video.with_provider(slow.clone()));
    let first = harness.seed(long_story(Theme::Adventure)).await;
    let second = harness.seed(long_story(Theme::Fantasy)).await;

    let cancel = CancellationToken::new();
    let (a, b) = tokio::join!(
        harness.orchestrator.generate_video(first.id, &NullSink, &cancel),
        harness.orchestrator.generate_video(second.id, &NullSink, &cancel),
    );
    a?;
    b?;
    assert_eq!(slow.max_concurrent(), 2);
    Ok(())
}

#[tokio::test]
async fn direct_character_generation_appends_while_advance_moves_on() -> anyhow::Result<()> {
    let (characters, video) = chains();
    let harness = Harness::new(characters, video);
    let story = harness.seed(long_story(Theme::Romance)).await;
    let cast = Theme::Romance.character_templates().len();
    let cancel = CancellationToken::new();

    harness
        .orchestrator
        .generate_characters(story.id, &NullSink, &cancel)
        .await?;
    let report = harness
        .orchestrator
        .generate_characters(story.id, &NullSink, &cancel)
        .await?;
    assert_eq!(report.story().characters.len(), cast * 2);

    // Past character extraction, advance runs the video path instead
    let report = harness.orchestrator.advance(story.id, &NullSink, &cancel).await?;
    assert_eq!(*report.generated(), Some(GenerationKind::Video));
    assert_eq!(report.story().characters.len(), cast * 2);
    Ok(())
}
