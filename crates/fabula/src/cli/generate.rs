//! Generate command handler.

use super::commands::GenerateKind;
use fabula::{
    FabulaConfig, FabulaResult, GenerationOrchestrator, InMemoryArtifactRepository, JsonError,
    PipelineSettings, StateSynchronizer, StoryMutation, VideoChain, character_chain,
    offline_character_chain, progress_channel, read_story, video_chain,
};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Seed an in-memory repository with the story, run the orchestrator, and
/// print progress, the resulting story, and any warnings.
///
/// Ctrl-C cancels the run.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn generate(path: &Path, kind: GenerateKind, offline: bool) -> FabulaResult<()> {
    let config = FabulaConfig::load()?;
    let story = read_story(path)?;
    let story_id = story.id;

    let repo = Arc::new(InMemoryArtifactRepository::new());
    let sync = Arc::new(StateSynchronizer::new(
        repo,
        config.generation.persistence_timeout(),
    ));
    sync.apply(StoryMutation::Create(story)).await?;

    let (characters, video) = if offline {
        info!("Offline mode: templates and placeholder video only");
        (
            offline_character_chain(&config),
            VideoChain::new("video", config.generation.provider_timeout()),
        )
    } else {
        (character_chain(&config)?, video_chain(&config)?)
    };
    let orchestrator =
        GenerationOrchestrator::new(sync, characters, video, PipelineSettings::from(&config));

    let (tx, mut rx) = progress_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("[{:>3}%] {}: {}", event.percent, event.label, event.message);
        }
    });

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = match kind {
        GenerateKind::Advance => orchestrator.advance(story_id, &tx, &cancel).await,
        GenerateKind::Characters => {
            orchestrator
                .generate_characters(story_id, &tx, &cancel)
                .await
        }
        GenerateKind::Video => orchestrator.generate_video(story_id, &tx, &cancel).await,
    };

    drop(tx);
    interrupt.abort();
    // The printer ends once the sender is gone
    let _ = printer.await;

    let report = result?;
    let json = serde_json::to_string_pretty(report.story())
        .map_err(|e| JsonError::new(format!("Failed to serialize story: {}", e)))?;
    println!("{}", json);

    println!(
        "stage: {} ({}%), next: {}",
        report.stage().stage(),
        report.stage().percent(),
        report.stage().next_action()
    );
    for failure in report.provider_failures() {
        eprintln!("provider failure: {}", failure.kind);
    }
    for warning in report.warnings() {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
