//! Per-kind generation state machines.

use crate::{GenerationKind, PipelineSettings, ProgressEmitter, StoryLocks, WorkflowReport};
use fabula_core::{
    CharacterDraft, Segment, Stage, Story, StoryId, TEXT_LENGTH_THRESHOLD, Video,
    VideoProviderKind, VideoStatus, Warning, WarningSource, classify,
};
use fabula_error::{FabulaResult, ValidationError, ValidationErrorKind, WorkflowError};
use fabula_interface::{
    CharacterRef, CharacterRequest, ProgressSink, VideoRequest, VideoResponse, VideoScene,
};
use fabula_providers::{ChainOutcome, CharacterChain, VideoChain};
use fabula_sync::{StateSynchronizer, StoryMutation};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

fn checkpoint(cancel: &CancellationToken, step: &str) -> FabulaResult<()> {
    if cancel.is_cancelled() {
        debug!(step, "Cancellation observed");
        return Err(WorkflowError::cancelled(step).into());
    }
    Ok(())
}

/// Drives a story through character and video generation.
///
/// States per invocation: idle, analyzing, generating, persisting, complete.
/// Only precondition errors, validation errors, and cancellation end an
/// invocation early.
pub struct GenerationOrchestrator {
    sync: Arc<StateSynchronizer>,
    characters: CharacterChain,
    video: VideoChain,
    settings: PipelineSettings,
    locks: StoryLocks,
}

impl std::fmt::Debug for GenerationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("characters", &self.characters)
            .field("video", &self.video)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GenerationOrchestrator {
    /// Create an orchestrator over a shared synchronizer.
    pub fn new(
        sync: Arc<StateSynchronizer>,
        characters: CharacterChain,
        video: VideoChain,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            sync,
            characters,
            video,
            settings,
            locks: StoryLocks::new(),
        }
    }

    /// The synchronizer this orchestrator commits to.
    pub fn synchronizer(&self) -> &Arc<StateSynchronizer> {
        &self.sync
    }

    /// Generate and attach characters for a story.
    ///
    /// Falls back to the theme's template cast when no provider is configured
    /// or every provider fails.
    ///
    /// New characters are appended to the story's existing cast; calling this
    /// on a story that already has characters adds a second cast. Use
    /// [`advance`](Self::advance) to only generate when the stage calls for it.
    ///
    /// # Errors
    ///
    /// Returns a precondition error for an unknown story, a validation error
    /// for an empty title or text, or a workflow error when cancelled.
    #[instrument(skip(self, sink, cancel))]
    pub async fn generate_characters(
        &self,
        story_id: StoryId,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        let _guard = self.locks.acquire(story_id).await;
        let mut progress = ProgressEmitter::new(sink, cancel);
        self.run_characters(story_id, &mut progress, cancel)
            .await
            .inspect_err(|e| error!(error = %e, "Character generation failed"))
    }

    /// Generate and attach a video for a story.
    ///
    /// Always ends with a completed video: the placeholder when every
    /// provider fails.
    ///
    /// # Errors
    ///
    /// Returns a precondition error for an unknown story, a validation error
    /// for an empty title or text, or a workflow error when cancelled.
    #[instrument(skip(self, sink, cancel))]
    pub async fn generate_video(
        &self,
        story_id: StoryId,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        let _guard = self.locks.acquire(story_id).await;
        let mut progress = ProgressEmitter::new(sink, cancel);
        self.run_video(story_id, &mut progress, cancel)
            .await
            .inspect_err(|e| error!(error = %e, "Video generation failed"))
    }

    /// Run whatever generation the story's current stage calls for.
    ///
    /// Character extraction runs the character path; scene segmentation and
    /// video generation run the video path; a completed story only gets a
    /// terminal progress event.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the story text is too short to
    /// generate from, plus everything the generation paths return.
    #[instrument(skip(self, sink, cancel))]
    pub async fn advance(
        &self,
        story_id: StoryId,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        let _guard = self.locks.acquire(story_id).await;
        let mut progress = ProgressEmitter::new(sink, cancel);
        self.run_advance(story_id, &mut progress, cancel)
            .await
            .inspect_err(|e| error!(error = %e, "Advance failed"))
    }

    async fn run_advance(
        &self,
        story_id: StoryId,
        progress: &mut ProgressEmitter<'_>,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        let story = self.sync.require(story_id).await?;
        let descriptor = classify(&story);
        debug!(stage = %descriptor.stage(), "Dispatching on stage");

        match descriptor.stage() {
            Stage::StoryEditing => Err(ValidationError::new(ValidationErrorKind::TextTooShort {
                actual: story.text_len(),
                required: TEXT_LENGTH_THRESHOLD,
            })
            .into()),
            Stage::CharacterExtraction => self.run_characters(story_id, progress, cancel).await,
            Stage::SceneSegmentation | Stage::VideoGeneration => {
                self.run_video(story_id, progress, cancel).await
            }
            Stage::Completed => {
                checkpoint(cancel, "complete")?;
                progress.complete("complete", "Story already has a video");
                info!("Story already completed, nothing to generate");
                Ok(WorkflowReport::new(story, None))
            }
        }
    }

    async fn load(&self, story_id: StoryId) -> FabulaResult<Story> {
        let story = self.sync.require(story_id).await?;
        story.validate_for_generation()?;
        Ok(story)
    }

    async fn commit(
        &self,
        report: WorkflowReport,
        mutation: StoryMutation,
    ) -> FabulaResult<WorkflowReport> {
        let (story, warning) = self.sync.apply(mutation).await?.into_parts();
        let mut report = report.with_story(story);
        if let Some(warning) = warning {
            report.warn(warning);
        }
        Ok(report)
    }

    async fn run_characters(
        &self,
        story_id: StoryId,
        progress: &mut ProgressEmitter<'_>,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        // analyzing
        let story = self.load(story_id).await?;
        checkpoint(cancel, "analyzing")?;
        progress.step("analyzing", 10, "Analyzing story content");

        let request = CharacterRequest {
            story_id,
            theme: story.theme,
            story_text: story.text.clone(),
        };
        let mut report = WorkflowReport::new(story, Some(GenerationKind::Characters));

        // generating
        checkpoint(cancel, "generating")?;
        progress.step("generating", 40, "Generating characters");
        let drafts: Vec<CharacterDraft> = match self.characters.run(&request, cancel).await? {
            ChainOutcome::Delivered {
                provider,
                output,
                failures,
            } => {
                report.record_failures(&failures);
                debug!(provider = %provider, count = output.len(), "Characters delivered");
                output
            }
            ChainOutcome::Exhausted { failures } => {
                report.record_failures(&failures);
                if !failures.is_empty() {
                    report.warn(Warning::new(
                        WarningSource::Provider,
                        format!("All {} character providers failed", failures.len()),
                    ));
                }
                warn!(theme = %request.theme, "Using template characters");
                report.warn(Warning::new(
                    WarningSource::Fallback,
                    format!("Used the {} template cast", request.theme),
                ));
                report.mark_fallback();
                request.theme.character_templates()
            }
        };
        progress.step(
            "generating",
            70,
            format!("{} characters generated", drafts.len()),
        );

        // persisting
        checkpoint(cancel, "persisting")?;
        let characters = drafts
            .into_iter()
            .map(|draft| draft.into_character(story_id))
            .collect();
        let report = self
            .commit(
                report,
                StoryMutation::AttachCharacters {
                    story_id,
                    characters,
                },
            )
            .await?;

        progress.complete("complete", "Characters ready");
        info!(
            characters = report.story().characters.len(),
            used_fallback = report.used_fallback(),
            "Character generation complete"
        );
        Ok(report)
    }

    fn video_request(&self, story: &Story) -> VideoRequest {
        let (scenes, target_duration_secs) = if story.segments.is_empty() {
            let target = story.length.target_duration_secs();
            (
                vec![VideoScene::from(&Segment::synthetic(&story.text, target))],
                target,
            )
        } else {
            (
                story.segments.iter().map(VideoScene::from).collect(),
                story
                    .segments
                    .iter()
                    .fold(0u32, |total, s| total.saturating_add(s.duration_secs)),
            )
        };

        VideoRequest {
            scenes,
            characters: story.characters.iter().map(CharacterRef::from).collect(),
            target_duration_secs,
            aspect_ratio: self.settings.aspect_ratio().clone(),
            style: self.settings.style_for(story.theme),
        }
    }

    fn placeholder_video(&self, story_id: StoryId) -> Video {
        let fallback = self.settings.fallback_video();
        let mut video = Video::new(story_id, VideoProviderKind::Placeholder, VideoStatus::Completed);
        video.url = Some(fallback.asset_url.clone());
        video.thumbnail_url = Some(fallback.thumbnail_url.clone());
        video.duration_secs = Some(fallback.duration_secs);
        video
    }

    async fn run_video(
        &self,
        story_id: StoryId,
        progress: &mut ProgressEmitter<'_>,
        cancel: &CancellationToken,
    ) -> FabulaResult<WorkflowReport> {
        // analyzing, preparing
        let story = self.load(story_id).await?;
        let request = self.video_request(&story);
        checkpoint(cancel, "preparing")?;
        progress.step(
            "preparing",
            75,
            format!(
                "Prepared {} scenes with {} characters",
                request.scenes.len(),
                request.characters.len()
            ),
        );
        let mut report = WorkflowReport::new(story, Some(GenerationKind::Video));

        // generating
        checkpoint(cancel, "generating")?;
        progress.step("generating", 90, "Generating video");
        let video = match self.video.run(&request, cancel).await? {
            ChainOutcome::Delivered {
                provider,
                output,
                failures,
            } => {
                report.record_failures(&failures);
                debug!(provider = %provider, "Video delivered");
                video_from_response(story_id, output, request.target_duration_secs)
            }
            ChainOutcome::Exhausted { failures } => {
                report.record_failures(&failures);
                if !failures.is_empty() {
                    report.warn(Warning::new(
                        WarningSource::Provider,
                        format!("All {} video providers failed", failures.len()),
                    ));
                }
                warn!("Using placeholder video");
                report.warn(Warning::new(WarningSource::Fallback, "Used the placeholder video"));
                report.mark_fallback();
                self.placeholder_video(story_id)
            }
        };

        // persisting
        checkpoint(cancel, "persisting")?;
        let report = self
            .commit(report, StoryMutation::AttachVideo(video))
            .await?;

        progress.complete("complete", "Video ready");
        info!(used_fallback = report.used_fallback(), "Video generation complete");
        Ok(report)
    }
}

fn video_from_response(story_id: StoryId, response: VideoResponse, target_secs: u32) -> Video {
    let mut video = Video::new(story_id, response.provider, VideoStatus::Completed);
    video.url = response.asset_url;
    video.thumbnail_url = response.thumbnail_url;
    video.duration_secs = response.duration_secs.or(Some(target_secs));
    video
}
