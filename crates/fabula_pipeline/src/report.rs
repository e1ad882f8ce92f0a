//! What a workflow invocation produced.

use derive_getters::Getters;
use fabula_core::{StageDescriptor, Story, Warning, classify};
use fabula_error::ProviderError;
use serde::{Deserialize, Serialize};

/// Which generation an invocation ran.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GenerationKind {
    /// Character extraction
    Characters,
    /// Video generation
    Video,
}

/// Outcome of one orchestrator invocation.
#[derive(Debug, Clone, Getters)]
pub struct WorkflowReport {
    /// The story after the invocation
    story: Story,
    /// Where the story now stands
    stage: StageDescriptor,
    /// The generation that ran, if any
    generated: Option<GenerationKind>,
    /// Absorbed failures worth surfacing
    warnings: Vec<Warning>,
    /// Provider failures recorded by the fallback chain, in order
    provider_failures: Vec<ProviderError>,
    /// Whether a terminal fallback (templates or placeholder video) was used
    used_fallback: bool,
}

impl WorkflowReport {
    pub(crate) fn new(story: Story, generated: Option<GenerationKind>) -> Self {
        Self {
            stage: classify(&story),
            story,
            generated,
            warnings: Vec::new(),
            provider_failures: Vec::new(),
            used_fallback: false,
        }
    }

    pub(crate) fn with_story(mut self, story: Story) -> Self {
        self.stage = classify(&story);
        self.story = story;
        self
    }

    pub(crate) fn record_failures(&mut self, failures: &[ProviderError]) {
        self.provider_failures.extend_from_slice(failures);
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub(crate) fn mark_fallback(&mut self) {
        self.used_fallback = true;
    }
}
