//! Ordered attempt-until-success invocation of interchangeable providers.

use fabula_core::CharacterDraft;
use fabula_error::{
    FabulaError, FabulaErrorKind, FabulaResult, ProviderError, ProviderErrorKind, WorkflowError,
};
use fabula_interface::{
    CharacterRequest, Deliverable, GenerationProvider, VideoRequest, VideoResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Result of one traversal of a fallback chain.
///
/// Exhaustion is an ordinary outcome, not an error.
#[derive(Debug)]
pub enum ChainOutcome<Out> {
    /// A provider delivered
    Delivered {
        /// Name of the delivering provider
        provider: String,
        /// What it delivered
        output: Out,
        /// Failures of the providers tried before it
        failures: Vec<ProviderError>,
    },
    /// Every provider failed, or none is configured
    Exhausted {
        /// One failure per provider, in priority order
        failures: Vec<ProviderError>,
    },
}

impl<Out> ChainOutcome<Out> {
    /// Failures recorded during the traversal.
    pub fn failures(&self) -> &[ProviderError] {
        match self {
            ChainOutcome::Delivered { failures, .. } | ChainOutcome::Exhausted { failures } => {
                failures
            }
        }
    }

    /// Whether every provider failed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ChainOutcome::Exhausted { .. })
    }
}

/// Providers for one generation kind, tried in fixed priority order.
///
/// Each call is bounded by the chain's timeout; a timeout is a failure like
/// any other. No provider is retried within one traversal.
pub struct FallbackChain<Req, Out> {
    kind: &'static str,
    providers: Vec<Arc<dyn GenerationProvider<Request = Req, Output = Out>>>,
    timeout: Duration,
}

/// Chain of character providers.
pub type CharacterChain = FallbackChain<CharacterRequest, Vec<CharacterDraft>>;

/// Chain of video providers.
pub type VideoChain = FallbackChain<VideoRequest, VideoResponse>;

impl<Req, Out> std::fmt::Debug for FallbackChain<Req, Out>
where
    Req: Send + Sync + 'static,
    Out: Deliverable + Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("kind", &self.kind)
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<Req, Out> FallbackChain<Req, Out>
where
    Req: Send + Sync + 'static,
    Out: Deliverable + Send + 'static,
{
    /// Create an empty chain for `kind` ("characters", "video").
    pub fn new(kind: &'static str, timeout: Duration) -> Self {
        Self {
            kind,
            providers: Vec::new(),
            timeout,
        }
    }

    /// Append a provider at the lowest priority.
    pub fn with_provider(
        mut self,
        provider: Arc<dyn GenerationProvider<Request = Req, Output = Out>>,
    ) -> Self {
        self.providers.push(provider);
        self
    }

    /// Append a provider at the lowest priority.
    pub fn push(&mut self, provider: Arc<dyn GenerationProvider<Request = Req, Output = Out>>) {
        self.providers.push(provider);
    }

    /// Number of configured providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is configured.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Try each provider in order and return the first deliverable result.
    ///
    /// # Errors
    ///
    /// Only cancellation is an error. Provider failures, timeouts, and
    /// undeliverable results are recorded and the next provider is tried.
    #[instrument(skip(self, request, cancel), fields(kind = self.kind, providers = self.providers.len()))]
    pub async fn run(
        &self,
        request: &Req,
        cancel: &CancellationToken,
    ) -> FabulaResult<ChainOutcome<Out>> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            if cancel.is_cancelled() {
                return Err(WorkflowError::cancelled(format!("{} provider '{}'", self.kind, name)).into());
            }

            debug!(provider = name, "Calling provider");
            let attempt = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(WorkflowError::cancelled(format!("{} provider '{}'", self.kind, name)).into());
                }
                attempt = tokio::time::timeout(self.timeout, provider.generate(request)) => attempt,
            };

            let failure = match attempt {
                Ok(Ok(output)) => match output.undeliverable_reason() {
                    None => {
                        info!(provider = name, tried = failures.len() + 1, "Provider delivered");
                        return Ok(ChainOutcome::Delivered {
                            provider: name.to_string(),
                            output,
                            failures,
                        });
                    }
                    Some(reason) => ProviderError::new(ProviderErrorKind::Undeliverable {
                        provider: name.to_string(),
                        reason,
                    }),
                },
                Ok(Err(err)) => into_provider_error(name, err),
                Err(_) => ProviderError::new(ProviderErrorKind::Timeout {
                    provider: name.to_string(),
                    millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };

            warn!(provider = name, error = %failure.kind, "Provider failed, trying next");
            failures.push(failure);
        }

        warn!(failures = failures.len(), "All providers failed");
        Ok(ChainOutcome::Exhausted { failures })
    }
}

fn into_provider_error(provider: &str, err: FabulaError) -> ProviderError {
    match err.kind() {
        FabulaErrorKind::Provider(inner) => inner.clone(),
        other => ProviderError::new(ProviderErrorKind::Failed {
            provider: provider.to_string(),
            message: other.to_string(),
        }),
    }
}
