//! Generation provider error types.

/// Transient failures of a single generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The provider call returned an error
    #[display("Provider '{}' failed: {}", provider, message)]
    Failed {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
    /// The provider call exceeded its time budget
    #[display("Provider '{}' timed out after {}ms", provider, millis)]
    Timeout {
        /// Provider name
        provider: String,
        /// Timeout that elapsed, in milliseconds
        millis: u64,
    },
    /// The provider answered, but with nothing usable
    #[display("Provider '{}' returned an undeliverable result: {}", provider, reason)]
    Undeliverable {
        /// Provider name
        provider: String,
        /// Why the result was rejected
        reason: String,
    },
    /// The provider rejected the request with an HTTP status
    #[display("Provider '{}' rejected request with HTTP {}: {}", provider, status_code, message)]
    Rejected {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
}

impl ProviderErrorKind {
    /// Name of the provider that failed.
    pub fn provider(&self) -> &str {
        match self {
            ProviderErrorKind::Failed { provider, .. }
            | ProviderErrorKind::Timeout { provider, .. }
            | ProviderErrorKind::Undeliverable { provider, .. }
            | ProviderErrorKind::Rejected { provider, .. } => provider,
        }
    }

    /// Whether this failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderErrorKind::Timeout { .. })
    }
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Timeout {
///     provider: "runway".to_string(),
///     millis: 30_000,
/// });
/// assert!(err.kind.is_timeout());
/// assert_eq!(err.kind.provider(), "runway");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
