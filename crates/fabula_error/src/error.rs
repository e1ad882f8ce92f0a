//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, IoError, JsonError, PersistenceError, PreconditionError,
    ProviderError, ValidationError, WorkflowError,
};

/// Every error category the workspace can produce.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FabulaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// File read failure
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Missing story or malformed id
    #[from(PreconditionError)]
    Precondition(PreconditionError),
    /// Malformed generation request
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Generation provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Repository failure
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Workflow interrupted
    #[from(WorkflowError)]
    Workflow(WorkflowError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, FabulaErrorKind, FabulaResult, ValidationError, ValidationErrorKind};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(ValidationError::new(ValidationErrorKind::EmptyText))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(err.is_validation());
/// assert!(matches!(err.kind(), FabulaErrorKind::Validation(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }

    /// Whether this is a precondition failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Precondition(_))
    }

    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Validation(_))
    }

    /// Whether this is a configuration failure.
    pub fn is_config(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Config(_))
    }

    /// Whether a file could not be read.
    pub fn is_io(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Io(_))
    }

    /// Whether this is a persistence failure.
    pub fn is_persistence(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Persistence(_))
    }

    /// Whether the workflow was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), FabulaErrorKind::Workflow(_))
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
