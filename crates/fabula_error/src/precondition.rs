//! Precondition error types.

/// Conditions that make a workflow invocation impossible before it starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PreconditionErrorKind {
    /// No story with this id is known
    #[display("Story not found: {}", _0)]
    StoryNotFound(String),
    /// The identifier could not be parsed
    #[display("Invalid story id '{}'", _0)]
    InvalidId(String),
}

/// Precondition error with location tracking.
///
/// Fatal: propagated to the caller with no partial state change.
///
/// # Examples
///
/// ```
/// use fabula_error::{PreconditionError, PreconditionErrorKind};
///
/// let err = PreconditionError::new(PreconditionErrorKind::InvalidId("abc".to_string()));
/// assert!(format!("{}", err).contains("Invalid story id"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Precondition Error: {} at line {} in {}", kind, line, file)]
pub struct PreconditionError {
    /// The kind of error that occurred
    pub kind: PreconditionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PreconditionError {
    /// Create a new precondition error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PreconditionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
