//! Persistence error types.

/// Failures talking to the persistent artifact repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// A create or update was not stored
    #[display("Remote write failed: {}", _0)]
    Write(String),
    /// A delete was not applied
    #[display("Remote delete failed: {}", _0)]
    Delete(String),
    /// A read or listing failed
    #[display("Remote read failed: {}", _0)]
    Read(String),
    /// The repository did not answer in time
    #[display("Repository call '{}' timed out after {}ms", operation, millis)]
    Timeout {
        /// Repository operation name
        operation: String,
        /// Timeout that elapsed, in milliseconds
        millis: u64,
    },
    /// The repository cannot be reached at all
    #[display("Repository unavailable: {}", _0)]
    Unavailable(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::Unavailable("offline".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
