//! Validation error types.

/// Malformed generation requests, rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Theme name was empty
    #[display("Theme cannot be empty")]
    EmptyTheme,
    /// Theme name is not one of the known themes
    #[display("Unknown theme: {}", _0)]
    UnknownTheme(String),
    /// Length name is not one of the known lengths
    #[display("Unknown story length: {}", _0)]
    UnknownLength(String),
    /// Story title was empty or whitespace
    #[display("Story title cannot be empty")]
    EmptyTitle,
    /// Story text was empty or whitespace
    #[display("Story text cannot be empty")]
    EmptyText,
    /// Story text is too short to generate from
    #[display("Story text has {} characters, more than {} are needed", actual, required)]
    TextTooShort {
        /// Characters present
        actual: usize,
        /// Characters required (exclusive lower bound)
        required: usize,
    },
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::EmptyTheme);
/// assert!(format!("{}", err).contains("Theme cannot be empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific error condition
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
