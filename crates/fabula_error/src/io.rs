//! File access errors.

/// A story or configuration file could not be read.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("IO Error: {} ({}) at line {} in {}", path, message, line, file)]
pub struct IoError {
    /// Path that was being accessed
    pub path: String,
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IoError {
    /// Create a new IoError for `path` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_error::IoError;
    ///
    /// let err = IoError::new("story.json", "No such file or directory");
    /// assert!(err.to_string().contains("story.json"));
    /// ```
    #[track_caller]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
