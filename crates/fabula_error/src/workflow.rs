//! Workflow control error types.

/// Conditions that stop a workflow invocation part way through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// The caller cancelled the invocation
    #[display("Workflow cancelled during {}", _0)]
    Cancelled(String),
}

/// Workflow error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The kind of error that occurred
    pub kind: WorkflowErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new workflow error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a cancellation observed at `step`.
    #[track_caller]
    pub fn cancelled(step: impl Into<String>) -> Self {
        Self::new(WorkflowErrorKind::Cancelled(step.into()))
    }
}
