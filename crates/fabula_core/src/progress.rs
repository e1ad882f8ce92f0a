//! Progress events emitted by workflow invocations.

use serde::{Deserialize, Serialize};

/// One step of an invocation's progress stream.
///
/// Within an invocation `percent` never decreases and `is_complete` is true
/// on the final event only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Short step label, e.g. "analyzing"
    pub label: String,
    /// 0 to 100
    pub percent: u8,
    /// Human-readable message
    pub message: String,
    /// True on the terminal event
    pub is_complete: bool,
}

impl ProgressEvent {
    /// A non-terminal step.
    pub fn step(label: impl Into<String>, percent: u8, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            percent: percent.min(100),
            message: message.into(),
            is_complete: false,
        }
    }

    /// The terminal event, always at 100%.
    pub fn complete(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            percent: 100,
            message: message.into(),
            is_complete: true,
        }
    }
}
