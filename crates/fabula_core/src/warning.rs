//! Non-fatal warnings surfaced alongside successful operations.

use serde::{Deserialize, Serialize};

/// Where a warning came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WarningSource {
    /// A generation provider failed and was skipped
    Provider,
    /// The remote store rejected a write that was kept locally
    Persistence,
    /// A terminal fallback result was used
    Fallback,
}

/// An error surfaced without aborting the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("[{}] {}", source, message)]
pub struct Warning {
    /// Origin of the warning
    pub source: WarningSource,
    /// Human-readable detail
    pub message: String,
}

impl Warning {
    /// Create a warning.
    pub fn new(source: WarningSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}
