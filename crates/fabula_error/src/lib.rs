//! Error types for Fabula.
//!
//! This crate provides the foundation error types used throughout the Fabula workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The categories mirror how the workflow engine treats failures:
//! - [`PreconditionError`] and [`ValidationError`] are fatal and reach the caller
//! - [`ProviderError`] is absorbed by the provider fallback chain
//! - [`PersistenceError`] is degraded to a warning for writes, propagated for
//!   deletes and refetches
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, PreconditionError, PreconditionErrorKind};
//!
//! fn load_story(id: &str) -> FabulaResult<String> {
//!     Err(PreconditionError::new(PreconditionErrorKind::StoryNotFound(id.to_string())))?
//! }
//!
//! assert!(load_story("missing").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod io;
mod json;
mod persistence;
mod precondition;
mod provider;
mod validation;
mod workflow;

pub use config::ConfigError;
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use http::HttpError;
pub use io::IoError;
pub use json::JsonError;
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use precondition::{PreconditionError, PreconditionErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
