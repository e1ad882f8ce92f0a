//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fabula binary.

mod classify;
mod commands;
mod generate;
mod templates;

pub use classify::classify_story;
pub use commands::{Cli, Commands};
pub use generate::generate;
pub use templates::show_templates;
