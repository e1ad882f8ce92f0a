//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fabula - carry a story from text to video
#[derive(Parser, Debug)]
#[command(name = "fabula")]
#[command(about = "Carry a story from text to video with AI providers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the production stage of a story
    Classify {
        /// Path to the story JSON file
        story: PathBuf,
    },

    /// Run generation on a story and print the result
    Generate {
        /// Path to the story JSON file
        story: PathBuf,

        /// Which generation to run
        #[arg(long, value_enum, default_value = "advance")]
        kind: GenerateKind,

        /// Use template characters and the placeholder video only
        #[arg(long)]
        offline: bool,
    },

    /// Print the template characters for a theme
    Templates {
        /// Theme name (fantasy, sci-fi, mystery, romance, adventure, horror)
        theme: String,
    },
}

/// What `generate` runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateKind {
    /// Whatever the story's stage calls for
    Advance,
    /// Character generation
    Characters,
    /// Video generation
    Video,
}
