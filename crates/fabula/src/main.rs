//! Fabula CLI binary.
//!
//! This binary provides command-line access to Fabula's functionality:
//! - Classify a story file
//! - Run character or video generation against a story file
//! - Show the template cast for a theme

use clap::Parser;
use fabula::{TracingConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, classify_story, generate, show_templates};

    // Load .env before anything reads provider keys
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_tracing(TracingConfig::new(log_level))?;

    match cli.command {
        Commands::Classify { story } => classify_story(&story)?,
        Commands::Generate {
            story,
            kind,
            offline,
        } => generate(&story, kind, offline).await?,
        Commands::Templates { theme } => show_templates(&theme)?,
    }

    Ok(())
}
