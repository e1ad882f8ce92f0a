//! Classify command handler.

use fabula::{FabulaResult, JsonError, classify, read_story};
use std::path::Path;

/// Print the stage descriptor of a story file as JSON.
pub fn classify_story(path: &Path) -> FabulaResult<()> {
    let story = read_story(path)?;
    let descriptor = classify(&story);
    let json = serde_json::to_string_pretty(&descriptor)
        .map_err(|e| JsonError::new(format!("Failed to serialize descriptor: {}", e)))?;
    println!("{}", json);
    Ok(())
}
