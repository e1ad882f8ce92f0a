//! Reading stories from JSON files.

use fabula_core::Story;
use fabula_error::{FabulaResult, IoError, JsonError, ValidationError, ValidationErrorKind};
use std::path::Path;
use tracing::{debug, instrument};

/// Read a story from a JSON file.
///
/// # Errors
///
/// Returns an IO error when the file cannot be read, a JSON error when it
/// does not decode, or a validation error when the title is empty.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_story(path: impl AsRef<Path>) -> FabulaResult<Story> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| IoError::new(path.display().to_string(), e.to_string()))?;
    let story: Story = serde_json::from_str(&raw).map_err(|e| {
        JsonError::new(format!("Failed to parse story from {}: {}", path.display(), e))
    })?;
    if story.title.trim().is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::EmptyTitle).into());
    }
    debug!(story_id = %story.id, "Story loaded");
    Ok(story)
}
