//! Scene segment descriptors.

use serde::{Deserialize, Serialize};

/// One scene of a story, as handed to video providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position in the story
    pub index: u32,
    /// What happens in the scene
    pub description: String,
    /// Scene duration in seconds
    pub duration_secs: u32,
    /// Prompt describing the visuals
    pub visual_prompt: String,
}

impl Segment {
    /// Longest description carried over from body text into a synthetic scene.
    pub const SYNTHETIC_DESCRIPTION_CHARS: usize = 500;

    /// Build the single scene used when a story has no segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::Segment;
    ///
    /// let scene = Segment::synthetic("A storm gathers over the harbor.", 30);
    /// assert_eq!(scene.index, 0);
    /// assert_eq!(scene.duration_secs, 30);
    /// assert!(scene.visual_prompt.contains("storm"));
    /// ```
    pub fn synthetic(text: &str, duration_secs: u32) -> Self {
        let description: String = text
            .trim()
            .chars()
            .take(Self::SYNTHETIC_DESCRIPTION_CHARS)
            .collect();
        Self {
            index: 0,
            visual_prompt: description.clone(),
            description,
            duration_secs,
        }
    }
}
