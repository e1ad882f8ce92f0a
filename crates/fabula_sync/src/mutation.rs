//! Mutations the synchronizer can apply to a story.

use fabula_core::{Character, Segment, Story, StoryId, StoryLength, StoryStatus, Theme, Video};
use fabula_error::{FabulaResult, PreconditionError, PreconditionErrorKind};
use std::collections::HashMap;

/// Changes to a story's own fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryUpdate {
    /// New title
    pub title: Option<String>,
    /// New body text
    pub text: Option<String>,
    /// New theme
    pub theme: Option<Theme>,
    /// New length
    pub length: Option<StoryLength>,
    /// Replacement metadata
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A write against the story collection.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryMutation {
    /// Store a new story
    Create(Story),
    /// Change a story's own fields
    Update {
        /// Target story
        story_id: StoryId,
        /// Field changes
        update: StoryUpdate,
    },
    /// Append characters
    AttachCharacters {
        /// Target story
        story_id: StoryId,
        /// Characters, already owned by the story
        characters: Vec<Character>,
    },
    /// Replace all segments
    ReplaceSegments {
        /// Target story
        story_id: StoryId,
        /// New segments, in order
        segments: Vec<Segment>,
    },
    /// Append a video; the story becomes completed
    AttachVideo(Video),
    /// Change the lifecycle status
    SetStatus {
        /// Target story
        story_id: StoryId,
        /// New status
        status: StoryStatus,
    },
}

impl StoryMutation {
    /// The story this mutation targets.
    pub fn story_id(&self) -> StoryId {
        match self {
            StoryMutation::Create(story) => story.id,
            StoryMutation::AttachVideo(video) => video.story_id,
            StoryMutation::Update { story_id, .. }
            | StoryMutation::AttachCharacters { story_id, .. }
            | StoryMutation::ReplaceSegments { story_id, .. }
            | StoryMutation::SetStatus { story_id, .. } => *story_id,
        }
    }

    /// Short name used in logs and warnings.
    pub fn operation(&self) -> &'static str {
        match self {
            StoryMutation::Create(_) => "create story",
            StoryMutation::Update { .. } => "update story",
            StoryMutation::AttachCharacters { .. } => "attach characters",
            StoryMutation::ReplaceSegments { .. } => "replace segments",
            StoryMutation::AttachVideo(_) => "attach video",
            StoryMutation::SetStatus { .. } => "set status",
        }
    }

    fn apply_to(&self, story: &mut Story) {
        match self {
            StoryMutation::Create(new) => *story = new.clone(),
            StoryMutation::Update { update, .. } => {
                if let Some(title) = &update.title {
                    story.title = title.clone();
                }
                if let Some(text) = &update.text {
                    story.text = text.clone();
                }
                if let Some(theme) = update.theme {
                    story.theme = theme;
                }
                if let Some(length) = update.length {
                    story.length = length;
                }
                if let Some(metadata) = &update.metadata {
                    story.metadata = metadata.clone();
                }
            }
            StoryMutation::AttachCharacters { characters, .. } => {
                story.characters.extend(characters.iter().cloned());
            }
            StoryMutation::ReplaceSegments { segments, .. } => {
                story.segments = segments.clone();
            }
            StoryMutation::AttachVideo(video) => {
                story.videos.push(video.clone());
                story.status = StoryStatus::Completed;
            }
            StoryMutation::SetStatus { status, .. } => story.status = *status,
        }
    }

    /// The story as it will look after this mutation, without changing `stories`.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when a non-create mutation targets a
    /// story that is not in `stories`.
    pub fn preview(&self, stories: &HashMap<StoryId, Story>) -> FabulaResult<Story> {
        let mut story = match self {
            StoryMutation::Create(new) => new.clone(),
            _ => stories
                .get(&self.story_id())
                .cloned()
                .ok_or_else(|| not_found(self.story_id()))?,
        };
        if !matches!(self, StoryMutation::Create(_)) {
            self.apply_to(&mut story);
            story.touch();
        }
        Ok(story)
    }

    /// Apply this mutation to `stories` and return the resulting story.
    ///
    /// # Errors
    ///
    /// Returns a precondition error when a non-create mutation targets a
    /// story that is not in `stories`.
    pub fn apply_local(&self, stories: &mut HashMap<StoryId, Story>) -> FabulaResult<Story> {
        let id = self.story_id();
        match self {
            StoryMutation::Create(new) => {
                stories.insert(id, new.clone());
                Ok(new.clone())
            }
            _ => {
                let story = stories.get_mut(&id).ok_or_else(|| not_found(id))?;
                self.apply_to(story);
                story.touch();
                Ok(story.clone())
            }
        }
    }
}

fn not_found(id: StoryId) -> fabula_error::FabulaError {
    PreconditionError::new(PreconditionErrorKind::StoryNotFound(id.to_string())).into()
}
