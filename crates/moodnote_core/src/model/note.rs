//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its validation rules.
//! - Own identity and creation-time assignment.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once and never mutated by edits.
//! - Persisted notes have non-blank `title` and `body`.

use crate::model::mood::Mood;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every note.
pub type NoteId = Uuid;

/// Validation failures for note write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyBody,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyBody => write!(f, "note body must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Free text used as mood detection input.
    pub body: String,
    pub mood: Mood,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a new note with a generated id, current timestamp and
    /// `Mood::Neutral`.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, body, now_epoch_ms())
    }

    /// Creates a note with caller-provided identity and creation time.
    ///
    /// Used by storage read paths and imports.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            mood: Mood::default(),
            created_at,
        }
    }

    /// Checks the persistence invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(NoteValidationError::EmptyBody);
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use crate::model::mood::Mood;

    #[test]
    fn new_note_defaults_to_neutral_mood() {
        let note = Note::new("title", "body");
        assert_eq!(note.mood, Mood::Neutral);
        assert!(note.created_at > 0);
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert_eq!(
            Note::new("  ", "body").validate(),
            Err(NoteValidationError::EmptyTitle)
        );
        assert_eq!(
            Note::new("title", "").validate(),
            Err(NoteValidationError::EmptyBody)
        );
        assert!(Note::new("title", "body").validate().is_ok());
    }
}
