//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/delete/get/list APIs.
//! - Attach a resolved mood to notes before persisting them.
//! - Republish the full note list after every successful write.
//!
//! # Invariants
//! - Notes are validated before any mood resolution is attempted.
//! - Blank text never triggers mood resolution; it stays `neutral`.
//! - Editing re-derives `mood` only when `body` changes.
//! - `created_at` is preserved across edits.
//! - A committed write is reported as success even when the feed refresh
//!   fails; the refresh failure is logged and the feed keeps its last value.

use crate::model::mood::Mood;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::mood::aggregate::{summarize, MoodSummary};
use crate::mood::resolver::MoodResolver;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::service::note_feed::NoteFeed;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::watch;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Validation(NoteValidationError),
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over a repository, a mood resolver and a list feed.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    resolver: Arc<MoodResolver>,
    feed: NoteFeed,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R, resolver: Arc<MoodResolver>, feed: NoteFeed) -> Self {
        Self {
            repo,
            resolver,
            feed,
        }
    }

    /// Detects the mood of draft text.
    ///
    /// Blank text short-circuits to `Mood::Neutral` without consulting the
    /// resolver.
    pub async fn detect_mood(&self, text: &str) -> Mood {
        if text.trim().is_empty() {
            return Mood::Neutral;
        }
        self.resolver.resolve(text).await
    }

    /// Creates a note, resolving its mood from `body`.
    pub async fn create_note(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let mut note = Note::new(title, body);
        note.validate()?;
        note.mood = self.detect_mood(&note.body).await;

        self.repo.insert_note(&note)?;
        info!(
            "event=note_create module=service status=ok note_id={} mood={}",
            note.id, note.mood
        );
        self.publish("note_create");
        Ok(note)
    }

    /// Replaces title and body of an existing note.
    pub async fn update_note(
        &self,
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let existing = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))?;

        let mut updated = existing.clone();
        updated.title = title.into();
        updated.body = body.into();
        updated.validate()?;
        if updated.body != existing.body {
            updated.mood = self.detect_mood(&updated.body).await;
        }

        self.repo.update_note(&updated)?;
        info!(
            "event=note_update module=service status=ok note_id={} mood={} body_changed={}",
            updated.id,
            updated.mood,
            updated.body != existing.body
        );
        self.publish("note_update");
        Ok(updated)
    }

    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        self.publish("note_delete");
        Ok(())
    }

    /// Deletes every note and returns the number removed.
    pub fn delete_all_notes(&self) -> Result<usize, NoteServiceError> {
        let removed = self.repo.delete_all_notes()?;
        info!("event=note_delete_all module=service status=ok removed={removed}");
        self.publish("note_delete_all");
        Ok(removed)
    }

    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>, NoteServiceError> {
        Ok(self.repo.get_note(id)?)
    }

    /// Lists notes, newest first.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes()?)
    }

    /// Builds the mood dashboard summary from the current collection.
    pub fn mood_summary(&self) -> Result<MoodSummary, NoteServiceError> {
        let notes = self.repo.list_notes()?;
        Ok(summarize(&notes))
    }

    /// Subscribes to the note list, primed with the current collection.
    pub fn subscribe(&self) -> Result<watch::Receiver<Vec<Note>>, NoteServiceError> {
        self.feed.publish(self.repo.list_notes()?);
        Ok(self.feed.subscribe())
    }

    fn publish(&self, event: &str) {
        match self.repo.list_notes() {
            Ok(notes) => self.feed.publish(notes),
            Err(err) => warn!(
                "event={event} module=service status=degraded reason=feed_refresh_failed error={err}"
            ),
        }
    }
}
