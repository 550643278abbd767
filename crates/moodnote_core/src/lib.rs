//! Core domain logic for MoodNote.
//! Notes, mood detection and mood statistics live here; UI layers call in
//! through `moodnote_ffi` or the `moodnote` CLI.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod mood;
pub mod repo;
pub mod service;

pub use config::{ConfigError, MoodConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::mood::{Mood, UnknownMoodError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use mood::aggregate::{aggregate, summarize, MoodCount, MoodSummary};
pub use mood::cache::MoodCache;
pub use mood::local::LocalMoodClassifier;
pub use mood::remote::{HttpMoodClassifier, MoodClassifier, OfflineClassifier, Unavailable};
pub use mood::resolver::{MoodResolver, MoodSource};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use repo::preference_repo::{PreferenceRepository, SqlitePreferenceRepository};
pub use service::note_feed::NoteFeed;
pub use service::note_service::{NoteService, NoteServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
