//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide composition root: database path, mood resolver
//!   and async runtime live here, not in core.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in response envelopes, never thrown.
//! - Functions without `frb(sync)` may block on network I/O and run on the
//!   FRB worker pool, off the UI thread.

use log::{error, warn};
use moodnote_core::db::open_db;
use moodnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    summarize, LocalMoodClassifier, Mood, MoodConfig, MoodResolver, Note, NoteFeed, NoteService,
    OfflineClassifier, PreferenceRepository, SqliteNoteRepository, SqlitePreferenceRepository,
};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tokio::runtime::Runtime;
use uuid::Uuid;

const APP_DB_FILE_NAME: &str = "moodnote_app.sqlite3";
static APP_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static MOOD_RESOLVER: OnceLock<Arc<MoodResolver>> = OnceLock::new();
static NOTE_FEED: OnceLock<NoteFeed> = OnceLock::new();
static RUNTIME: OnceLock<Result<Runtime, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the note database location for this process.
///
/// # FFI contract
/// - Sync call; must run before the first note/profile call.
/// - Repeating the same path is accepted; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = APP_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Note projection sent to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub note_id: String,
    pub title: String,
    pub body: String,
    /// Lower-case mood label.
    pub mood: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Action response envelope for note writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Note after the write, when one exists.
    pub note: Option<NoteItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            note,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// Newest first.
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// One dashboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCountItem {
    pub mood: String,
    pub count: u32,
}

/// Dashboard response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodStatsResponse {
    pub total: u32,
    pub counts: Vec<MoodCountItem>,
    pub dominant: Option<String>,
    pub message: String,
}

/// Profile response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub user_name: Option<String>,
    pub is_first_run: bool,
    pub message: String,
}

/// Detects the mood of draft text while the user is typing.
///
/// # FFI contract
/// - May wait on the remote classifier; runs on the worker pool.
/// - Blank text returns `neutral` without any classification work.
/// - Never fails; always returns a lower-case mood label.
pub fn mood_detect(text: String) -> String {
    if text.trim().is_empty() {
        return Mood::Neutral.as_str().to_string();
    }
    let mood = match runtime() {
        Ok(runtime) => runtime.block_on(mood_resolver().resolve(&text)),
        Err(err) => {
            warn!("event=mood_detect module=ffi status=degraded reason=runtime error={err}");
            LocalMoodClassifier::new().classify(&text)
        }
    };
    mood.as_str().to_string()
}

/// Creates a note and attaches its detected mood.
///
/// # FFI contract
/// - Validation errors (blank title/body) are returned with `ok=false`.
pub fn note_create(title: String, body: String) -> NoteActionResponse {
    let result = with_note_service(|service, runtime| {
        runtime
            .block_on(service.create_note(title, body))
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(note) => NoteActionResponse::success("Note created.", Some(to_note_item(&note))),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Replaces title and body of an existing note.
///
/// # FFI contract
/// - Mood is re-detected only when the body changed.
pub fn note_update(note_id: String, title: String, body: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(err) => return NoteActionResponse::failure(format!("note_update failed: {err}")),
    };
    let result = with_note_service(|service, runtime| {
        runtime
            .block_on(service.update_note(id, title, body))
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(note) => NoteActionResponse::success("Note updated.", Some(to_note_item(&note))),
        Err(err) => NoteActionResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Deletes one note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(err) => return NoteActionResponse::failure(format!("note_delete failed: {err}")),
    };
    match with_note_service(|service, _| service.delete_note(id).map_err(|err| err.to_string())) {
        Ok(()) => NoteActionResponse::success("Note deleted.", None),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Lists all notes, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match with_note_service(|service, _| service.list_notes().map_err(|err| err.to_string())) {
        Ok(notes) => {
            let message = if notes.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", notes.len())
            };
            NotesListResponse {
                items: notes.iter().map(to_note_item).collect(),
                message,
            }
        }
        Err(err) => NotesListResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Returns the note list as last published by a write in this process.
///
/// # FFI contract
/// - Sync call; never touches the database.
/// - Empty until the first note write of the process.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_snapshot() -> Vec<NoteItem> {
    note_feed().current().iter().map(to_note_item).collect()
}

/// Builds per-mood statistics for the dashboard.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_stats() -> MoodStatsResponse {
    match with_note_service(|service, _| service.list_notes().map_err(|err| err.to_string())) {
        Ok(notes) => {
            let summary = summarize(&notes);
            MoodStatsResponse {
                total: saturating_u32(summary.total),
                counts: summary
                    .counts
                    .iter()
                    .map(|entry| MoodCountItem {
                        mood: entry.mood.as_str().to_string(),
                        count: saturating_u32(entry.count),
                    })
                    .collect(),
                dominant: summary.dominant.map(|mood| mood.as_str().to_string()),
                message: String::new(),
            }
        }
        Err(err) => MoodStatsResponse {
            total: 0,
            counts: Vec::new(),
            dominant: None,
            message: format!("mood_stats failed: {err}"),
        },
    }
}

/// Reads display name and first-run flag.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileResponse {
    let result = with_preferences(|prefs| {
        Ok((
            prefs.display_name().map_err(|err| err.to_string())?,
            prefs.is_first_run().map_err(|err| err.to_string())?,
        ))
    });
    match result {
        Ok((user_name, is_first_run)) => ProfileResponse {
            user_name,
            is_first_run,
            message: String::new(),
        },
        Err(err) => ProfileResponse {
            user_name: None,
            is_first_run: true,
            message: format!("profile_get failed: {err}"),
        },
    }
}

/// Saves the display name and marks onboarding complete.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_save_name(name: String) -> String {
    match with_preferences(|prefs| {
        prefs
            .save_display_name(name.as_str())
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => String::new(),
        Err(err) => format!("profile_save_name failed: {err}"),
    }
}

/// Clears the display name and restores the first-run flag.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_clear() -> String {
    match with_preferences(|prefs| prefs.clear_display_name().map_err(|err| err.to_string())) {
        Ok(()) => String::new(),
        Err(err) => format!("profile_clear failed: {err}"),
    }
}

fn resolve_app_db_path() -> PathBuf {
    APP_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MOODNOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(APP_DB_FILE_NAME)
        })
        .clone()
}

fn mood_resolver() -> Arc<MoodResolver> {
    MOOD_RESOLVER
        .get_or_init(|| {
            let resolver = MoodConfig::from_env()
                .map_err(|err| err.to_string())
                .and_then(|config| {
                    MoodResolver::from_config(&config).map_err(|err| err.to_string())
                });
            match resolver {
                Ok(resolver) => Arc::new(resolver),
                Err(err) => {
                    error!(
                        "event=mood_resolver_init module=ffi status=error fallback=offline error={err}"
                    );
                    Arc::new(MoodResolver::new(Arc::new(OfflineClassifier)))
                }
            }
        })
        .clone()
}

fn note_feed() -> &'static NoteFeed {
    NOTE_FEED.get_or_init(NoteFeed::default)
}

fn runtime() -> Result<&'static Runtime, String> {
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .map_err(|err| format!("failed to start async runtime: {err}"))
        })
        .as_ref()
        .map_err(Clone::clone)
}

fn with_note_service<T>(
    f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>, &Runtime) -> Result<T, String>,
) -> Result<T, String> {
    let runtime = runtime()?;
    let conn = open_db(resolve_app_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&conn)
        .map_err(|err| format!("note repo init failed: {err}"))?;
    let service = NoteService::new(repo, mood_resolver(), note_feed().clone());
    f(&service, runtime)
}

fn with_preferences<T>(
    f: impl FnOnce(&mut SqlitePreferenceRepository<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let mut conn =
        open_db(resolve_app_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let mut prefs = SqlitePreferenceRepository::try_new(&mut conn)
        .map_err(|err| format!("preference repo init failed: {err}"))?;
    f(&mut prefs)
}

fn parse_note_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid note id `{value}`"))
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        note_id: note.id.to_string(),
        title: note.title.clone(),
        body: note.body.clone(),
        mood: note.mood.as_str().to_string(),
        created_at: note.created_at,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, mood_detect, mood_stats, note_create, note_delete,
        note_update, notes_list, notes_snapshot, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn mood_detect_returns_neutral_for_blank_text() {
        assert_eq!(mood_detect("   ".to_string()), "neutral");
    }

    #[test]
    fn note_create_rejects_blank_body() {
        let response = note_create("title".to_string(), String::new());
        assert!(!response.ok);
        assert!(response.message.contains("body"));
    }

    #[test]
    fn created_note_is_listed_updated_and_counted() {
        let token = unique_token("ffi-note");
        let created = note_create(token.clone(), format!("{token} first draft"));
        assert!(created.ok, "{}", created.message);
        let note = created.note.expect("created note should be returned");

        let listed = notes_list();
        assert!(listed.items.iter().any(|item| item.note_id == note.note_id));
        assert!(notes_snapshot()
            .iter()
            .any(|item| item.note_id == note.note_id));

        let updated = note_update(note.note_id.clone(), token.clone(), note.body.clone());
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.note.expect("updated note").mood, note.mood);

        let stats = mood_stats();
        assert!(stats.message.is_empty(), "{}", stats.message);
        assert!(stats.total >= 1);
        assert_eq!(
            stats.counts.iter().map(|entry| entry.count).sum::<u32>(),
            stats.total
        );

        let deleted = note_delete(note.note_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!notes_list()
            .items
            .iter()
            .any(|item| item.note_id == note.note_id));
        assert!(!notes_snapshot()
            .iter()
            .any(|item| item.note_id == note.note_id));
    }

    #[test]
    fn note_update_rejects_malformed_id() {
        let response = note_update("not-a-uuid".to_string(), "t".to_string(), "b".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid note id"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
