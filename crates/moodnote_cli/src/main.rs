//! Command-line front end for MoodNote.
//!
//! # Responsibility
//! - Drive note, mood and profile use cases against a local database.
//! - Keep output as `key=value` lines for scripting and quick sanity checks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use moodnote_core::db::open_db;
use moodnote_core::{
    init_logging, Mood, MoodConfig, MoodResolver, Note, NoteFeed, NoteService,
    PreferenceRepository, SqliteNoteRepository, SqlitePreferenceRepository,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "moodnote", version, about = "Notes with automatic mood detection")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "MOODNOTE_DB_PATH", default_value = "moodnote.sqlite3")]
    db: PathBuf,

    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long, env = "MOODNOTE_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "MOODNOTE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage information.
    Ping,
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Mood(MoodCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// Create a note; its mood is detected from the body.
    Add { title: String, body: String },
    /// Replace title and body of a note.
    Edit {
        id: Uuid,
        title: String,
        body: String,
    },
    /// Delete one note.
    Rm { id: Uuid },
    /// Delete every note.
    Clear,
    /// List notes, newest first.
    List,
}

#[derive(Debug, Subcommand)]
enum MoodCommand {
    /// Detect the mood of arbitrary text without saving it.
    Detect { text: String },
    /// Per-mood counts over stored notes.
    Stats,
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    Show,
    SetName { name: String },
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            bail!("logging init failed: {err}");
        }
    }

    match cli.command {
        Command::Ping => {
            println!("moodnote_core ping={}", moodnote_core::ping());
            println!("moodnote_core version={}", moodnote_core::core_version());
            Ok(())
        }
        Command::Note(command) => run_note(&cli.db, command).await,
        Command::Mood(command) => run_mood(&cli.db, command).await,
        Command::Profile(command) => run_profile(&cli.db, command),
    }
}

fn build_resolver() -> Result<Arc<MoodResolver>> {
    let config = MoodConfig::from_env().context("invalid classifier configuration")?;
    info!(
        "event=cli_start module=cli remote_enabled={} endpoint={}",
        config.remote_enabled(),
        config.endpoint
    );
    let resolver = MoodResolver::from_config(&config).context("classifier setup failed")?;
    Ok(Arc::new(resolver))
}

async fn run_note(db: &Path, command: NoteCommand) -> Result<()> {
    let conn = open_db(db).with_context(|| format!("failed to open {}", db.display()))?;
    let repo = SqliteNoteRepository::try_new(&conn)?;
    let service = NoteService::new(repo, build_resolver()?, NoteFeed::default());

    match command {
        NoteCommand::Add { title, body } => {
            let note = service.create_note(title, body).await?;
            print_note(&note);
        }
        NoteCommand::Edit { id, title, body } => {
            let note = service.update_note(id, title, body).await?;
            print_note(&note);
        }
        NoteCommand::Rm { id } => {
            service.delete_note(id)?;
            println!("deleted={id}");
        }
        NoteCommand::Clear => {
            let removed = service.delete_all_notes()?;
            println!("deleted_count={removed}");
        }
        NoteCommand::List => {
            let notes = service.list_notes()?;
            println!("count={}", notes.len());
            for note in &notes {
                print_note(note);
            }
        }
    }
    Ok(())
}

async fn run_mood(db: &Path, command: MoodCommand) -> Result<()> {
    match command {
        MoodCommand::Detect { text } => {
            let resolver = build_resolver()?;
            let (mood, source) = detect(&resolver, &text).await;
            println!("mood={mood} source={source}");
        }
        MoodCommand::Stats => {
            let conn = open_db(db).with_context(|| format!("failed to open {}", db.display()))?;
            let repo = SqliteNoteRepository::try_new(&conn)?;
            let service = NoteService::new(repo, build_resolver()?, NoteFeed::default());
            let summary = service.mood_summary()?;
            println!("total={}", summary.total);
            for entry in &summary.counts {
                println!("mood={} count={}", entry.mood, entry.count);
            }
            match summary.dominant {
                Some(mood) => println!("dominant={mood}"),
                None => println!("dominant=none"),
            }
        }
    }
    Ok(())
}

/// Blank text is `neutral` without consulting any classifier.
async fn detect(resolver: &MoodResolver, text: &str) -> (Mood, &'static str) {
    if text.trim().is_empty() {
        return (Mood::Neutral, "skipped");
    }
    let (mood, source) = resolver.resolve_with_source(text).await;
    (mood, source.as_str())
}

fn run_profile(db: &Path, command: ProfileCommand) -> Result<()> {
    let mut conn = open_db(db).with_context(|| format!("failed to open {}", db.display()))?;
    let mut prefs = SqlitePreferenceRepository::try_new(&mut conn)?;

    match command {
        ProfileCommand::Show => {
            let name = prefs.display_name()?;
            println!("user_name={}", name.as_deref().unwrap_or(""));
            println!("is_first_run={}", prefs.is_first_run()?);
        }
        ProfileCommand::SetName { name } => {
            prefs.save_display_name(&name)?;
            println!("user_name={}", name.trim());
        }
        ProfileCommand::Reset => {
            prefs.clear_display_name()?;
            println!("is_first_run=true");
        }
    }
    Ok(())
}

fn print_note(note: &Note) {
    println!(
        "id={} mood={} created_at={} title={:?} body={:?}",
        note.id, note.mood, note.created_at, note.title, note.body
    );
}
