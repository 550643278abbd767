//! Schema history of the note database.
//!
//! | version | file                    | change                                   |
//! |---------|-------------------------|------------------------------------------|
//! | 1       | `0001_notes.sql`        | `notes` table and creation-time index    |
//! | 2       | `0002_note_mood.sql`    | `notes.mood`, closed label set, `neutral`|
//! | 3       | `0003_preferences.sql`  | `preferences` key/value table            |
//!
//! `PRAGMA user_version` records the last applied step. Steps only ever get
//! appended; an applied step is never edited.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step.
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "notes",
        sql: include_str!("0001_notes.sql"),
    },
    SchemaStep {
        version: 2,
        name: "note_mood",
        sql: include_str!("0002_note_mood.sql"),
    },
    SchemaStep {
        version: 3,
        name: "preferences",
        sql: include_str!("0003_preferences.sql"),
    },
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Pending steps run inside a single transaction, so a failure leaves the
/// database at its previous version. A database written by a newer build is
/// refused with [`DbError::UnsupportedSchemaVersion`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let on_disk: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let target = latest_version();
    if on_disk > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: on_disk,
            latest_supported: target,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > on_disk)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    info!("event=db_migrate module=db status=start from_version={on_disk} to_version={target}");
    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    info!("event=db_migrate module=db status=ok version={target}");
    Ok(())
}
