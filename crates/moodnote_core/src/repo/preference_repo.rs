//! User preference repository.
//!
//! # Responsibility
//! - Persist the display name and the first-run flag.
//!
//! # Invariants
//! - Saving a display name clears the first-run flag in the same transaction.
//! - Clearing the display name restores the first-run flag.
//! - A fresh database reports first run.

use crate::repo::note_repo::{table_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

const KEY_USER_NAME: &str = "user_name";
const KEY_IS_FIRST_TIME: &str = "is_first_time";

/// Contract for user-level preferences.
pub trait PreferenceRepository {
    fn display_name(&self) -> RepoResult<Option<String>>;
    fn save_display_name(&mut self, name: &str) -> RepoResult<()>;
    fn clear_display_name(&mut self) -> RepoResult<()>;
    fn is_first_run(&self) -> RepoResult<bool>;
}

/// SQLite-backed preference store over the `preferences` key/value table.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        if !table_exists(conn, "preferences")? {
            return Err(RepoError::MissingRequiredTable("preferences"));
        }
        Ok(Self { conn })
    }

    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_pair(&mut self, name: Option<&str>, first_time: bool) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match name {
            Some(value) => {
                tx.execute(
                    "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                    params![KEY_USER_NAME, value],
                )?;
            }
            None => {
                tx.execute("DELETE FROM preferences WHERE key = ?1;", [KEY_USER_NAME])?;
            }
        }
        tx.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![KEY_IS_FIRST_TIME, first_time.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn display_name(&self) -> RepoResult<Option<String>> {
        self.read(KEY_USER_NAME)
    }

    fn save_display_name(&mut self, name: &str) -> RepoResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RepoError::InvalidData(
                "display name must not be empty".to_string(),
            ));
        }
        self.write_pair(Some(trimmed), false)
    }

    fn clear_display_name(&mut self) -> RepoResult<()> {
        self.write_pair(None, true)
    }

    fn is_first_run(&self) -> RepoResult<bool> {
        match self.read(KEY_IS_FIRST_TIME)? {
            None => Ok(true),
            Some(value) => value.parse::<bool>().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid boolean `{value}` in preferences.{KEY_IS_FIRST_TIME}"
                ))
            }),
        }
    }
}
