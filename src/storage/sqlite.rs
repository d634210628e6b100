//! Key-value medium backed by the `kv_store` SQLite table.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, ErrorCode, OptionalExtension};

use super::KeyValueStore;
use crate::database::Database;
use crate::types::errors::PersistenceError;

pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let db = Database::open(path).map_err(map_sqlite_error)?;
        Ok(Self { db })
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let db = Database::open_in_memory().map_err(map_sqlite_error)?;
        Ok(Self { db })
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl KeyValueStore for SqliteStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(map_sqlite_error)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Self::now()],
            )
            .map_err(map_sqlite_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(map_sqlite_error)?;
        Ok(())
    }
}

/// Sorts SQLite failures into the persistence error kinds the UI reports.
fn map_sqlite_error(e: rusqlite::Error) -> PersistenceError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DiskFull) => PersistenceError::QuotaExceeded(e.to_string()),
        Some(ErrorCode::ReadOnly)
        | Some(ErrorCode::PermissionDenied)
        | Some(ErrorCode::CannotOpen)
        | Some(ErrorCode::AuthorizationForStatementDenied) => {
            PersistenceError::AccessDenied(e.to_string())
        }
        _ => PersistenceError::Backend(e.to_string()),
    }
}
