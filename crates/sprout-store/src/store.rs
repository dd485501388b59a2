//! Store handle and connection management

use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use sprout_common::error::{Error, Result};

use crate::schema;

/// SQLite-backed store shared across request handlers
pub struct SproutStore {
    pub(crate) conn: Mutex<Connection>,
}

impl SproutStore {
    /// Open (or create) the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(map_sqlite_err)?;

        Self::configure_connection(&conn)?;
        schema::init(&conn)?;

        tracing::info!("Opened store at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        Self::configure_connection(&conn)?;
        schema::init(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Configure the SQLite connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(map_sqlite_err)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(map_sqlite_err)?;
        // Referential integrity lives in the database, not the handlers
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(map_sqlite_err)?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

/// Map rusqlite errors onto the Sprout error taxonomy
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> Error {
    match e {
        rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
        rusqlite::Error::SqliteFailure(failure, message) => {
            let message = message.unwrap_or_else(|| failure.to_string());
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                if message.contains("users.login") {
                    Error::LoginTaken
                } else if message.contains("activity_students") {
                    Error::AlreadyEnrolled
                } else if message.contains("FOREIGN KEY") {
                    Error::ForeignKeyViolation(message)
                } else {
                    Error::DatabaseError(message)
                }
            } else {
                Error::DatabaseError(message)
            }
        }
        other => Error::DatabaseError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sprout.db");
        let store = SproutStore::open(&path).unwrap();
        drop(store);
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprout.db");
        drop(SproutStore::open(&path).unwrap());
        // Schema init runs again without complaint
        drop(SproutStore::open(&path).unwrap());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let store = SproutStore::open_in_memory().unwrap();
        let conn = store.lock();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }
}
