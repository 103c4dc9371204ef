//! SQLite-backed persistent store

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::version::error::StoreError;
use crate::version::store::{KeyValueStore, check_quota};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    quota_bytes: Option<u64>,
}

impl SqliteStore {
    pub fn new(db_path: &Path, quota_bytes: Option<u64>) -> Result<Self, StoreError> {
        info!("Initializing cache database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn, quota_bytes)
    }

    /// Opens a private in-memory database
    pub fn in_memory(quota_bytes: Option<u64>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?, quota_bytes)
    }

    fn from_connection(conn: Connection, quota_bytes: Option<u64>) -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(conn),
            quota_bytes,
        };

        store.create_schema()?;
        debug!("Cache store ready");

        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), StoreError> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
            [],
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        if self.quota_bytes.is_some() {
            let used_by_others: i64 = tx.query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM entries WHERE key != ?1",
                [key],
                |row| row.get(0),
            )?;
            check_quota(key, value, used_by_others as u64, self.quota_bytes)?;
        }

        tx.execute(
            r#"
            INSERT INTO entries (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            (key, value),
        )?;
        tx.commit()?;

        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}
