//! `SQLite`-backed key-value store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info, trace, warn};

use super::{migrations, KeyValueStore, StoreEntry};
use crate::error::{Error, Result};

/// Persistent key-value store on a single `SQLite` table.
///
/// The connection sits behind a mutex so the store can be shared as
/// `Arc<dyn KeyValueStore>`. The lock is only taken inside synchronous
/// helpers and never held across an `.await`.
#[derive(Debug)]
pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates parent directories as needed and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening key-value store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Key-value store opened at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::internal("key-value store connection lock poisoned"))
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<StoreEntry>> {
        let conn = self.lock()?;
        // substr() instead of LIKE so '%' and '_' in prefixes stay literal.
        let mut stmt = conn.prepare(
            r"
            SELECT key, value FROM kv
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key
            ",
        )?;

        let rows = stmt
            .query_map([prefix], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let entries = rows
            .into_iter()
            .filter_map(|(key, raw)| match serde_json::from_str(&raw) {
                Ok(value) => Some(StoreEntry { key, value }),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping entry with unparseable value");
                    None
                }
            })
            .collect::<Vec<_>>();

        trace!("Prefix scan '{}' returned {} entries", prefix, entries.len());
        Ok(entries)
    }

    fn put(&self, key: &str, value: &serde_json::Value) -> Result<bool> {
        let raw = serde_json::to_string(value)?;
        let updated_at = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        let affected = conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, raw, updated_at],
        )?;

        debug!("Wrote key {}", key);
        Ok(affected > 0)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_with_prefix(&self, prefix: &str) -> Result<Option<Vec<StoreEntry>>> {
        self.scan_prefix(prefix).map(Some)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<bool> {
        self.put(key, &value)
    }
}
