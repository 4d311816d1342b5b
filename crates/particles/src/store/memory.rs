//! In-process key-value store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{KeyValueStore, StoreEntry};
use crate::error::{Error, Result};

/// How a [`MemoryStore`] answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// Reads and writes behave normally.
    #[default]
    Healthy,
    /// Writes are refused with `Ok(false)`; reads behave normally.
    RejectWrites,
    /// Prefix reads return `Ok(None)`; writes behave normally.
    AbsentReads,
    /// Every call fails with an error.
    Unavailable,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, serde_json::Value>,
    mode: StoreMode,
    reads: usize,
    writes: usize,
}

/// Key-value store held entirely in memory.
///
/// Counts every read and write call so callers can observe refresh
/// behaviour, and can be switched into a [`StoreMode`] that refuses or fails
/// requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty, healthy store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = StoreEntry>) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.lock() {
            inner
                .entries
                .extend(entries.into_iter().map(|e| (e.key, e.value)));
        }
        store
    }

    /// Change how the store answers subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn set_mode(&self, mode: StoreMode) -> Result<()> {
        self.lock()?.mode = mode;
        Ok(())
    }

    /// Number of `get_with_prefix` calls received.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.lock().map_or(0, |inner| inner.reads)
    }

    /// Number of `set` calls received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().map_or(0, |inner| inner.writes)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |inner| inner.entries.len())
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Option<Vec<StoreEntry>>> {
        let mut inner = self.lock()?;
        inner.reads += 1;
        let mode = inner.mode;
        match mode {
            StoreMode::Unavailable => Err(Error::internal("memory store unavailable")),
            StoreMode::AbsentReads => Ok(None),
            StoreMode::Healthy | StoreMode::RejectWrites => Ok(Some(
                inner
                    .entries
                    .range(prefix.to_string()..)
                    .take_while(|(key, _)| key.starts_with(prefix))
                    .map(|(key, value)| StoreEntry::new(key.clone(), value.clone()))
                    .collect(),
            )),
        }
    }

    fn put(&self, key: &str, value: serde_json::Value) -> Result<bool> {
        let mut inner = self.lock()?;
        inner.writes += 1;
        let mode = inner.mode;
        match mode {
            StoreMode::Unavailable => Err(Error::internal("memory store unavailable")),
            StoreMode::RejectWrites => Ok(false),
            StoreMode::Healthy | StoreMode::AbsentReads => {
                inner.entries.insert(key.to_string(), value);
                debug!("Wrote key {}", key);
                Ok(true)
            }
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_with_prefix(&self, prefix: &str) -> Result<Option<Vec<StoreEntry>>> {
        self.scan_prefix(prefix)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<bool> {
        self.put(key, value)
    }
}
