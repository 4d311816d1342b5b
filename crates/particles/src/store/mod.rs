//! Key-value store client.
//!
//! The directory consumes exactly two store operations: a prefix read and a
//! keyed write. [`KeyValueStore`] captures that contract so the view can be
//! handed any backing store. Two implementations ship with the crate:
//!
//! - [`SqliteStore`]: persistent, `SQLite`-backed, used by the binary
//! - [`MemoryStore`]: in-process map with switchable failure modes

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::{MemoryStore, StoreMode};
pub use sqlite::SqliteStore;

/// A single key-value pair returned by a prefix read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// The full storage key.
    pub key: String,
    /// The stored JSON value.
    pub value: serde_json::Value,
}

impl StoreEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// The key-value operations the directory relies on.
///
/// Implementations decide their own consistency; callers make no ordering or
/// atomicity assumptions beyond a single call.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Return every entry whose key starts with `prefix`.
    ///
    /// `Ok(None)` means the store produced no result at all, which callers
    /// treat like an empty response they cannot act on. Entry order is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn get_with_prefix(&self, prefix: &str) -> Result<Option<Vec<StoreEntry>>>;

    /// Write `value` at `key`, overwriting any previous value.
    ///
    /// Returns `true` if the write was accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<bool>;
}
