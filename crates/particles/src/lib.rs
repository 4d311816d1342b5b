//! `particles` - a developer directory backed by a key-value store
//!
//! Records are loaded from a [`KeyValueStore`] by key prefix, filtered in
//! memory by a case-insensitive search, and created from a three-field draft.
//! The [`DirectoryView`] ties these together around an injected store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod notify;
pub mod record;
pub mod render;
pub mod store;

pub use config::Config;
pub use directory::{DirectoryState, DirectoryView, LoadOutcome, SubmitOutcome};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use notify::{Notification, NotificationQueue, NotificationSettings, Notifier};
pub use record::{DeveloperRecord, DraftField, DraftRecord, RECORD_PREFIX};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreEntry};
