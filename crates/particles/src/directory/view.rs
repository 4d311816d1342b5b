//! The directory view controller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{apply_edit, filter_state, replace_records, DirectoryState};
use crate::error::{Error, Result};
use crate::notify::{Notification, NotificationSettings, Notifier};
use crate::record::{DeveloperRecord, DraftField, DraftRecord, RECORD_PREFIX};
use crate::store::KeyValueStore;

/// What a call to [`DirectoryView::load_records`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The record lists were replaced with this many records.
    Loaded(usize),
    /// The store returned no result; state is unchanged.
    NoResult,
    /// The store failed; state is unchanged.
    Failed,
}

/// What a call to [`DirectoryView::submit_new_record`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The write was accepted and the records were reloaded.
    Added,
    /// The store refused the write; nothing else happened.
    Rejected,
    /// The store failed; nothing else happened.
    Failed,
}

/// Developer directory bound to a key-value store.
///
/// Holds the loaded records, the search term and the add-developer draft.
/// Store failures never escape this type: they are logged and the view keeps
/// its previous state.
#[derive(Debug)]
pub struct DirectoryView {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    settings: NotificationSettings,
    state: DirectoryState,
}

impl DirectoryView {
    /// Create an empty view. Nothing is fetched until [`load_records`] runs.
    ///
    /// [`load_records`]: Self::load_records
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            store,
            notifier,
            settings,
            state: DirectoryState::default(),
        }
    }

    /// Create a view and run its initial load.
    pub async fn mount(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        settings: NotificationSettings,
    ) -> Self {
        let mut view = Self::new(store, notifier, settings);
        view.load_records().await;
        view
    }

    /// The full view state.
    #[must_use]
    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    /// Every loaded record.
    #[must_use]
    pub fn all_records(&self) -> &[DeveloperRecord] {
        &self.state.all_records
    }

    /// Records matching the current search.
    #[must_use]
    pub fn filtered_records(&self) -> &[DeveloperRecord] {
        &self.state.filtered_records
    }

    /// The current search term, lower-cased.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    /// The add-developer draft.
    #[must_use]
    pub fn draft(&self) -> &DraftRecord {
        &self.state.draft
    }

    /// Fetch every developer record and show them all.
    ///
    /// On success both record lists are replaced, which also drops any
    /// filtering applied before the load finished. An absent result, a store
    /// error, or an undecodable entry never reaches the caller; see the
    /// returned [`LoadOutcome`] and the logs.
    pub async fn load_records(&mut self) -> LoadOutcome {
        let entries = match self.store.get_with_prefix(RECORD_PREFIX).await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                debug!("Store returned no result for prefix {}", RECORD_PREFIX);
                return LoadOutcome::NoResult;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load developer records");
                return LoadOutcome::Failed;
            }
        };

        let records: Vec<DeveloperRecord> = entries
            .into_iter()
            .filter_map(|entry| {
                let key = entry.key.clone();
                match DeveloperRecord::from_entry(entry) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(key = %key, error = %e, "Skipping malformed developer record");
                        None
                    }
                }
            })
            .collect();

        let count = records.len();
        self.state = replace_records(std::mem::take(&mut self.state), records);
        debug!("Loaded {} developer records", count);
        LoadOutcome::Loaded(count)
    }

    /// Filter the shown records by a search term.
    ///
    /// Works on the records already loaded; never touches the store.
    pub fn apply_filter(&mut self, term: &str) {
        self.state = filter_state(std::mem::take(&mut self.state), term);
        debug!(
            "Filter '{}' matched {} of {} records",
            self.state.search_term,
            self.state.filtered_records.len(),
            self.state.all_records.len()
        );
    }

    /// Update one field of the draft.
    pub fn edit_draft(&mut self, field: DraftField, value: impl Into<String>) {
        let draft = std::mem::take(&mut self.state.draft);
        self.state.draft = apply_edit(draft, field, value);
    }

    /// Write the draft as a new record, then reload.
    ///
    /// The record is stored under `developer:<name>`, replacing any record
    /// with the same name. Only an accepted write raises a notification and
    /// triggers the reload. The draft is left as it was.
    pub async fn submit_new_record(&mut self) -> SubmitOutcome {
        let draft = self.state.draft.clone();
        let record = draft.to_record();
        let key = draft.key();

        match self.store.set(&key, record.to_stored_value()).await {
            Ok(true) => {
                info!("Added developer {}", record.name);
                self.notifier.notify(Notification::success(
                    "Developer added",
                    format!("{} has been added to the database.", draft.name),
                    self.settings,
                ));
                self.load_records().await;
                SubmitOutcome::Added
            }
            Ok(false) => {
                debug!("Store refused write for {}", key);
                SubmitOutcome::Rejected
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to add developer");
                SubmitOutcome::Failed
            }
        }
    }

    /// Tell the user a message went to `record`. Nothing is actually sent.
    pub fn notify_message_sent(&self, record: &DeveloperRecord) {
        self.notifier.notify(Notification::success(
            format!("Message sent to {}", record.name),
            "We've sent your message to the developer.",
            self.settings,
        ));
    }

    /// Find a loaded record by id.
    #[must_use]
    pub fn find_record(&self, id: &str) -> Option<&DeveloperRecord> {
        self.state.all_records.iter().find(|record| record.id == id)
    }

    /// Message the loaded record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no loaded record has that id.
    pub fn message(&self, id: &str) -> Result<()> {
        let record = self
            .find_record(id)
            .ok_or_else(|| Error::record_not_found(id))?;
        self.notify_message_sent(record);
        Ok(())
    }
}
