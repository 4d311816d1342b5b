//! Directory state and its pure transitions.

use serde::Serialize;

use crate::record::{DeveloperRecord, DraftField, DraftRecord};

/// Everything the directory view holds between events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryState {
    /// Every record from the last successful load.
    pub all_records: Vec<DeveloperRecord>,
    /// The subset currently shown.
    pub filtered_records: Vec<DeveloperRecord>,
    /// The last search term entered, lower-cased.
    pub search_term: String,
    /// The add-developer form.
    pub draft: DraftRecord,
}

/// Records whose name, location or any technology contains `term`,
/// ignoring case. An empty term keeps every record.
#[must_use]
pub fn filter_records(records: &[DeveloperRecord], term: &str) -> Vec<DeveloperRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

/// Apply a search term: records it and recomputes the filtered list from
/// `all_records`.
#[must_use]
pub fn filter_state(state: DirectoryState, term: &str) -> DirectoryState {
    let search_term = term.to_lowercase();
    let filtered_records = filter_records(&state.all_records, &search_term);
    DirectoryState {
        filtered_records,
        search_term,
        ..state
    }
}

/// Replace the loaded records.
///
/// Both lists are reset to `records`; the current search term is kept but no
/// longer applied.
#[must_use]
pub fn replace_records(state: DirectoryState, records: Vec<DeveloperRecord>) -> DirectoryState {
    DirectoryState {
        filtered_records: records.clone(),
        all_records: records,
        ..state
    }
}

/// Set one field of the draft form.
#[must_use]
pub fn apply_edit(draft: DraftRecord, field: DraftField, value: impl Into<String>) -> DraftRecord {
    let value = value.into();
    match field {
        DraftField::Name => DraftRecord { name: value, ..draft },
        DraftField::Location => DraftRecord {
            location: value,
            ..draft
        },
        DraftField::Technologies => DraftRecord {
            technologies: value,
            ..draft
        },
    }
}
