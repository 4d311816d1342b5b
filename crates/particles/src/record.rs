//! Developer records and the draft form that creates them.
//!
//! Records live in the key-value store under `developer:<name>`. The stored
//! value carries `name`, `location` and `technologies`, plus whatever other
//! fields a writer put there. The record `id` is never stored and is always
//! derived from the key.

use serde::{Deserialize, Serialize};

use crate::store::StoreEntry;

/// Key prefix shared by every developer record.
pub const RECORD_PREFIX: &str = "developer:";

/// A developer profile as shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperRecord {
    /// Storage key with [`RECORD_PREFIX`] stripped.
    #[serde(default, skip_deserializing)]
    pub id: String,

    /// Display name; also the storage uniqueness key.
    pub name: String,

    /// Free-text location.
    pub location: String,

    /// Technologies, in the order they were entered.
    pub technologies: Vec<String>,

    /// Any other fields of the stored value, kept as they were.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeveloperRecord {
    /// Build a record from a store entry.
    ///
    /// Returns `None` if the key lacks the record prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a record object.
    pub fn from_entry(entry: StoreEntry) -> serde_json::Result<Option<Self>> {
        let Some(id) = id_from_key(&entry.key) else {
            return Ok(None);
        };
        let id = id.to_string();
        let mut record: Self = serde_json::from_value(entry.value)?;
        record.extra.remove("id");
        record.id = id;
        Ok(Some(record))
    }

    /// The value written to the store for this record. Omits `id`.
    #[must_use]
    pub fn to_stored_value(&self) -> serde_json::Value {
        let mut value = self.extra.clone();
        value.insert("name".to_string(), self.name.clone().into());
        value.insert("location".to_string(), self.location.clone().into());
        value.insert("technologies".to_string(), self.technologies.clone().into());
        serde_json::Value::Object(value)
    }

    /// Case-insensitive substring match over name, location and technologies.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self
                .technologies
                .iter()
                .any(|tech| tech.to_lowercase().contains(needle))
    }
}

/// The add-developer form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Name field.
    pub name: String,
    /// Location field.
    pub location: String,
    /// Raw comma-separated technologies field.
    pub technologies: String,
}

impl DraftRecord {
    /// Create a draft with all three fields filled.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        technologies: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            technologies: technologies.into(),
        }
    }

    /// Storage key the draft will be written under.
    #[must_use]
    pub fn key(&self) -> String {
        record_key(&self.name)
    }

    /// Convert the draft into the record it would create.
    #[must_use]
    pub fn to_record(&self) -> DeveloperRecord {
        DeveloperRecord {
            id: self.name.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            technologies: split_technologies(&self.technologies),
            extra: serde_json::Map::new(),
        }
    }
}

/// A single field of the draft form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// The name input.
    Name,
    /// The location input.
    Location,
    /// The comma-separated technologies input.
    Technologies,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Location => write!(f, "location"),
            Self::Technologies => write!(f, "technologies"),
        }
    }
}

/// Storage key for a developer with the given name.
#[must_use]
pub fn record_key(name: &str) -> String {
    format!("{RECORD_PREFIX}{name}")
}

/// Record id for a storage key, or `None` if the key is not a record key.
#[must_use]
pub fn id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(RECORD_PREFIX)
}

/// Split a comma-separated technologies field.
///
/// Every entry is trimmed. Entries that trim to nothing are kept, so an empty
/// field yields `[""]`.
#[must_use]
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',').map(|tech| tech.trim().to_string()).collect()
}
