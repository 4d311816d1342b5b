//! The developer directory.
//!
//! [`DirectoryView`] owns the loaded records, the search term and the
//! add-developer draft, and talks to an injected [`KeyValueStore`]. The
//! state changes it makes are the pure functions in [`state`], usable on
//! their own without a store.
//!
//! [`KeyValueStore`]: crate::store::KeyValueStore

pub mod state;
mod view;

pub use state::{apply_edit, filter_records, filter_state, replace_records, DirectoryState};
pub use view::{DirectoryView, LoadOutcome, SubmitOutcome};
