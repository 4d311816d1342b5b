//! Text rendering of the directory page.
//!
//! Each piece of the page renders to a `String` so the binary can print it
//! and tests can inspect it.

use crate::directory::DirectoryState;
use crate::notify::Notification;
use crate::record::{DeveloperRecord, DraftRecord};

/// Page title.
pub const TITLE: &str = "Welcome to Particles";

/// Line under the title.
pub const TAGLINE: &str = "Discover top software talent specialized in web technologies.";

/// Placeholder shown in an empty search box.
pub const SEARCH_PLACEHOLDER: &str = "Search by name, location, or technology...";

/// Label of the per-card action.
pub const MESSAGE_ACTION: &str = "Message";

/// Label of the form's submit action.
pub const ADD_ACTION: &str = "Add Developer";

/// Page header: title and tagline.
#[must_use]
pub fn render_header() -> String {
    format!("{TITLE}\n{TAGLINE}\n")
}

/// The search box with its current term, or the placeholder.
#[must_use]
pub fn render_search(term: &str) -> String {
    if term.is_empty() {
        format!("Search: ({SEARCH_PLACEHOLDER})\n")
    } else {
        format!("Search: {term}\n")
    }
}

/// One developer card: name, location, a tag per technology, and the
/// message action.
#[must_use]
pub fn render_card(record: &DeveloperRecord) -> String {
    let tags = record
        .technologies
        .iter()
        .map(|tech| format!("[{tech}]"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("{}\n  {}\n", record.name, record.location);
    if !tags.is_empty() {
        out.push_str(&format!("  {tags}\n"));
    }
    out.push_str(&format!("  <{MESSAGE_ACTION}>\n"));
    out
}

/// Every card, separated by blank lines. Empty when there are no records.
#[must_use]
pub fn render_cards(records: &[DeveloperRecord]) -> String {
    records
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The add-developer form with the draft's current values.
#[must_use]
pub fn render_form(draft: &DraftRecord) -> String {
    format!(
        "Name: {}\nLocation: {}\nTechnologies (comma-separated): {}\n<{ADD_ACTION}>\n",
        draft.name, draft.location, draft.technologies
    )
}

/// A notification as a single line.
#[must_use]
pub fn render_notification(notification: &Notification) -> String {
    if notification.description.is_empty() {
        format!("{}: {}\n", notification.status, notification.title)
    } else {
        format!(
            "{}: {} - {}\n",
            notification.status, notification.title, notification.description
        )
    }
}

/// The whole page: header, search box, cards and form.
#[must_use]
pub fn render_page(state: &DirectoryState) -> String {
    let mut out = render_header();
    out.push('\n');
    out.push_str(&render_search(&state.search_term));
    out.push('\n');
    let cards = render_cards(&state.filtered_records);
    if !cards.is_empty() {
        out.push_str(&cards);
        out.push('\n');
    }
    out.push_str(&render_form(&state.draft));
    out
}

/// Records as a pretty-printed JSON array, including their ids.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[DeveloperRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::replace_records;
    use crate::notify::NotificationSettings;

    fn ada() -> DeveloperRecord {
        DeveloperRecord {
            id: "Ada".to_string(),
            name: "Ada".to_string(),
            location: "NYC".to_string(),
            technologies: vec!["React".to_string(), "Node".to_string()],
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_render_header() {
        let header = render_header();
        assert!(header.starts_with(TITLE));
        assert!(header.contains(TAGLINE));
    }

    #[test]
    fn test_render_search_placeholder() {
        assert!(render_search("").contains(SEARCH_PLACEHOLDER));
        assert_eq!(render_search("nyc"), "Search: nyc\n");
    }

    #[test]
    fn test_render_card() {
        let card = render_card(&ada());
        assert_eq!(card, "Ada\n  NYC\n  [React] [Node]\n  <Message>\n");
    }

    #[test]
    fn test_render_card_without_technologies() {
        let mut record = ada();
        record.technologies.clear();
        assert_eq!(render_card(&record), "Ada\n  NYC\n  <Message>\n");
    }

    #[test]
    fn test_render_cards_empty() {
        assert!(render_cards(&[]).is_empty());
    }

    #[test]
    fn test_render_cards_separated() {
        let cards = render_cards(&[ada(), ada()]);
        assert_eq!(cards.matches("<Message>").count(), 2);
        assert!(cards.contains("\n\nAda"));
    }

    #[test]
    fn test_render_form() {
        let form = render_form(&DraftRecord::new("Ada", "NYC", "React, Node"));
        assert!(form.contains("Name: Ada"));
        assert!(form.contains("Location: NYC"));
        assert!(form.contains("Technologies (comma-separated): React, Node"));
        assert!(form.contains(ADD_ACTION));
    }

    #[test]
    fn test_render_notification() {
        let n = Notification::success(
            "Message sent to Ada",
            "We've sent your message to the developer.",
            NotificationSettings::default(),
        );
        assert_eq!(
            render_notification(&n),
            "success: Message sent to Ada - We've sent your message to the developer.\n"
        );
    }

    #[test]
    fn test_render_page_shows_filtered_records() {
        let mut state = replace_records(DirectoryState::default(), vec![ada()]);
        state.filtered_records.clear();
        state.search_term = "zzz".to_string();

        let page = render_page(&state);
        assert!(page.contains(TITLE));
        assert!(page.contains("Search: zzz"));
        assert!(!page.contains("<Message>"));
        assert!(page.contains(ADD_ACTION));
    }

    #[test]
    fn test_render_json_includes_id() {
        let json = render_json(&[ada()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "Ada");
        assert_eq!(value[0]["technologies"][1], "Node");
    }
}
