//! End-to-end directory behaviour over the `SQLite` store.

use std::sync::Arc;

use particles::directory::filter_records;
use particles::render;
use particles::store::StoreMode;
use particles::{
    DeveloperRecord, DirectoryView, DraftField, KeyValueStore, LoadOutcome, MemoryStore,
    NotificationQueue, NotificationSettings, SqliteStore, SubmitOutcome,
};
use serde_json::json;

fn settings() -> NotificationSettings {
    NotificationSettings::default()
}

async fn add(view: &mut DirectoryView, name: &str, location: &str, technologies: &str) {
    view.edit_draft(DraftField::Name, name);
    view.edit_draft(DraftField::Location, location);
    view.edit_draft(DraftField::Technologies, technologies);
    assert_eq!(view.submit_new_record().await, SubmitOutcome::Added);
}

#[tokio::test]
async fn submitted_record_round_trips_through_sqlite() {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let queue = Arc::new(NotificationQueue::new());
    let mut view = DirectoryView::mount(store.clone(), queue.clone(), settings()).await;
    assert!(view.all_records().is_empty());

    add(&mut view, "Ada", "NYC", "React, Node ").await;

    // A second, independent mount sees the same record.
    let fresh = DirectoryView::mount(store, Arc::new(NotificationQueue::new()), settings()).await;
    assert_eq!(
        fresh.all_records(),
        &[DeveloperRecord {
            id: "Ada".to_string(),
            name: "Ada".to_string(),
            location: "NYC".to_string(),
            technologies: vec!["React".to_string(), "Node".to_string()],
            extra: serde_json::Map::new(),
        }]
    );
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn seeded_store_loads_into_both_lists() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .set(
            "developer:Ada",
            json!({"name": "Ada", "location": "NYC", "technologies": ["React"]}),
        )
        .await
        .unwrap();
    store
        .set("settings:theme", json!("dark"))
        .await
        .unwrap();

    let view = DirectoryView::mount(
        Arc::new(store),
        Arc::new(NotificationQueue::new()),
        settings(),
    )
    .await;

    assert_eq!(view.all_records(), view.filtered_records());
    assert_eq!(view.all_records().len(), 1);
    assert_eq!(view.all_records()[0].id, "Ada");
}

#[tokio::test]
async fn extra_stored_fields_reach_json_output() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .set(
            "developer:Ada",
            json!({
                "name": "Ada",
                "location": "NYC",
                "technologies": ["React"],
                "avatar": "ada.png"
            }),
        )
        .await
        .unwrap();

    let view = DirectoryView::mount(
        Arc::new(store),
        Arc::new(NotificationQueue::new()),
        settings(),
    )
    .await;

    let output: serde_json::Value =
        serde_json::from_str(&render::render_json(view.filtered_records()).unwrap()).unwrap();
    assert_eq!(
        output,
        json!([{
            "id": "Ada",
            "name": "Ada",
            "location": "NYC",
            "technologies": ["React"],
            "avatar": "ada.png"
        }])
    );
}

#[tokio::test]
async fn search_then_add_then_search_again() {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let mut view = DirectoryView::mount(store, Arc::new(NotificationQueue::new()), settings()).await;

    add(&mut view, "Ada", "NYC", "React, Node").await;
    add(&mut view, "Grace", "Arlington", "COBOL").await;

    view.apply_filter("cobol");
    assert_eq!(view.filtered_records().len(), 1);
    assert_eq!(view.filtered_records()[0].name, "Grace");

    // Adding reloads, which shows everything again while the term is kept.
    add(&mut view, "Linus", "Portland", "C, Git").await;
    assert_eq!(view.filtered_records().len(), 3);
    assert_eq!(view.search_term(), "cobol");

    view.apply_filter("cobol");
    assert_eq!(view.filtered_records().len(), 1);
    assert_eq!(
        view.filtered_records(),
        filter_records(view.all_records(), "COBOL").as_slice()
    );
}

#[tokio::test]
async fn rejected_write_leaves_everything_untouched() {
    let store = Arc::new(MemoryStore::new());
    let queue = Arc::new(NotificationQueue::new());
    let mut view = DirectoryView::mount(store.clone(), queue.clone(), settings()).await;
    add(&mut view, "Ada", "NYC", "React").await;
    let _ = queue.drain();
    let reads_before = store.read_count();

    store.set_mode(StoreMode::RejectWrites).unwrap();
    view.edit_draft(DraftField::Name, "Grace");
    assert_eq!(view.submit_new_record().await, SubmitOutcome::Rejected);

    assert_eq!(store.read_count(), reads_before);
    assert_eq!(view.all_records().len(), 1);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn unavailable_store_on_mount_leaves_empty_view() {
    let store = Arc::new(MemoryStore::new());
    store.set_mode(StoreMode::Unavailable).unwrap();
    let mut view = DirectoryView::new(store, Arc::new(NotificationQueue::new()), settings());

    assert_eq!(view.load_records().await, LoadOutcome::Failed);
    assert!(view.all_records().is_empty());
}

#[tokio::test]
async fn message_renders_notification() {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let queue = Arc::new(NotificationQueue::new());
    let mut view = DirectoryView::mount(store, queue.clone(), settings()).await;
    add(&mut view, "Ada", "NYC", "React").await;
    let _ = queue.drain();

    view.message("Ada").unwrap();
    let lines: Vec<String> = queue
        .drain_active(chrono::Utc::now())
        .iter()
        .map(render::render_notification)
        .collect();
    assert_eq!(
        lines,
        vec!["success: Message sent to Ada - We've sent your message to the developer.\n"]
    );
}
