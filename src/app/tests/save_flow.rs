use std::sync::Arc;

use crate::event::DomainEvent;
use crate::fields::FieldMap;
use crate::store::{DocumentId, DocumentStore, SavedDocument};
use crate::test_support::{FailingStore, FakeBackend};
use crate::workflow::NotificationKind;
use crate::workflow::save::{SAVE_CONFLICT_MESSAGE, SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE};

use super::Harness;

fn saved(id: &str, created_at: i64) -> SavedDocument {
    SavedDocument {
        id: DocumentId::new(id),
        title: id.to_string(),
        content: "text".to_string(),
        created_at,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn saving_the_same_text_twice_inserts_once() {
    let (mut h, store) = Harness::new(FakeBackend::with_pages(&[&["hello"]]));
    h.open_and_settle("a.pdf").await;

    h.app.request_save();
    assert!(h.app.state.saving);
    h.pump_until(|app| !app.state.saving).await;

    let notice = h.app.state.notifications.current().expect("notification");
    assert_eq!(notice.message, SAVE_SUCCESS_MESSAGE);
    assert_eq!(h.app.state.saved_documents.len(), 1);
    assert_eq!(h.app.state.saved_documents[0].title, "a.pdf");

    h.app.request_save();
    assert!(!h.app.state.saving);
    let notice = h.app.state.notifications.current().expect("notification");
    assert_eq!(notice.kind, NotificationKind::Error);
    assert_eq!(notice.message, SAVE_CONFLICT_MESSAGE);
    assert_eq!(store.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_requested_while_one_is_running_is_ignored() {
    let (mut h, store) = Harness::new(FakeBackend::with_pages(&[&["hello"]]));
    h.open_and_settle("a.pdf").await;

    h.app.request_save();
    h.app.request_save();
    h.pump_until(|app| !app.state.saving).await;

    assert_eq!(store.len(), 1);
    assert_eq!(h.app.state.saved_documents.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_insert_clears_the_flag_and_reports() {
    let mut h = Harness::with_store(
        FakeBackend::with_pages(&[&["hello"]]),
        Arc::new(FailingStore),
    );
    h.open_and_settle("a.pdf").await;

    h.app.request_save();
    h.pump_until(|app| !app.state.saving).await;

    let notice = h.app.state.notifications.current().expect("notification");
    assert_eq!(notice.kind, NotificationKind::Error);
    assert_eq!(notice.message, SAVE_FAILURE_MESSAGE);
    assert!(h.app.state.saved_documents.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn nothing_is_saved_without_extracted_text() {
    let (mut h, store) = Harness::new(FakeBackend::with_page_count(1));
    h.app.request_save();

    assert!(!h.app.state.saving);
    assert!(!h.app.state.status.is_empty());
    assert!(store.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn older_document_list_never_replaces_a_newer_one() {
    let (mut h, _store) = Harness::new(FakeBackend::with_page_count(1));
    h.app
        .handle_event(DomainEvent::DocumentsListed {
            epoch: 2,
            result: Ok(vec![saved("b", 2), saved("a", 1)]),
        })
        .expect("event should be handled");
    h.app
        .handle_event(DomainEvent::DocumentsListed {
            epoch: 1,
            result: Ok(Vec::new()),
        })
        .expect("event should be handled");

    assert_eq!(h.app.state.saved_documents.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn startup_refresh_loads_the_store() {
    let (mut h, store) = Harness::new(FakeBackend::with_page_count(1));
    store
        .insert_document("old.pdf", "old text")
        .expect("insert should succeed");

    h.app.refresh_documents();
    h.pump_until(|app| !app.state.saved_documents.is_empty()).await;
    assert_eq!(h.app.state.saved_documents[0].title, "old.pdf");
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_timer_of_an_older_notification_keeps_the_newer_one() {
    let (mut h, _store) = Harness::new(FakeBackend::with_page_count(1));
    let first = h.app.notify(NotificationKind::Success, "first");
    let second = h.app.notify(NotificationKind::Error, "second");

    h.app
        .handle_event(DomainEvent::NotificationExpired { id: first })
        .expect("event should be handled");
    assert_eq!(
        h.app.state.notifications.current().map(|n| n.id),
        Some(second)
    );

    h.app
        .handle_event(DomainEvent::NotificationExpired { id: second })
        .expect("event should be handled");
    assert!(h.app.state.notifications.current().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn notification_dismisses_itself_after_the_configured_delay() {
    let (mut h, _store) = Harness::new(FakeBackend::with_page_count(1));
    h.app.config.notifications.dismiss_after_ms = 20;
    h.app.notify(NotificationKind::Success, "short lived");
    h.pump_until(|app| app.state.notifications.current().is_none())
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn export_writes_json_named_after_the_upload() {
    let (mut h, _store) = Harness::new(FakeBackend::with_page_count(1));
    h.app.state.file_name = Some("Invoice.PDF".to_string());
    h.app.export_current_fields();

    let path = h.dir.path().join("Invoice.json");
    let written = std::fs::read_to_string(&path).expect("export should exist");
    let parsed: FieldMap = serde_json::from_str(&written).expect("export should parse");
    assert_eq!(parsed, FieldMap::sample());
    assert_eq!(
        h.app.state.notifications.current().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn export_of_empty_fields_is_refused() {
    let (mut h, _store) = Harness::new(FakeBackend::with_page_count(1));
    h.app.state.fields = FieldMap::new();
    h.app.export_current_fields();

    assert!(!h.dir.path().join("untitled.json").exists());
    assert!(h.app.state.notifications.current().is_none());
    assert!(!h.app.state.status.is_empty());
}
