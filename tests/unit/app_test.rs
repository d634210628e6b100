//! Unit tests for the App flows: form input, copy one, copy all, usage.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use copyme::app::App;
use copyme::managers::history_store::HistoryStoreTrait;
use copyme::services::clipboard::MemoryClipboard;
use copyme::services::clock::ManualClock;
use copyme::services::rehydration::Rehydration;
use copyme::services::settings_engine::SettingsEngine;
use copyme::storage::MemoryStorage;
use copyme::types::errors::ClipboardError;
use copyme::types::settings::CopyMeSettings;

struct Harness {
    app: App,
    storage: MemoryStorage,
    clipboard: MemoryClipboard,
    clock: ManualClock,
    _dir: TempDir,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let engine = SettingsEngine::with_settings(path, CopyMeSettings::default());

    let storage = MemoryStorage::new();
    let clipboard = MemoryClipboard::new();
    let clock = ManualClock::new(1_000);
    let app = App::new(
        engine,
        Box::new(storage.clone()),
        Arc::new(clock.clone()),
        Arc::new(clipboard.clone()),
    );

    Harness {
        app,
        storage,
        clipboard,
        clock,
        _dir: dir,
    }
}

#[test]
fn test_add_clip_trims_input() {
    let mut h = harness();
    let saved = h.app.add_clip("  hello world \n").unwrap();
    assert_eq!(saved.value.text, "hello world");
}

#[test]
fn test_add_clip_ignores_blank_input() {
    let mut h = harness();
    assert!(h.app.add_clip("   ").is_none());
    assert!(h.app.store.is_empty());
}

#[tokio::test]
async fn test_copy_item_writes_clipboard_and_notifies() {
    let mut h = harness();
    let id = h.app.add_clip("short text").unwrap().value.id;

    let copied = h.app.copy_item(&id).await.unwrap();

    assert_eq!(h.clipboard.contents().as_deref(), Some("short text"));
    assert_eq!(copied.message, "Copied: \"short text\"");
    let n = h.app.store.notification();
    assert!(n.active);
    assert_eq!(n.message, copied.message);
}

#[tokio::test]
async fn test_copy_item_preview_is_truncated() {
    let mut h = harness();
    let long = "abcdefghijklmnopqrstuvwxyz0123456789";
    let id = h.app.add_clip(long).unwrap().value.id;

    let copied = h.app.copy_item(&id).await.unwrap();
    assert_eq!(copied.message, "Copied: \"abcdefghijklmnopqrstuvwxyz0123...\"");
    assert_eq!(h.clipboard.contents().as_deref(), Some(long));
}

#[tokio::test]
async fn test_copy_unknown_item_is_not_found() {
    let mut h = harness();
    let err = h.app.copy_item("nope").await.unwrap_err();
    assert!(matches!(err, ClipboardError::NotFound(_)));
}

#[tokio::test]
async fn test_copy_all_joins_in_current_order() {
    let mut h = harness();
    h.app.add_clip("first").unwrap();
    h.clock.advance(1);
    h.app.add_clip("second").unwrap();

    let copied = h.app.copy_all().await.unwrap().unwrap();
    assert_eq!(copied.message, "Copied all 2 items!");
    assert_eq!(
        h.clipboard.contents().as_deref(),
        Some("second\n\n---\n\nfirst")
    );
}

#[tokio::test]
async fn test_copy_all_on_empty_history_does_nothing() {
    let mut h = harness();
    assert!(h.app.copy_all().await.unwrap().is_none());
    assert_eq!(h.clipboard.contents(), None);
    assert!(!h.app.store.notification().active);
}

#[tokio::test]
async fn test_clipboard_denied_is_reported_without_side_effects() {
    let mut h = harness();
    let id = h.app.add_clip("secret").unwrap().value.id;
    h.clipboard.deny(true);

    let err = h.app.copy_item(&id).await.unwrap_err();
    assert!(matches!(err, ClipboardError::PermissionDenied(_)));
    assert!(!h.app.store.notification().active);
    assert_eq!(h.app.store.items().len(), 1);
}

#[tokio::test]
async fn test_copy_confirmation_uses_configured_duration() {
    let mut h = harness();
    let id = h.app.add_clip("x").unwrap().value.id;
    let copied = h.app.copy_item(&id).await.unwrap();
    assert_eq!(copied.ticket.due_at_ms, 1_000 + 2_500);

    h.clock.advance(2_500);
    h.app.store.tick();
    assert!(!h.app.store.notification().active);
}

#[test]
fn test_storage_usage_reflects_record_size() {
    let mut h = harness();
    assert_eq!(h.app.storage_usage().unwrap().bytes, 0);

    h.app.add_clip("hello").unwrap();
    let usage = h.app.storage_usage().unwrap();
    let stored = copyme::storage::KeyValueStore::load(&h.storage, "copyMeClipboardHistory")
        .unwrap()
        .unwrap();
    assert_eq!(usage.bytes, stored.len() as u64);
    assert!(usage.formatted.ends_with("Bytes"));
}

#[test]
fn test_open_with_memory_backends_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"storage":{"backend":"Memory"},"clipboard":{"backend":"Memory"}}"#,
    )
    .unwrap();

    let mut app = App::open(Some(path.to_string_lossy().to_string())).unwrap();
    assert!(app.store.is_empty());
    assert!(app.add_clip("in memory").unwrap().is_durable());
}

#[test]
fn test_open_with_sqlite_path_restores_history() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("copyme.db");
    let config_path = dir.path().join("settings.json");
    let config = serde_json::json!({
        "storage": {"backend": "Sqlite", "database_path": db_path.to_string_lossy()},
        "clipboard": {"backend": "Memory"},
    });
    fs::write(&config_path, config.to_string()).unwrap();
    let config_path = config_path.to_string_lossy().to_string();

    {
        let mut app = App::open(Some(config_path.clone())).unwrap();
        app.add_clip("kept").unwrap();
    }

    let app = App::open(Some(config_path)).unwrap();
    assert_eq!(app.store.items().len(), 1);
    assert_eq!(app.store.items()[0].text, "kept");
}

#[test]
fn test_open_falls_back_to_memory_when_storage_cannot_open() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();
    let db_path = blocker.join("sub").join("copyme.db");

    let config_path = dir.path().join("settings.json");
    let config = serde_json::json!({
        "storage": {"backend": "Sqlite", "database_path": db_path.to_string_lossy()},
        "clipboard": {"backend": "Memory"},
    });
    fs::write(&config_path, config.to_string()).unwrap();

    let mut app = App::open(Some(config_path.to_string_lossy().to_string()))
        .expect("startup should survive an unusable storage path");

    assert!(app.store.rehydration().is_degraded());
    assert!(matches!(
        app.store.rehydration(),
        Rehydration::Unreadable { .. }
    ));

    let saved = app.add_clip("still works").unwrap();
    assert!(saved.is_durable(), "the in-memory stand-in accepts writes");
    assert_eq!(app.store.items().len(), 1);
    assert_eq!(app.store.items()[0].text, "still works");
}
