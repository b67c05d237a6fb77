//! Tests for Store lifecycle
//!
//! These tests verify:
//! - Opening creates the backing file with an empty snapshot
//! - Reset-on-open discards existing state
//! - load/persist round-trips
//! - Missing files are recreated transparently
//! - Corrupt and unwritable files surface typed errors

use std::fs;

use docstore::config::{LockScope, StoreConfig};
use docstore::{Snapshot, Store, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path().join("database.json")).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("database.json");
    assert!(!path.exists());

    let store = Store::open_path(&path).unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), path);
    assert_eq!(store.load().unwrap(), Snapshot::empty());
}

#[test]
fn test_open_keeps_existing_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("database.json");

    Store::open_path(&path).unwrap().create_post("kept", 1).unwrap();

    let store = Store::open_path(&path).unwrap();
    assert_eq!(store.list_posts().unwrap().len(), 1);
}

#[test]
fn test_open_with_reset_discards_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("database.json");

    Store::open_path(&path).unwrap().create_post("gone", 1).unwrap();

    let config = StoreConfig::builder().path(&path).reset_on_open(true).build();
    let store = Store::open(config).unwrap();

    assert_eq!(store.load().unwrap(), Snapshot::empty());
    assert_eq!(store.create_post("fresh", 1).unwrap().id, 1);
}

#[test]
fn test_open_with_reset_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::builder()
        .path(temp_dir.path().join("database.json"))
        .reset_on_open(true)
        .build();

    let store = Store::open(config).unwrap();
    assert_eq!(store.load().unwrap(), Snapshot::empty());
}

#[test]
fn test_open_unwritable_path_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_such_dir").join("database.json");

    let err = Store::open_path(&path).err().unwrap();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn test_config_defaults() {
    let config = StoreConfig::default();

    assert_eq!(config.path, std::path::PathBuf::from("./database.json"));
    assert!(!config.reset_on_open);
    assert!(config.sync_on_write);
    assert_eq!(config.lock_scope, LockScope::Operation);
}

#[test]
fn test_config_accessor() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::builder()
        .path(temp_dir.path().join("database.json"))
        .sync_on_write(false)
        .lock_scope(LockScope::PerAccess)
        .build();

    let store = Store::open(config).unwrap();
    assert!(!store.config().sync_on_write);
    assert_eq!(store.config().lock_scope, LockScope::PerAccess);
}

// =============================================================================
// Load / Persist Tests
// =============================================================================

#[test]
fn test_persist_unchanged_snapshot_is_byte_identical() {
    let (_temp, store) = setup_temp_store();

    store.create_user("a@b.com", "hash").unwrap();
    store.create_post("one", 1).unwrap();
    store.create_post("two", 1).unwrap();
    store.delete_post(1).unwrap();

    let before = fs::read(store.path()).unwrap();
    store.persist(&store.load().unwrap()).unwrap();
    let after = fs::read(store.path()).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_loaded_snapshot_is_detached() {
    let (_temp, store) = setup_temp_store();

    let mut snapshot = store.load().unwrap();
    snapshot.posts.insert_with(|id| docstore::Post {
        id,
        body: "local only".to_string(),
        author_id: 1,
    })
    .unwrap();

    assert!(store.list_posts().unwrap().is_empty());
}

#[test]
fn test_persist_replaces_state() {
    let (_temp, store) = setup_temp_store();

    let mut snapshot = store.load().unwrap();
    snapshot.posts.insert_with(|id| docstore::Post {
        id,
        body: "direct".to_string(),
        author_id: 4,
    })
    .unwrap();
    store.persist(&snapshot).unwrap();

    let posts = store.list_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, "direct");
}

#[test]
fn test_deleted_file_is_recreated_on_load() {
    let (_temp, store) = setup_temp_store();

    store.create_post("lost", 1).unwrap();
    fs::remove_file(store.path()).unwrap();

    assert_eq!(store.load().unwrap(), Snapshot::empty());
    assert!(store.path().exists());
}

#[test]
fn test_corrupt_file_is_corruption_error() {
    let (_temp, store) = setup_temp_store();

    fs::write(store.path(), b"this is not json").unwrap();

    assert!(matches!(store.load(), Err(StoreError::Corruption(_))));
    assert!(matches!(store.list_posts(), Err(StoreError::Corruption(_))));
    assert!(matches!(
        store.create_post("x", 1),
        Err(StoreError::Corruption(_))
    ));

    // Failed mutation must not overwrite the corrupt file
    assert_eq!(fs::read(store.path()).unwrap(), b"this is not json");
}

#[test]
fn test_error_predicates() {
    let (_temp, store) = setup_temp_store();

    let not_found = store.get_post(1).unwrap_err();
    assert!(not_found.is_not_found());
    assert!(!not_found.is_already_exists());
    assert!(!not_found.is_expired());

    store.create_user("a@b.com", "h").unwrap();
    let exists = store.create_user("a@b.com", "h").unwrap_err();
    assert!(exists.is_already_exists());
    assert_eq!(exists.to_string(), "user already exists: a@b.com");
}

#[test]
fn test_exhausted_id_counter_is_error() {
    let (_temp, store) = setup_temp_store();

    let data = br#"{"posts":{"id_count":18446744073709551615,"items":{}},"users":{"id_count":1,"items":{}},"refresh_tokens":{}}"#;
    fs::write(store.path(), data).unwrap();

    // Reads still work
    assert!(store.list_posts().unwrap().is_empty());

    let err = store.create_post("x", 1).unwrap_err();
    assert!(matches!(err, StoreError::Corruption(_)));

    // Failed allocation must not rewrite the file
    assert_eq!(fs::read(store.path()).unwrap(), data.to_vec());
}
