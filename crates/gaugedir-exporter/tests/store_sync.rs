//! End-to-end store + synchronizer tests over a real temp directory.
//!
//! The event loop is driven deterministically: messages are queued on the
//! channel, the sender is dropped, and the loop is awaited to completion
//! (it drains buffered messages before exiting on channel close).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prometheus::proto::MetricFamily;
use prometheus::Registry;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use gaugedir_core::GaugeDirError;
use gaugedir_exporter::store::MetricStore;
use gaugedir_exporter::watch::{FsEvent, FsEventKind, Synchronizer, WatchMessage};

fn new_store(dir: &Path) -> Arc<MetricStore> {
    Arc::new(MetricStore::new(Registry::new(), dir.to_path_buf()))
}

fn family<'a>(families: &'a [MetricFamily], name: &str) -> Option<&'a MetricFamily> {
    families.iter().find(|f| f.get_name() == name)
}

fn gauge_value(fam: &MetricFamily) -> f64 {
    fam.get_metric()[0].get_gauge().get_value()
}

/// Queue messages, close the channel, and run the loop to completion.
async fn drive(store: Arc<MetricStore>, messages: Vec<WatchMessage>) {
    let (tx, rx) = mpsc::channel(64);
    for msg in messages {
        tx.send(msg).await.unwrap();
    }
    drop(tx);
    Synchronizer::new(store).run(rx, CancellationToken::new()).await;
}

fn created(path: &Path) -> WatchMessage {
    WatchMessage::Event(FsEvent {
        kind: FsEventKind::Created,
        path: path.to_path_buf(),
    })
}

fn modified(path: &Path) -> WatchMessage {
    WatchMessage::Event(FsEvent {
        kind: FsEventKind::Modified,
        path: path.to_path_buf(),
    })
}

fn removed(path: &Path) -> WatchMessage {
    WatchMessage::Event(FsEvent {
        kind: FsEventKind::Removed,
        path: path.to_path_buf(),
    })
}

#[test]
fn scan_registers_labeled_gauge() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo;env=prod");
    fs::write(&path, "42.5\n").unwrap();

    let store = new_store(dir.path());
    let seen = Synchronizer::new(store.clone()).scan(dir.path()).unwrap();
    assert_eq!(seen, 1);
    assert_eq!(store.len(), 1);

    let families = store.gather();
    let fam = family(&families, "foo").expect("foo must be exported");
    assert_eq!(gauge_value(fam), 42.5);
    let labels = fam.get_metric()[0].get_label();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].get_name(), "env");
    assert_eq!(labels[0].get_value(), "prod");
}

#[test]
fn scan_of_missing_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(dir.path());
    let missing = dir.path().join("nope");
    let err = Synchronizer::new(store).scan(&missing).unwrap_err();
    assert!(matches!(err, GaugeDirError::Enumeration { .. }));
}

#[tokio::test]
async fn create_event_registers_exactly_one_gauge() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo;env=prod");
    fs::write(&path, "42.5\n").unwrap();

    let store = new_store(dir.path());
    // Watchers often deliver create + write for a single file; one entry
    // must come out the other side.
    drive(store.clone(), vec![created(&path), modified(&path)]).await;

    assert_eq!(store.len(), 1);
    let families = store.gather();
    assert_eq!(gauge_value(family(&families, "foo").unwrap()), 42.5);
}

#[tokio::test]
async fn remove_then_recreate_is_a_fresh_registration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo;env=prod");
    fs::write(&path, "42.5\n").unwrap();

    let store = new_store(dir.path());
    Synchronizer::new(store.clone()).scan(dir.path()).unwrap();
    assert_eq!(store.len(), 1);

    fs::remove_file(&path).unwrap();
    drive(store.clone(), vec![removed(&path)]).await;
    assert!(store.is_empty());
    assert!(family(&store.gather(), "foo").is_none());

    // Idempotent removal: a second remove for the same path is a no-op.
    drive(store.clone(), vec![removed(&path)]).await;
    assert!(store.is_empty());

    fs::write(&path, "1.0").unwrap();
    drive(store.clone(), vec![created(&path)]).await;
    assert_eq!(store.len(), 1);
    assert_eq!(gauge_value(family(&store.gather(), "foo").unwrap()), 1.0);
}

#[tokio::test]
async fn bad_content_leaves_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo");
    fs::write(&path, "42.5").unwrap();

    let store = new_store(dir.path());
    Synchronizer::new(store.clone()).scan(dir.path()).unwrap();

    fs::write(&path, "abc").unwrap();
    drive(store.clone(), vec![modified(&path)]).await;

    let families = store.gather();
    assert_eq!(gauge_value(family(&families, "foo").unwrap()), 42.5);
}

#[tokio::test]
async fn unparsable_new_file_registers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo");
    fs::write(&path, "abc").unwrap();

    let store = new_store(dir.path());
    drive(store.clone(), vec![created(&path)]).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn subdirectory_never_becomes_an_entry() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("subdir");
    fs::create_dir(&sub).unwrap();

    let store = new_store(dir.path());
    Synchronizer::new(store.clone()).scan(dir.path()).unwrap();
    assert!(store.is_empty());

    drive(store.clone(), vec![created(&sub), modified(&sub)]).await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn watch_error_does_not_stop_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo");
    fs::write(&path, "7").unwrap();

    let store = new_store(dir.path());
    drive(
        store.clone(),
        vec![WatchMessage::Error("inotify overflow".into()), created(&path)],
    )
    .await;
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn cancellation_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(dir.path());

    let (tx, rx) = mpsc::channel(8);
    let token = CancellationToken::new();
    let task = tokio::spawn(Synchronizer::new(store).run(rx, token.clone()));

    token.cancel();
    task.await.unwrap();
    drop(tx);
}

#[test]
fn same_name_different_label_values_are_distinct_entries() {
    let dir = tempfile::tempdir().unwrap();
    let prod = dir.path().join("foo;env=prod");
    let dev = dir.path().join("foo;env=dev");
    fs::write(&prod, "1").unwrap();
    fs::write(&dev, "2").unwrap();

    let store = new_store(dir.path());
    Synchronizer::new(store.clone()).scan(dir.path()).unwrap();
    assert_eq!(store.len(), 2);

    let families = store.gather();
    let fam = family(&families, "foo").unwrap();
    assert_eq!(fam.get_metric().len(), 2);
}

#[test]
fn incompatible_label_schema_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("foo;env=prod");
    let second = dir.path().join("foo;host=a");
    fs::write(&first, "1").unwrap();
    fs::write(&second, "2").unwrap();

    let store = new_store(dir.path());
    store.set_value(&first, 1.0).unwrap();

    // Same metric name, different label keys: prometheus rejects the
    // registration and the store surfaces it.
    let err = store.set_value(&second, 2.0).unwrap_err();
    assert!(matches!(err, GaugeDirError::Registration(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn same_basename_in_different_dirs_is_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = new_store(dir.path());

    store.set_value(&PathBuf::from("/a/m;k=v"), 1.0).unwrap();
    store.set_value(&PathBuf::from("/b/m;k=v"), 2.0).unwrap();

    assert_eq!(store.len(), 1);
    let families = store.gather();
    assert_eq!(gauge_value(family(&families, "m").unwrap()), 2.0);
}
