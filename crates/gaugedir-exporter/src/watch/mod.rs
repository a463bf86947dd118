//! Directory watching: event types, the notify bridge, and the
//! synchronizer task that keeps the metric store in step with the
//! directory's contents.

pub mod source;
pub mod sync;

use std::path::PathBuf;

pub use source::spawn_watcher;
pub use sync::Synchronizer;

/// Filesystem event kind the synchronizer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    Created,
    Modified,
    Removed,
}

/// One filesystem event for one path.
#[derive(Debug, Clone)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
}

/// Message on the watch channel.
///
/// Errors ride the same channel as events so transient OS-level watch
/// failures are surfaced without terminating the stream.
#[derive(Debug)]
pub enum WatchMessage {
    Event(FsEvent),
    Error(String),
}
