//! notify -> channel bridge.
//!
//! The OS watcher delivers callbacks on its own thread; this module maps
//! them into plain `WatchMessage`s on a tokio channel so the synchronizer
//! can consume them as an ordinary receive loop. Event kinds other than
//! create/modify/remove are dropped here.

use std::path::Path;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use gaugedir_core::error::{GaugeDirError, Result};

use super::{FsEvent, FsEventKind, WatchMessage};

/// Start watching `dir` (non-recursive), forwarding events into `tx`.
///
/// The returned watcher must be kept alive for the watch to continue;
/// dropping it closes the channel and ends the synchronizer loop.
pub fn spawn_watcher(dir: &Path, tx: mpsc::Sender<WatchMessage>) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                let kind = match event.kind {
                    EventKind::Create(_) => Some(FsEventKind::Created),
                    EventKind::Modify(_) => Some(FsEventKind::Modified),
                    EventKind::Remove(_) => Some(FsEventKind::Removed),
                    _ => None,
                };
                if let Some(kind) = kind {
                    for path in event.paths {
                        // Receiver gone means shutdown; nothing to do.
                        let _ = tx.blocking_send(WatchMessage::Event(FsEvent { kind, path }));
                    }
                }
            }
            Err(err) => {
                let _ = tx.blocking_send(WatchMessage::Error(err.to_string()));
            }
        }
    })
    .map_err(|e| GaugeDirError::WatchSource(e.to_string()))?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| GaugeDirError::WatchSource(e.to_string()))?;

    Ok(watcher)
}
