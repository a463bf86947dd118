//! Directory synchronizer.
//!
//! Responsibilities:
//! - Initial scan: enumerate the watched directory once and seed the store.
//! - Watch loop: drain the event channel for the process lifetime,
//!   dispatching create/modify to updates and remove to evictions.
//!
//! All registry mutations happen on this single task, so writer-writer
//! races cannot occur. Per-file errors (vanished file, non-numeric
//! content, registration conflict) are logged and skipped; only a failed
//! directory enumeration is escalated.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use gaugedir_core::error::{GaugeDirError, Result};
use gaugedir_core::value::read_value;

use crate::store::MetricStore;

use super::{FsEvent, FsEventKind, WatchMessage};

/// Drives the metric store from directory state and filesystem events.
pub struct Synchronizer {
    store: Arc<MetricStore>,
}

impl Synchronizer {
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self { store }
    }

    /// Seed the store from the directory's current contents (non-recursive).
    ///
    /// Returns the number of entries inspected. Enumeration errors are
    /// fatal: without a baseline the exporter cannot proceed.
    pub fn scan(&self, dir: &Path) -> Result<usize> {
        let entries = fs::read_dir(dir).map_err(|source| GaugeDirError::Enumeration {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut seen = 0;
        for entry in entries {
            let entry = entry.map_err(|source| GaugeDirError::Enumeration {
                path: dir.to_path_buf(),
                source,
            })?;
            seen += 1;
            self.apply_update(&entry.path());
        }
        Ok(seen)
    }

    /// Receive loop over the watch channel. Runs until the channel closes
    /// or the token is cancelled (tests cancel; production never does).
    pub async fn run(self, mut events: mpsc::Receiver<WatchMessage>, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("synchronizer shutting down");
                    break;
                }
                msg = events.recv() => {
                    match msg {
                        Some(WatchMessage::Event(ev)) => self.handle_event(ev),
                        Some(WatchMessage::Error(err)) => {
                            // Transient OS-level failure; keep watching.
                            tracing::warn!(error = %err, "watch source error");
                        }
                        None => {
                            tracing::info!("watch channel closed, synchronizer exiting");
                            break;
                        }
                    }
                }
            }
        }
    }

    fn handle_event(&self, ev: FsEvent) {
        match ev.kind {
            FsEventKind::Created | FsEventKind::Modified => self.apply_update(&ev.path),
            FsEventKind::Removed => self.store.remove(&ev.path),
        }
    }

    /// Update path for one file. Directories are filtered out here, before
    /// any store interaction; the value is read before `get_or_create` so
    /// a failed read or parse leaves the store untouched.
    fn apply_update(&self, path: &Path) {
        if path_is_dir(path) {
            return;
        }

        let value = match read_value(path) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping update");
                return;
            }
        };

        tracing::debug!(path = %path.display(), value, "setting gauge");
        if let Err(err) = self.store.set_value(path, value) {
            // Registration conflicts are logged-and-skipped, never fatal:
            // the file simply stays unexported.
            tracing::warn!(path = %path.display(), error = %err, "skipping update");
        }
    }
}

/// Stat-based classification. A path that cannot be stat'ed (already gone
/// again) is treated as not-a-file and skipped.
fn path_is_dir(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => {
            if meta.is_dir() {
                tracing::debug!(path = %path.display(), "ignoring directory");
                true
            } else {
                false
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "stat failed, ignoring");
            true
        }
    }
}
