//! Metric store: live gauges keyed by decoded identity.
//!
//! The store is the single shared mutable resource between the watch task
//! (writer) and scrape requests (readers). Entries are keyed by the full
//! decoded identity (name + labels), so two files with the same basename
//! collapse into one entry while same-named files with different label
//! values stay distinct. Gauge values are atomic, so a scrape observes
//! either the pre- or post-update value of an entry, never a torn one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts, Registry};

use gaugedir_core::error::{GaugeDirError, Result};
use gaugedir_core::identity::MetricIdentity;

/// Registry of live gauges, one per decoded identity.
pub struct MetricStore {
    registry: Registry,
    metrics_dir: PathBuf,
    gauges: DashMap<MetricIdentity, Gauge>,
}

impl MetricStore {
    pub fn new(registry: Registry, metrics_dir: PathBuf) -> Self {
        Self {
            registry,
            metrics_dir,
            gauges: DashMap::new(),
        }
    }

    /// Return the gauge for `path`, registering a fresh one on first sight.
    ///
    /// Registration can fail when the decoded name is not a valid metric
    /// name, or when the same metric name is already registered with an
    /// incompatible label schema. The error is returned to the caller; the
    /// synchronizer downgrades it to a logged skip.
    pub fn get_or_create(&self, path: &Path) -> Result<Gauge> {
        let id = MetricIdentity::from_path(path);
        match self.gauges.entry(id) {
            Entry::Occupied(e) => Ok(e.get().clone()),
            Entry::Vacant(e) => {
                tracing::info!(path = %path.display(), "registering gauge from file");
                let id = e.key();
                let help = format!(
                    "Auto generated from filesystem path: {}/{}",
                    self.metrics_dir.display(),
                    id.name
                );
                let const_labels: HashMap<String, String> =
                    id.labels.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                let opts = Opts::new(id.name.clone(), help).const_labels(const_labels);
                let gauge = Gauge::with_opts(opts)
                    .map_err(|err| GaugeDirError::Registration(err.to_string()))?;
                self.registry
                    .register(Box::new(gauge.clone()))
                    .map_err(|err| GaugeDirError::Registration(err.to_string()))?;
                e.insert(gauge.clone());
                Ok(gauge)
            }
        }
    }

    /// Set the current value for `path`, creating the gauge if needed.
    pub fn set_value(&self, path: &Path, value: f64) -> Result<()> {
        let gauge = self.get_or_create(path)?;
        gauge.set(value);
        Ok(())
    }

    /// Drop the entry for `path` and unregister its gauge.
    ///
    /// Idempotent: a path with no live entry is a no-op. A later
    /// re-creation of the file yields a freshly registered gauge, not a
    /// revival of this one.
    pub fn remove(&self, path: &Path) {
        let id = MetricIdentity::from_path(path);
        if let Some((id, gauge)) = self.gauges.remove(&id) {
            tracing::info!(path = %path.display(), metric = %id.name, "removing gauge for deleted file");
            if let Err(err) = self.registry.unregister(Box::new(gauge)) {
                tracing::warn!(metric = %id.name, error = %err, "unregister failed");
            }
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Snapshot of the current exposition state.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
