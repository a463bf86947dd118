//! Shared application state for the exporter.
//!
//! Holds the config and the metric store behind an `Arc` so the watch task
//! and every scrape request see the same registry.

use std::path::PathBuf;
use std::sync::Arc;

use prometheus::Registry;

use gaugedir_core::error::Result;

use crate::config::ExporterConfig;
use crate::store::MetricStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    store: Arc<MetricStore>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let metrics_dir = PathBuf::from(&cfg.exporter.metrics_dir);
        let store = Arc::new(MetricStore::new(Registry::new(), metrics_dir));
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, store }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MetricStore> {
        Arc::clone(&self.inner.store)
    }
}
