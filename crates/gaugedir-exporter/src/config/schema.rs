use serde::Deserialize;

use gaugedir_core::error::{GaugeDirError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GaugeDirError::Config("version must be 1".into()));
        }
        self.exporter.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    /// Address to listen on for scrape requests.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// HTTP path under which metrics are exposed.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Directory whose files are exported as gauges.
    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            metrics_dir: default_metrics_dir(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') {
            return Err(GaugeDirError::Config(
                "exporter.metrics_path must start with '/'".into(),
            ));
        }
        if self.metrics_dir.is_empty() {
            return Err(GaugeDirError::Config(
                "exporter.metrics_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_metrics_dir() -> String {
    "/metrics".into()
}
