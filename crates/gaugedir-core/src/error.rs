//! Shared error type across gaugedir crates.

use std::path::PathBuf;

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, GaugeDirError>;

/// Unified error type used by core and exporter.
///
/// Only `Enumeration` (initial scan) and `Config` are treated as fatal by
/// the exporter; everything else is logged and the offending file skipped.
#[derive(Debug, Error)]
pub enum GaugeDirError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content of {path} is not a number: {content:?}")]
    Parse { path: PathBuf, content: String },
    #[error("metric registration failed: {0}")]
    Registration(String),
    #[error("watch source error: {0}")]
    WatchSource(String),
    #[error("cannot enumerate {path}: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
}
