//! Filename codec (panic-free).
//!
//! A file named `<metric_name>[;<key>=<value>]*` decodes to a metric name
//! plus a label map. Decoding rules:
//! - Only the basename matters; the directory prefix is ignored, so two
//!   paths sharing a basename decode to the same identity.
//! - A label segment must split on `=` into exactly two parts; anything
//!   else is warned about and dropped, never fatal.
//! - A later duplicate key overwrites the earlier one.

use std::collections::BTreeMap;
use std::path::Path;

/// Decoded metric identity: name plus label map.
///
/// `BTreeMap` keeps label order stable, so the identity is usable as a
/// registry key (`Eq + Hash`) without extra normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricIdentity {
    /// Metric name (first `;`-segment of the basename).
    pub name: String,
    /// Label key/value pairs from the remaining segments.
    pub labels: BTreeMap<String, String>,
}

impl MetricIdentity {
    /// Decode a path into an identity. Total: malformed input degrades to
    /// a lenient identity instead of failing.
    pub fn from_path(path: &Path) -> Self {
        let basename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut segments = basename.split(';');
        let name = segments.next().unwrap_or_default().to_string();

        let mut labels = BTreeMap::new();
        for segment in segments {
            let parts: Vec<&str> = segment.split('=').collect();
            if parts.len() != 2 {
                tracing::warn!(
                    path = %path.display(),
                    segment,
                    "invalid label segment, expected format: metricName;label=value;label=value"
                );
                continue;
            }
            labels.insert(parts[0].to_string(), parts[1].to_string());
        }

        Self { name, labels }
    }
}
