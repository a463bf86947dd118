//! Value reader: whole-file read plus float parse.

use std::fs;
use std::path::Path;

use crate::error::{GaugeDirError, Result};

/// Read a file's entire content and parse it as an `f64`.
///
/// Surrounding whitespace (trailing newline included) is trimmed before
/// parsing. Standard decimal and scientific notation are accepted.
///
/// Errors:
/// - `Io` if the file cannot be read — a file deleted between the watch
///   event and this read is a real race the caller must tolerate.
/// - `Parse` if the trimmed content is not a valid float (empty file
///   included).
pub fn read_value(path: &Path) -> Result<f64> {
    let raw = fs::read_to_string(path).map_err(|source| GaugeDirError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|_| GaugeDirError::Parse {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })
}
