//! gaugedir core: filename codec, value reader, and the shared error surface.
//!
//! This crate holds the pure half of the exporter: decoding a file path into
//! a metric identity and parsing a file's content into a value. It carries no
//! runtime or HTTP dependencies so the exporter and tests can reuse it freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GaugeDirError`/`Result` so the
//! long-running exporter does not crash on a single malformed file.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod identity;
pub mod value;

/// Shared result type.
pub use error::{GaugeDirError, Result};
pub use identity::MetricIdentity;
pub use value::read_value;
