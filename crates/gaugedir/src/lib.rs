//! Top-level facade crate for gaugedir.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use gaugedir_core::*;
}

pub mod exporter {
    pub use gaugedir_exporter::*;
}
