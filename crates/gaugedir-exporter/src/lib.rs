//! gaugedir exporter library entry.
//!
//! This crate wires the config loader, metric store, directory watcher, and
//! HTTP exposition route into a running exporter. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod router;
pub mod store;
pub mod watch;
