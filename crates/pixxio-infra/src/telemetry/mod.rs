//! Tracing subscriber initialization
//!
//! The node crates only emit `tracing` events. A host installs a subscriber
//! once at startup with one of these functions.

mod init;

pub use init::{init_json_telemetry, init_telemetry, DEFAULT_FILTER};
