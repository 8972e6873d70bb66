//! pixx.io Infrastructure Library
//!
//! Shared pieces a pipeline host needs around the nodes:
//! - Telemetry initialization
//! - Error reports for presenting a failed node invocation

pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use telemetry::{init_json_telemetry, init_telemetry, DEFAULT_FILTER};
