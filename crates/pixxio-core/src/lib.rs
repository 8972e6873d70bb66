//! pixx.io Core Library
//!
//! This crate provides the error types, transfer configuration, and the image and
//! node value models shared by the pixx.io pipeline nodes.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::TransferConfig;
pub use error::{ErrorMetadata, LogLevel, NodeError, NodeResult};
pub use models::{
    ImageTensor, InputKind, InputSpec, NodeInfo, NodeInputs, NodeOutput, NodeValue, OutputSpec,
};
