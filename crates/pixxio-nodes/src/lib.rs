//! pixx.io Pipeline Nodes
//!
//! This crate provides the node abstraction the pipeline host wires into its
//! graphs, a registry keyed by node name, and the two pixx.io nodes.

pub mod node;
pub mod registry;
pub mod validation;

#[cfg(feature = "node-load")]
pub mod load_from_pixxio;
#[cfg(feature = "node-upload")]
pub mod upload_to_collection;

// Re-export commonly used types
pub use node::ImagePipelineNode;
pub use registry::NodeRegistry;

#[cfg(feature = "node-load")]
pub use load_from_pixxio::LoadImageFromPixxioApi;
#[cfg(feature = "node-upload")]
pub use upload_to_collection::AutoUploadImageToPixxioCollection;

pub use pixxio_core::{
    ImageTensor, InputKind, InputSpec, NodeError, NodeInfo, NodeInputs, NodeOutput, NodeResult,
    NodeValue, OutputSpec, TransferConfig,
};

// Test helpers (only available in test mode)
#[cfg(test)]
pub mod test_helpers;
