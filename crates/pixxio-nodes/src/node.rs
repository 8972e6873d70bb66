//! Node system core infrastructure
//!
//! A node is one pipeline step with declared typed inputs and outputs. The host
//! looks nodes up by name in the [`NodeRegistry`](crate::NodeRegistry), reads
//! their [`NodeInfo`] to build its editor, and calls [`ImagePipelineNode::execute`]
//! once per pipeline run.
//!
//! # Security Note
//!
//! Node inputs carry API keys. Nodes MUST NOT log input values wholesale; log
//! only non-sensitive fields such as file ids and collection ids.

use async_trait::async_trait;
use pixxio_core::{NodeInfo, NodeInputs, NodeOutput, NodeResult};
use std::fmt::Debug;

/// Trait that all pipeline nodes must implement
#[async_trait]
pub trait ImagePipelineNode: Send + Sync + Debug {
    /// Registry key, unique across nodes
    fn name(&self) -> &str;

    /// Declared inputs, outputs and presentation metadata
    fn info(&self) -> NodeInfo;

    /// Run the node once.
    ///
    /// `inputs` are the raw values from the host; implementations resolve them
    /// against [`ImagePipelineNode::info`] so omitted fields take their
    /// declared defaults.
    async fn execute(&self, inputs: NodeInputs) -> NodeResult<NodeOutput>;
}
