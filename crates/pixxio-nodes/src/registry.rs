//! Node registry keyed by node name

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use pixxio_core::{NodeError, NodeInfo, NodeInputs, NodeOutput, NodeResult, TransferConfig};

use crate::node::ImagePipelineNode;

/// Registry for managing and retrieving pipeline nodes.
///
/// Populated at process start and read concurrently afterwards. Readers share
/// the lock; registration is serialized.
#[derive(Clone)]
pub struct NodeRegistry {
    nodes: Arc<RwLock<HashMap<String, Arc<dyn ImagePipelineNode>>>>,
    node_info: Arc<RwLock<HashMap<String, NodeInfo>>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(RwLock::new(HashMap::new())),
            node_info: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry holding every node compiled into this crate
    pub async fn with_builtin_nodes(config: TransferConfig) -> Self {
        let registry = Self::new();

        #[cfg(feature = "node-upload")]
        registry
            .register(Arc::new(crate::AutoUploadImageToPixxioCollection::new(
                config.clone(),
            )))
            .await;

        #[cfg(feature = "node-load")]
        registry
            .register(Arc::new(crate::LoadImageFromPixxioApi::new(config)))
            .await;

        registry
    }

    /// Register a node under its own name. A node already registered under
    /// the same name is replaced.
    pub async fn register(&self, node: Arc<dyn ImagePipelineNode>) {
        let name = node.name().to_string();
        let info = node.info();

        let mut nodes = self.nodes.write().await;
        let mut node_info = self.node_info.write().await;

        if nodes.insert(name.clone(), node).is_some() {
            tracing::warn!(node = %name, "Replacing previously registered node");
        } else {
            tracing::debug!(node = %name, "Registered node");
        }
        node_info.insert(name, info);
    }

    /// Get a node by name
    pub async fn get(&self, name: &str) -> NodeResult<Arc<dyn ImagePipelineNode>> {
        let nodes = self.nodes.read().await;

        nodes
            .get(name)
            .cloned()
            .ok_or_else(|| NodeError::argument(format!("Node '{}' not found", name)))
    }

    /// All registered node descriptions, ordered by name
    pub async fn list(&self) -> Vec<NodeInfo> {
        let node_info = self.node_info.read().await;

        let mut infos: Vec<NodeInfo> = node_info.values().cloned().collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Check if a node is registered
    pub async fn contains(&self, name: &str) -> bool {
        self.nodes.read().await.contains_key(name)
    }

    /// Node name to display name mapping, as shown in the pipeline editor
    pub async fn display_names(&self) -> HashMap<String, String> {
        let node_info = self.node_info.read().await;

        node_info
            .iter()
            .map(|(name, info)| (name.clone(), info.display_name.clone()))
            .collect()
    }

    /// Look up a node by name and run it with the host's raw inputs.
    pub async fn execute(&self, name: &str, inputs: NodeInputs) -> NodeResult<NodeOutput> {
        let node = self.get(name).await?;

        let result = node.execute(inputs).await;
        if let Err(e) = &result {
            tracing::debug!(node = %name, error = %e, "Node execution failed");
        }
        result
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
