//! Loader node: pulls an original file out of pixx.io as a pipeline image

use async_trait::async_trait;
use pixxio_api_client::PixxioClient;
use pixxio_core::{
    InputKind, InputSpec, NodeError, NodeInfo, NodeInputs, NodeOutput, NodeResult, OutputSpec,
    TransferConfig,
};
use pixxio_processing::decode_to_tensor;

use crate::node::ImagePipelineNode;
use crate::validation::require_present;

pub const NODE_NAME: &str = "LoadImageFromPixxioAPI";
pub const DISPLAY_NAME: &str = "Load Image from Pixx.io";
pub const CATEGORY: &str = "loaders";

/// Downloads a pixx.io file and decodes it into a float tensor `[1, H, W, C]`
#[derive(Debug, Clone, Default)]
pub struct LoadImageFromPixxioApi {
    config: TransferConfig,
}

impl LoadImageFromPixxioApi {
    pub fn new(config: TransferConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImagePipelineNode for LoadImageFromPixxioApi {
    fn name(&self) -> &str {
        NODE_NAME
    }

    fn info(&self) -> NodeInfo {
        NodeInfo {
            name: NODE_NAME.to_string(),
            display_name: DISPLAY_NAME.to_string(),
            category: CATEGORY.to_string(),
            description: "Download the original of a pixx.io file and decode it as an image"
                .to_string(),
            inputs: vec![
                InputSpec::string("file_id", ""),
                InputSpec::string("api_key", ""),
                InputSpec::string("mediaspace_url", ""),
            ],
            outputs: vec![OutputSpec {
                name: "image",
                kind: InputKind::Image,
            }],
        }
    }

    async fn execute(&self, inputs: NodeInputs) -> NodeResult<NodeOutput> {
        let inputs = inputs.resolve(&self.info().inputs)?;
        let file_id = inputs.string("file_id")?;
        let api_key = inputs.string("api_key")?;
        let mediaspace_url = inputs.string("mediaspace_url")?;
        require_present(
            &[file_id, api_key, mediaspace_url],
            "file_id, api_key, and mediaspace_url are required",
        )?;

        tracing::info!(file_id = %file_id, "Executing pixx.io load node");

        let client = PixxioClient::new(mediaspace_url, api_key, &self.config)?;
        let download_url = client.resolve_download_url(file_id).await?;
        let data = client.fetch_download(&download_url).await?;

        let tensor = tokio::task::spawn_blocking(move || decode_to_tensor(&data))
            .await
            .map_err(|e| NodeError::decode("Failed to process image", e))??;

        tracing::debug!(file_id = %file_id, shape = ?tensor.shape(), "Loaded image from pixx.io");

        Ok(NodeOutput::image(tensor))
    }
}
