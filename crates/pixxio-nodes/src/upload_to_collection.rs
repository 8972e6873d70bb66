//! Auto-upload node: pushes a pipeline image into a pixx.io collection
//!
//! The image is normalized to 8-bit RGB, encoded as JPEG and posted as
//! multipart form data. The node returns its input image unchanged so it can
//! sit in the middle of a pipeline.

use async_trait::async_trait;
use pixxio_api_client::{parse_keywords, PixxioClient, UploadRequest};
use pixxio_core::{
    InputKind, InputSpec, NodeError, NodeInfo, NodeInputs, NodeOutput, NodeResult, OutputSpec,
    TransferConfig,
};
use pixxio_processing::tensor_to_jpeg;

use crate::node::ImagePipelineNode;
use crate::validation::{require_positive, require_present};

pub const NODE_NAME: &str = "AutoUploadImageToPixxioCollection";
pub const DISPLAY_NAME: &str = "Auto-Upload Image to Pixxio Collection";
pub const CATEGORY: &str = "uploaders";

const DEFAULT_FILE_NAME: &str = "comfyui_upload.jpg";
const DEFAULT_DESCRIPTION: &str = "Uploaded via ComfyUI";
const DEFAULT_KEYWORDS: &str = "comfyui,pixxio,upload";

/// Validated upload parameters
struct UploadParams {
    api_key: String,
    mediaspace_url: String,
    request: UploadRequest,
}

impl UploadParams {
    fn from_inputs(inputs: &NodeInputs) -> NodeResult<Self> {
        let api_key = inputs.string("api_key")?;
        let mediaspace_url = inputs.string("mediaspace_url")?;
        require_present(
            &[api_key, mediaspace_url],
            "api_key and mediaspace_url are required",
        )?;

        let collection_id = inputs.int("collection_id")?;
        require_positive("collection_id", collection_id)?;

        Ok(Self {
            api_key: api_key.to_string(),
            mediaspace_url: mediaspace_url.to_string(),
            request: UploadRequest {
                file_name: inputs.string("file_name")?.to_string(),
                description: inputs.string("description")?.to_string(),
                keywords: parse_keywords(inputs.string("keywords")?),
                collection_id,
            },
        })
    }
}

/// Uploads the incoming image to a pixx.io collection and passes it through
#[derive(Debug, Clone, Default)]
pub struct AutoUploadImageToPixxioCollection {
    config: TransferConfig,
}

impl AutoUploadImageToPixxioCollection {
    pub fn new(config: TransferConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImagePipelineNode for AutoUploadImageToPixxioCollection {
    fn name(&self) -> &str {
        NODE_NAME
    }

    fn info(&self) -> NodeInfo {
        NodeInfo {
            name: NODE_NAME.to_string(),
            display_name: DISPLAY_NAME.to_string(),
            category: CATEGORY.to_string(),
            description: "Encode the image as JPEG and upload it into a pixx.io collection"
                .to_string(),
            inputs: vec![
                InputSpec::image("image"),
                InputSpec::string("api_key", ""),
                InputSpec::int("collection_id", 0),
                InputSpec::string("mediaspace_url", ""),
                InputSpec::string("file_name", DEFAULT_FILE_NAME),
                InputSpec::string("description", DEFAULT_DESCRIPTION),
                InputSpec::string("keywords", DEFAULT_KEYWORDS),
            ],
            outputs: vec![OutputSpec {
                name: "image",
                kind: InputKind::Image,
            }],
        }
    }

    async fn execute(&self, inputs: NodeInputs) -> NodeResult<NodeOutput> {
        let mut inputs = inputs.resolve(&self.info().inputs)?;
        let params = UploadParams::from_inputs(&inputs)?;
        let image = inputs.take_image("image")?;

        tracing::info!(
            collection_id = params.request.collection_id,
            file_name = %params.request.file_name,
            shape = ?image.shape(),
            "Executing pixx.io upload node"
        );

        let quality = self.config.jpeg_quality;
        let (image, jpeg) = tokio::task::spawn_blocking(move || {
            let jpeg = tensor_to_jpeg(&image, quality);
            (image, jpeg)
        })
        .await
        .map_err(|e| NodeError::conversion(format!("Image encoding task failed: {}", e)))?;
        let jpeg = jpeg?;

        let client = PixxioClient::new(&params.mediaspace_url, &params.api_key, &self.config)?;
        client.upload_file(params.request, jpeg).await?;

        Ok(NodeOutput::image(image))
    }
}
