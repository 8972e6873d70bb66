//! Domain methods for the pixx.io client.

use bytes::Bytes;
use pixxio_core::{NodeError, NodeResult};
use reqwest::multipart::{Form, Part};

use crate::PixxioClient;

/// Files collection endpoint
pub const FILES_PATH: &str = "/api/v1/files";

const JPEG_MIME: &str = "image/jpeg";

/// Split a comma-separated keyword list into trimmed, non-empty, unique tokens
/// (first occurrence wins).
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

/// Metadata sent alongside an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub collection_id: i64,
}

impl UploadRequest {
    /// Text fields of the multipart form, in the order they are sent.
    pub fn form_fields(&self) -> NodeResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("fileName", self.file_name.clone()),
            ("description", self.description.clone()),
            ("keywords", serde_json::to_string(&self.keywords)?),
            ("collectionIDs", serde_json::to_string(&[self.collection_id])?),
        ])
    }

    fn into_form(self, data: Bytes) -> NodeResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.form_fields()? {
            form = form.text(name, value);
        }

        let part = file_part(data, self.file_name, JPEG_MIME)?;
        Ok(form.part("file", part))
    }
}

fn file_part(data: Bytes, file_name: String, mime: &str) -> NodeResult<Part> {
    let length = data.len() as u64;
    Part::stream_with_length(data, length)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| NodeError::conversion(format!("Failed to build upload form: {}", e)))
}

impl PixxioClient {
    /// Upload a JPEG into a collection.
    ///
    /// POST {base}/api/v1/files as multipart form data with bearer auth.
    pub async fn upload_file(&self, request: UploadRequest, jpeg: Bytes) -> NodeResult<()> {
        let collection_id = request.collection_id;
        let size_bytes = jpeg.len();
        let form = request.into_form(jpeg)?;

        let url = self.build_url(FILES_PATH);
        let http_request = self
            .apply_auth(self.client.post(&url))
            .timeout(self.config.upload_timeout())
            .multipart(form);

        let response = self
            .send("upload", "Failed to upload to pixx.io", http_request)
            .await?;

        tracing::info!(
            collection_id = collection_id,
            size_bytes = size_bytes,
            status = response.status().as_u16(),
            "Uploaded image to pixx.io collection"
        );

        Ok(())
    }

    /// Ask pixx.io for a temporary download URL of the original file.
    ///
    /// GET {base}/api/v1/files/{id}/convert?downloadType=original&responseType=path
    pub async fn resolve_download_url(&self, file_id: &str) -> NodeResult<String> {
        let url = self.build_url(&format!(
            "{}/{}/convert",
            FILES_PATH,
            urlencoding::encode(file_id)
        ));

        let http_request = self
            .apply_auth(self.client.get(&url))
            .timeout(self.config.resolve_timeout())
            .query(&[("downloadType", "original"), ("responseType", "path")]);

        let response = self
            .send(
                "download URL lookup",
                "Failed to get download URL from pixx.io API",
                http_request,
            )
            .await?;

        let body = response.bytes().await.map_err(|e| {
            NodeError::connection("Failed to get download URL from pixx.io API", e)
        })?;

        let download_url = extract_download_url(&body)?;

        tracing::debug!(file_id = %file_id, "Resolved pixx.io download URL");

        Ok(download_url)
    }

    /// Fetch the bytes behind a pre-signed download URL. No auth header is sent.
    pub async fn fetch_download(&self, download_url: &str) -> NodeResult<Bytes> {
        let http_request = self
            .client
            .get(download_url)
            .timeout(self.config.fetch_timeout());

        let response = self
            .send(
                "image download",
                "Failed to download image from pixx.io",
                http_request,
            )
            .await?;

        let data = response
            .bytes()
            .await
            .map_err(|e| NodeError::connection("Failed to download image from pixx.io", e))?;

        tracing::debug!(size_bytes = data.len(), "Downloaded image from pixx.io");

        Ok(data)
    }
}

fn extract_download_url(body: &[u8]) -> NodeResult<String> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    value
        .get("downloadURL")
        .and_then(serde_json::Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NodeError::ResponseFormat("No downloadURL in pixx.io API response".into()))
}
