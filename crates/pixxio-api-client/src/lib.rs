//! HTTP client for the pixx.io media space API.
//!
//! Provides a minimal client bound to one media space and API key, a shared
//! send/status-check helper, and the domain methods the nodes need (upload,
//! resolve download URL, fetch). A client is built per node invocation and
//! dropped when the invocation ends.

pub mod api;

use pixxio_core::{NodeError, NodeResult, TransferConfig};
use reqwest::{Client, RequestBuilder, Response};

/// Base URL for a media space host.
///
/// Bare host names get an `https://` scheme. Hosts that already carry an
/// `http://` or `https://` scheme are used as given. A trailing `/` is dropped.
pub fn base_url_for_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Body text of a failed response, or a placeholder if it could not be read.
fn error_body<E>(text: Result<String, E>) -> String {
    text.unwrap_or_else(|_| "Unknown error".to_string())
}

/// HTTP client for one pixx.io media space.
#[derive(Clone)]
pub struct PixxioClient {
    client: Client,
    base_url: String,
    api_key: String,
    config: TransferConfig,
}

impl std::fmt::Debug for PixxioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key is deliberately left out
        f.debug_struct("PixxioClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PixxioClient {
    pub fn new(host: &str, api_key: &str, config: &TransferConfig) -> NodeResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NodeError::connection("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url_for_host(host),
            api_key: api_key.to_string(),
            config: config.clone(),
        })
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    /// Send a request and turn transport failures and non-2xx statuses into
    /// `NodeError`s. `failure` is the message used for transport failures.
    async fn send(
        &self,
        operation: &'static str,
        failure: &str,
        request: RequestBuilder,
    ) -> NodeResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| NodeError::connection(failure, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            tracing::warn!(
                operation = operation,
                status = status.as_u16(),
                "pixx.io API request failed"
            );
            return Err(NodeError::RemoteHttp {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

pub use api::{parse_keywords, UploadRequest, FILES_PATH};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_for_bare_host() {
        assert_eq!(
            base_url_for_host("acme.px.media"),
            "https://acme.px.media"
        );
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        assert_eq!(
            base_url_for_host("acme.px.media/"),
            "https://acme.px.media"
        );
    }

    #[test]
    fn test_base_url_keeps_explicit_scheme() {
        assert_eq!(
            base_url_for_host("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            base_url_for_host("https://acme.px.media/"),
            "https://acme.px.media"
        );
    }

    #[test]
    fn test_error_body_falls_back_when_unreadable() {
        assert_eq!(error_body::<()>(Ok("quota exceeded".to_string())), "quota exceeded");
        assert_eq!(error_body(Err(())), "Unknown error");
    }

    #[test]
    fn test_build_url() {
        let client =
            PixxioClient::new("acme.px.media", "key", &TransferConfig::default()).unwrap();
        assert_eq!(
            client.build_url("/api/v1/files"),
            "https://acme.px.media/api/v1/files"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client =
            PixxioClient::new("acme.px.media", "super-secret", &TransferConfig::default())
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("acme.px.media"));
        assert!(!debug.contains("super-secret"));
    }
}
