//! Error reports for the pipeline host
//!
//! A failed node invocation ends with one `NodeError`. The host turns it into
//! an [`ErrorResponse`] to show in its UI, logging it at the level the error
//! asks for.

use pixxio_core::{ErrorMetadata, LogLevel, NodeError};
use serde::Serialize;

/// Serializable description of a failed node invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Whether re-running the node with the same inputs could succeed
    pub recoverable: bool,
}

impl ErrorResponse {
    /// Log `error` at its own level and build the report for it.
    pub fn report(node: &str, error: &NodeError) -> Self {
        log_error(node, error);
        Self::from(error)
    }
}

impl From<&NodeError> for ErrorResponse {
    fn from(error: &NodeError) -> Self {
        Self {
            error: error.to_string(),
            details: source_chain(error),
            error_type: Some(error.error_code().to_string()),
            recoverable: error.is_recoverable(),
        }
    }
}

/// Messages of every underlying cause, outermost first
fn source_chain(error: &NodeError) -> Option<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }

    if causes.is_empty() {
        None
    } else {
        Some(causes.join(": "))
    }
}

fn log_error(node: &str, error: &NodeError) {
    let error_type = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(node = %node, error = %error, error_type = error_type, "Node failed");
        }
        LogLevel::Warn => {
            tracing::warn!(node = %node, error = %error, error_type = error_type, "Node failed");
        }
        LogLevel::Error => {
            tracing::error!(node = %node, error = %error, error_type = error_type, "Node failed");
        }
    }
}
