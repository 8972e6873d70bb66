//! Error types module
//!
//! Every node invocation either succeeds or fails with exactly one `NodeError`.
//! Errors are never recovered locally: they abort the invocation and are handed
//! to the host, which decides how to present them.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures caused by the remote service or its data
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported to the host
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "ARGUMENT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether re-running the node with the same inputs could succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

pub type NodeResult<T> = Result<T, NodeError>;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// A required input is missing or invalid. Raised before any I/O.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The image input has an unsupported type, rank or channel count.
    #[error("Image conversion error: {0}")]
    Conversion(String),

    /// The remote service answered with a non-2xx status.
    #[error("pixx.io API error during {operation}: {status}{}", format_body(.body))]
    RemoteHttp {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("{message}: {source}")]
    RemoteConnection {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected pixx.io response: {0}")]
    ResponseFormat(String),

    /// Downloaded bytes could not be turned into an image tensor.
    #[error("{message}: {source}")]
    Decode {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {}", body)
    }
}

impl NodeError {
    pub fn argument(message: impl Into<String>) -> Self {
        NodeError::Argument(message.into())
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        NodeError::Conversion(message.into())
    }

    pub fn connection(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        NodeError::RemoteConnection {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn decode(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        NodeError::Decode {
            message: message.into(),
            source: source.into(),
        }
    }

    /// HTTP status of a `RemoteHttp` error
    pub fn status(&self) -> Option<u16> {
        match self {
            NodeError::RemoteHttp { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorMetadata for NodeError {
    fn error_code(&self) -> &'static str {
        match self {
            NodeError::Argument(_) => "ARGUMENT_ERROR",
            NodeError::Conversion(_) => "CONVERSION_ERROR",
            NodeError::RemoteHttp { .. } => "REMOTE_HTTP_ERROR",
            NodeError::RemoteConnection { .. } => "REMOTE_CONNECTION_ERROR",
            NodeError::ResponseFormat(_) => "RESPONSE_FORMAT_ERROR",
            NodeError::Decode { .. } => "DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            NodeError::RemoteConnection { .. } => true,
            NodeError::RemoteHttp { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            NodeError::Argument(_) | NodeError::Conversion(_) => LogLevel::Debug,
            NodeError::RemoteHttp { .. }
            | NodeError::ResponseFormat(_)
            | NodeError::RemoteConnection { .. } => LogLevel::Warn,
            NodeError::Decode { .. } => LogLevel::Error,
        }
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::ResponseFormat(format!("JSON parsing error: {}", err))
    }
}
