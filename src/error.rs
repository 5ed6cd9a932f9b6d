//! Error Types Module
//!
//! Every failure the connector can produce for a single item. Errors never cross item
//! boundaries; the executor decides whether an error aborts the batch or becomes an
//! `{"error": ...}` payload for that item.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Errors raised while resolving parameters, building, signing or sending a request.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Credentials or client settings are missing or malformed. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The resource selector is not part of the dispatch table.
    #[error("The resource \"{0}\" is not known!")]
    UnknownResource(String),

    /// The operation selector is not valid for the given resource.
    #[error("The operation \"{operation}\" is not known!")]
    UnknownOperation { resource: String, operation: String },

    /// A required item parameter was absent or empty.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// An item parameter was present but had an unusable value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Network-level failure (DNS, connect, reset, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A 2xx response whose body is not JSON.
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl ConnectorError {
    /// HTTP status carried by the error, if it came from a provider response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConnectorError::Http { status, .. } => Some(*status),
            ConnectorError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for errors raised before a request was ever put on the wire.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            ConnectorError::Configuration(_)
                | ConnectorError::UnknownResource(_)
                | ConnectorError::UnknownOperation { .. }
                | ConnectorError::MissingParameter(_)
                | ConnectorError::InvalidParameter { .. }
        )
    }
}
