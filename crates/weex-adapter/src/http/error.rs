/*
[INPUT]:  Error sources (transport, API responses, serialization, config)
[OUTPUT]: Structured error types with status codes and raw payloads
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Weex adapter
#[derive(Error, Debug)]
pub enum WeexError {
    /// Transport-level failure (DNS, timeout, connection reset). Carries no
    /// HTTP status because no response was received.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the exchange; `body` is the raw response text.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// A private endpoint was invoked on a client built without credentials
    #[error("missing API credentials for private endpoint {endpoint}")]
    MissingCredentials { endpoint: String },

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Structurally valid HTTP response with an unusable payload
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl WeexError {
    /// Create an API error from status code and raw body text
    pub fn api_error(status: StatusCode, body: impl Into<String>) -> Self {
        WeexError::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// True for failures where no HTTP response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, WeexError::Http(_))
    }

    /// Status code of the exchange response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            WeexError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for Weex operations
pub type Result<T> = std::result::Result<T, WeexError>;
