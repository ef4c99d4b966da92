//! Error types for the CATCH client

use thiserror::Error;

/// Result alias used throughout the crate
pub type CatchResult<T> = Result<T, CatchError>;

/// Main error type for the CATCH client
#[derive(Debug, Error)]
pub enum CatchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Job ID was not a valid version-4 UUID
    #[error("Invalid job ID: '{input}' is not a version-4 UUID")]
    InvalidJobId {
        /// The rejected input
        input: String,
    },

    /// The server reported a search failure instead of results
    #[error("{message}")]
    SearchFailed {
        /// Server-provided message, or a generic fallback
        message: String,
    },

    /// The event stream could not be opened, dropped, or ended early
    #[error("Event stream unavailable: {0}")]
    StreamUnavailable(String),

    /// Table output requested without the table rendering capability
    #[error("Output format '{format}' is not supported by this build")]
    FormatUnsupported {
        /// The requested format
        format: String,
    },

    /// API error from the CATCH service
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or server message
        message: String,
    },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatchError {
    /// Build a `SearchFailed` from an optional server message.
    ///
    /// Absent messages degrade to `"unknown error"` rather than failing.
    pub fn search_failed(message: Option<String>) -> Self {
        CatchError::SearchFailed {
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }
}

impl From<reqwest::Error> for CatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatchError::Timeout
        } else if err.is_connect() || err.is_request() {
            CatchError::Network(err.to_string())
        } else {
            CatchError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatchError {
    fn from(err: serde_json::Error) -> Self {
        CatchError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for CatchError {
    fn from(err: url::ParseError) -> Self {
        CatchError::Configuration(format!("Invalid URL: {}", err))
    }
}
