//! Completion provider error types.

use thiserror::Error;

/// Errors returned by a completion provider.
///
/// Upstream messages are carried through unchanged.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("{0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The provider answered but the body could not be decoded.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The provider answered without any generated text.
    #[error("Provider returned no completion")]
    EmptyResponse,
}

impl CompletionError {
    /// Create a new request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create a new API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Request(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
