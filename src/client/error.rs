//! Client error types.

use thiserror::Error;

/// Errors returned by [`PromptClient`](super::PromptClient) calls.
///
/// Both variants render as `Failed to <operation>: <message>`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed before a usable response arrived.
    #[error("Failed to {operation}: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    /// The server answered with an error status.
    #[error("Failed to {operation}: {message}")]
    Server {
        operation: &'static str,
        status: u16,
        message: String,
    },
}

impl ClientError {
    /// Create a new request error.
    pub fn request(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Request {
            operation,
            message: message.into(),
        }
    }

    /// Create a new server error.
    pub fn server(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            operation,
            status,
            message: message.into(),
        }
    }

    /// The server's or transport's message, without the operation prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Request { message, .. } | Self::Server { message, .. } => message,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { .. } => None,
            Self::Server { status, .. } => Some(*status),
        }
    }
}
