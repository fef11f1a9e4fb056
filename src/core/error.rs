//! Error types and handling for the prompt relay.
//!
//! Startup failures surface through [`Error`]; request-time failures stay in
//! their domain types and are mapped to HTTP responses by the transport.

use thiserror::Error;

/// A specialized Result type for relay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the prompt relay.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the completion provider.
    #[error("Completion error: {0}")]
    Completion(#[from] crate::domains::completion::CompletionError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
