//! Prompt-specific error types.

use thiserror::Error;

use crate::domains::completion::CompletionError;

/// Errors that can occur during prompt store operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The prompt text was empty, missing, or not a string.
    #[error("Invalid prompt")]
    InvalidInput,

    /// The index does not address a stored prompt.
    #[error("Invalid prompt index")]
    IndexOutOfRange {
        /// The index the caller asked for.
        index: i64,
        /// Store length at the time of the call.
        len: usize,
    },

    /// The completion provider failed.
    #[error("Error getting response from OpenAI: {0}")]
    Provider(#[from] CompletionError),
}

impl PromptError {
    /// Create a new "index out of range" error.
    pub fn out_of_range(index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
