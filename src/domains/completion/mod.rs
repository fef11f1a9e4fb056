//! Completion domain module.
//!
//! Prompt text is turned into generated text by a [`CompletionProvider`].
//! The service only depends on the trait; the OpenAI-compatible HTTP
//! implementation lives in `openai.rs`.

mod error;
pub mod openai;
mod provider;

pub use error::CompletionError;
pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, CompletionProvider, CompletionRequest, Role};
