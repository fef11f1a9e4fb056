//! Prompts domain module.
//!
//! Prompts are plain strings kept in memory and addressed by their position.
//!
//! ## Architecture
//!
//! - `store.rs` - Positional prompt sequence (append / replace / remove)
//! - `service.rs` - Store shared across requests, plus completion of stored prompts
//! - `error.rs` - Error taxonomy surfaced to HTTP callers

mod error;
mod service;
mod store;

pub use error::PromptError;
pub use service::{
    CompletionSettings, CreatedPrompt, DeletedPrompt, PromptCompletion, PromptService,
};
pub use store::PromptStore;
