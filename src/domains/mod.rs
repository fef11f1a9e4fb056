//! Domains module containing business logic organized by bounded contexts.
//!
//! - **prompts**: the positional prompt store and its service
//! - **completion**: the provider that turns prompt text into generated text

pub mod completion;
pub mod prompts;
