//! Prompt Relay Library
//!
//! An HTTP service that keeps user prompts in memory and relays them to an
//! OpenAI-compatible chat-completion API, plus a client for driving it.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, server assembly and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **prompts**: positional prompt store (indices shift down on removal)
//!   - **completion**: completion provider trait and the OpenAI-compatible implementation
//! - **client**: remote calls against a running relay
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_relay::core::{Config, HttpTransport, RelayServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = RelayServer::from_config(config.clone())?;
//!     HttpTransport::new(config.http).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::client::{ClientError, PromptClient};
pub use crate::core::{Config, Error, RelayServer, Result};
