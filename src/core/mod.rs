//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the relay:
//! error handling, configuration, server assembly and the HTTP transport.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::RelayServer;
pub use transport::{HttpConfig, HttpTransport};
