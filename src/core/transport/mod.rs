//! Transport layer for the prompt relay.
//!
//! The relay speaks JSON over HTTP. `http.rs` builds the axum router and
//! maps domain errors onto status codes; `config.rs` holds the bind
//! settings.

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};
