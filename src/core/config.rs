//! Configuration management for the prompt relay.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file when present), falling back to
//! defaults.

use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default chat model used for completions.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default cap on generated tokens per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Main configuration structure for the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub http: HttpConfig,

    /// Completion provider configuration.
    pub provider: ProviderConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as shown in logs.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Completion provider configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key sent as a bearer token. Required to start the server.
    pub api_key: Option<String>,

    /// Root of the OpenAI-compatible API, without `/chat/completions`.
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Maximum number of generated tokens.
    pub max_tokens: u32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "prompt-relay".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            http: HttpConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Relay settings use the `RELAY_` prefix; provider credentials keep the
    /// conventional `OPENAI_API_KEY` / `OPENAI_BASE_URL` names.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("RELAY_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("RELAY_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.http = HttpConfig::from_env();

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.provider.api_key = Some(api_key);
        }

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.provider.base_url = base_url;
        }

        if let Ok(model) = std::env::var("RELAY_MODEL") {
            config.provider.model = model;
        }

        if let Ok(max_tokens) = std::env::var("RELAY_MAX_TOKENS") {
            config.provider.max_tokens = max_tokens.parse().unwrap_or(DEFAULT_MAX_TOKENS);
        }

        if let Ok(timeout) = std::env::var("RELAY_PROVIDER_TIMEOUT_SECS") {
            config.provider.timeout_secs = timeout.parse().unwrap_or(60);
        }

        config
    }

    /// Whether a non-empty provider API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.provider
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Report where the provider credentials stand.
    ///
    /// Call once logging is initialized; `from_env` runs before it.
    pub fn log_credentials(&self) {
        if self.has_api_key() {
            info!("OpenAI API key loaded from environment");
        } else {
            warn!("OPENAI_API_KEY not set - the server will refuse to start");
        }
    }
}
