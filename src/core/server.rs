//! Relay server assembly.
//!
//! [`RelayServer`] ties the configuration to the prompt service and is the
//! state shared by every HTTP handler. Cloning it is cheap; all clones see
//! the same prompt store.

use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::Result;
use crate::domains::completion::{CompletionProvider, OpenAiProvider};
use crate::domains::prompts::{CompletionSettings, PromptService};

/// The relay server: configuration plus the prompt service.
#[derive(Clone)]
pub struct RelayServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service owning the prompt store.
    prompt_service: Arc<PromptService>,
}

impl RelayServer {
    /// Create a server backed by the OpenAI-compatible provider.
    ///
    /// Fails when no provider API key is configured.
    pub fn from_config(config: Config) -> Result<Self> {
        let provider = OpenAiProvider::from_config(&config.provider)?;
        info!("Completion provider endpoint: {}", provider.endpoint());
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a server with an explicit completion provider.
    pub fn with_provider(config: Config, provider: Arc<dyn CompletionProvider>) -> Self {
        let settings = CompletionSettings::from(&config.provider);
        let prompt_service = Arc::new(PromptService::new(provider, settings));

        Self {
            config: Arc::new(config),
            prompt_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the prompt service.
    pub fn prompts(&self) -> &PromptService {
        &self.prompt_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    #[test]
    fn test_from_config_without_api_key_fails() {
        let result = RelayServer::from_config(Config::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_config_with_api_key() {
        let mut config = Config::default();
        config.provider.api_key = Some("sk-test".to_string());

        let server = RelayServer::from_config(config).unwrap();
        assert_eq!(server.name(), "prompt-relay");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }
}
