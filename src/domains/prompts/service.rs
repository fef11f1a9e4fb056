//! Prompt service implementation.
//!
//! The service owns the [`PromptStore`] and the completion provider. Every
//! store operation takes the lock for its whole read-modify-return, so each
//! call is atomic with respect to the sequence. Completion copies the prompt
//! out under a read lock and releases it before calling the provider.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::{PromptError, PromptStore};
use crate::core::config::ProviderConfig;
use crate::domains::completion::{CompletionProvider, CompletionRequest};

/// Confirmation message returned by [`PromptService::delete`].
pub const DELETED_MESSAGE: &str = "Prompt deleted successfully";

/// Model parameters applied to every completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl From<&ProviderConfig> for CompletionSettings {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

/// Result of creating or replacing a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPrompt {
    pub index: usize,
    pub prompt: String,
}

/// A stored prompt together with its generated completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCompletion {
    pub prompt: String,
    pub response: String,
}

/// Result of removing a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedPrompt {
    pub message: String,
    pub deleted_prompt: String,
}

/// Service for storing prompts and completing them.
pub struct PromptService {
    store: RwLock<PromptStore>,
    provider: Arc<dyn CompletionProvider>,
    settings: CompletionSettings,
}

impl PromptService {
    /// Create a new prompt service with an empty store.
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: CompletionSettings) -> Self {
        info!(
            "Initializing PromptService (provider: {}, model: {}, max_tokens: {})",
            provider.name(),
            settings.model,
            settings.max_tokens
        );

        Self {
            store: RwLock::new(PromptStore::new()),
            provider,
            settings,
        }
    }

    /// Number of stored prompts.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Store a new prompt at the end of the sequence.
    pub async fn create(&self, text: &str) -> Result<CreatedPrompt, PromptError> {
        let index = self.store.write().await.append(text).inspect_err(|e| {
            warn!("Rejected prompt: {}", e);
        })?;

        info!("Created prompt {}", index);
        Ok(CreatedPrompt {
            index,
            prompt: text.to_string(),
        })
    }

    /// Send the prompt at `index` to the completion provider.
    pub async fn complete(&self, index: i64) -> Result<PromptCompletion, PromptError> {
        let prompt = self.store.read().await.get(index)?.to_string();

        let request = CompletionRequest::single_user(
            self.settings.model.clone(),
            prompt.clone(),
            self.settings.max_tokens,
        );

        let response = self.provider.complete(&request).await.map_err(|e| {
            error!("{} completion failed for prompt {}: {}", self.provider.name(), index, e);
            PromptError::from(e)
        })?;

        info!("Completed prompt {} ({} chars)", index, response.len());
        Ok(PromptCompletion { prompt, response })
    }

    /// Overwrite the prompt at `index`.
    pub async fn update(&self, index: i64, text: &str) -> Result<CreatedPrompt, PromptError> {
        let index = self.store.write().await.replace(index, text)?;

        info!("Updated prompt {}", index);
        Ok(CreatedPrompt {
            index,
            prompt: text.to_string(),
        })
    }

    /// Remove the prompt at `index`; later prompts shift down by one.
    pub async fn delete(&self, index: i64) -> Result<DeletedPrompt, PromptError> {
        let deleted_prompt = self.store.write().await.remove(index)?;

        info!("Deleted prompt {}", index);
        Ok(DeletedPrompt {
            message: DELETED_MESSAGE.to_string(),
            deleted_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::completion::{CompletionError, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Replies with the prompt text and remembers every request.
    #[derive(Default)]
    struct EchoProvider {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(format!("answer to: {}", request.messages[0].content))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Err(CompletionError::api(401, "Incorrect API key provided"))
        }
    }

    fn settings() -> CompletionSettings {
        CompletionSettings {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
        }
    }

    #[tokio::test]
    async fn test_create_and_complete() {
        let provider = Arc::new(EchoProvider::default());
        let service = PromptService::new(provider.clone(), settings());

        let created = service.create("What is Python?").await.unwrap();
        assert_eq!(created.index, 0);
        assert_eq!(created.prompt, "What is Python?");

        let completion = service.complete(0).await.unwrap();
        assert_eq!(completion.prompt, "What is Python?");
        assert_eq!(completion.response, "answer to: What is Python?");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
        assert_eq!(requests[0].max_tokens, 500);
        assert!(!requests[0].stream);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_create_empty_prompt_leaves_store_unchanged() {
        let service = PromptService::new(Arc::new(EchoProvider::default()), settings());
        assert_ok!(service.create("kept").await);

        let err = assert_err!(service.create("").await);
        assert!(matches!(err, PromptError::InvalidInput));
        assert_eq!(service.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_is_reflected_by_complete() {
        let service = PromptService::new(Arc::new(EchoProvider::default()), settings());
        service.create("What is Python?").await.unwrap();

        let updated = service
            .update(0, "What are the benefits of Python?")
            .await
            .unwrap();
        assert_eq!(updated.index, 0);
        assert_eq!(service.len().await, 1);

        let completion = service.complete(0).await.unwrap();
        assert_eq!(completion.prompt, "What are the benefits of Python?");
    }

    #[tokio::test]
    async fn test_delete_shifts_indices() {
        let service = PromptService::new(Arc::new(EchoProvider::default()), settings());
        for text in ["A", "B", "C"] {
            service.create(text).await.unwrap();
        }

        let deleted = service.delete(0).await.unwrap();
        assert_eq!(deleted.message, DELETED_MESSAGE);
        assert_eq!(deleted.deleted_prompt, "A");
        assert_eq!(service.len().await, 2);

        let completion = service.complete(0).await.unwrap();
        assert_eq!(completion.prompt, "B");
    }

    #[tokio::test]
    async fn test_operations_on_empty_store_fail() {
        let service = PromptService::new(Arc::new(EchoProvider::default()), settings());

        assert!(matches!(
            service.complete(0).await,
            Err(PromptError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            service.update(0, "x").await,
            Err(PromptError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            service.delete(0).await,
            Err(PromptError::IndexOutOfRange { .. })
        ));
        assert_eq!(service.len().await, 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_passed_through() {
        let service = PromptService::new(Arc::new(FailingProvider), settings());
        service.create("What is Python?").await.unwrap();

        let err = service.complete(0).await.unwrap_err();
        assert!(matches!(
            err,
            PromptError::Provider(CompletionError::Api { status: 401, .. })
        ));
        assert_eq!(
            err.to_string(),
            "Error getting response from OpenAI: Incorrect API key provided"
        );
        assert_eq!(service.len().await, 1);
    }
}
