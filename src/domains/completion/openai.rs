//! OpenAI-compatible chat-completions provider.
//!
//! Posts a [`CompletionRequest`] to `{base_url}/chat/completions` and returns
//! the text of the first choice. Any server speaking the same wire format
//! (OpenAI, Azure-style proxies, local gateways) can be used by pointing
//! `base_url` at it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{CompletionError, CompletionProvider, CompletionRequest};
use crate::core::config::ProviderConfig;
use crate::core::{Error, Result};

/// Chat-completions response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible endpoint.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiProvider {
    /// Create a provider for `base_url` authenticating with `api_key`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> std::result::Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Create a provider from configuration.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config("OpenAI API key not found in environment variables"))?;

        Ok(Self::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?)
    }

    /// The full chat-completions URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<String, CompletionError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body)
                .unwrap_or_else(|| format!("Provider returned HTTP {}", status.as_u16()));
            warn!("Completion request failed ({}): {}", status, message);
            return Err(CompletionError::api(status.as_u16(), message));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        extract_content(parsed)
    }
}

/// Pull the trimmed text of the first choice.
fn extract_content(
    response: ChatCompletionResponse,
) -> std::result::Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or(CompletionError::EmptyResponse)
}

/// Read `error.message` from an error body, if it has one.
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Option<(Option<String>, serde_json::Value)>>>;

    /// Serve a fake chat-completions endpoint and return its base URL.
    async fn fake_upstream(status: StatusCode, reply: serde_json::Value, captured: Captured) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let captured = captured.clone();
                let reply = reply.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.to_string());
                    *captured.lock().unwrap() = Some((auth, body));
                    (status, Json(reply))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_extract_content_trims_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  Python is a language.\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();

        assert_eq!(extract_content(response).unwrap(), "Python is a language.");
    }

    #[test]
    fn test_extract_content_without_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(CompletionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("Incorrect API key provided")
        );
        assert_eq!(api_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = ProviderConfig {
            api_key: None,
            ..ProviderConfig::default()
        };
        let result = OpenAiProvider::from_config(&config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let provider =
            OpenAiProvider::new("key", "https://api.openai.com/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let captured: Captured = Arc::new(Mutex::new(None));
        let base_url = fake_upstream(
            StatusCode::OK,
            serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "A programming language."}}]
            }),
            captured.clone(),
        )
        .await;

        let provider = OpenAiProvider::new("sk-test", &base_url, Duration::from_secs(5)).unwrap();
        let request = CompletionRequest::single_user("gpt-3.5-turbo", "What is Python?", 500);
        let text = provider.complete(&request).await.unwrap();
        assert_eq!(text, "A programming language.");

        let (auth, body) = captured.lock().unwrap().take().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What is Python?");
    }

    #[tokio::test]
    async fn test_complete_passes_api_error_through() {
        let captured: Captured = Arc::new(Mutex::new(None));
        let base_url = fake_upstream(
            StatusCode::TOO_MANY_REQUESTS,
            serde_json::json!({"error": {"message": "Rate limit reached"}}),
            captured,
        )
        .await;

        let provider = OpenAiProvider::new("sk-test", &base_url, Duration::from_secs(5)).unwrap();
        let request = CompletionRequest::single_user("gpt-3.5-turbo", "hi", 500);
        let err = provider.complete(&request).await.unwrap_err();

        assert!(matches!(err, CompletionError::Api { status: 429, .. }));
        assert_eq!(err.to_string(), "Rate limit reached");
    }

    #[tokio::test]
    async fn test_complete_unreachable_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            OpenAiProvider::new("sk-test", &format!("http://{}", addr), Duration::from_secs(5))
                .unwrap();
        let request = CompletionRequest::single_user("gpt-3.5-turbo", "hi", 500);
        let err = provider.complete(&request).await.unwrap_err();

        assert!(matches!(err, CompletionError::Request(_)));
    }
}
