//! HTTP client for a running prompt relay.
//!
//! [`PromptClient`] mirrors the four prompt operations as remote calls and
//! returns the same typed bodies the server produces. Construction never
//! touches the network; call [`PromptClient::check_connection`] to probe
//! the server explicitly.

mod error;

pub use error::ClientError;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domains::prompts::{CreatedPrompt, DeletedPrompt, PromptCompletion};

/// Default address of a locally running relay.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Remote prompt store client.
#[derive(Debug, Clone)]
pub struct PromptClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for PromptClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PromptClient {
    /// Create a client for the relay at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the server root.
    ///
    /// Never fails: an unreachable or unhealthy server is reported with a
    /// warning and `false`.
    pub async fn check_connection(&self) -> bool {
        let url = format!("{}/", self.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Relay reachable at {}", self.base_url);
                true
            }
            Ok(response) => {
                warn!(
                    "Server at {} answered {} on its root endpoint",
                    self.base_url,
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("Could not connect to server at {}: {}", self.base_url, e);
                warn!("Please ensure the relay is running (cargo run --bin prompt_relay)");
                warn!(
                    "Default port is 5000. If using a different port, pass its URL to PromptClient::new"
                );
                false
            }
        }
    }

    /// Store a new prompt.
    pub async fn create_prompt(&self, prompt: &str) -> Result<CreatedPrompt, ClientError> {
        let request = self
            .http
            .post(self.url("/prompt"))
            .json(&serde_json::json!({ "prompt": prompt }));
        self.send("create prompt", request).await
    }

    /// Get the completion for the prompt at `index`.
    pub async fn get_response(&self, index: i64) -> Result<PromptCompletion, ClientError> {
        let request = self.http.get(self.url(&format!("/prompt/{}", index)));
        self.send("get response", request).await
    }

    /// Replace the prompt at `index`.
    pub async fn update_prompt(
        &self,
        index: i64,
        new_prompt: &str,
    ) -> Result<CreatedPrompt, ClientError> {
        let request = self
            .http
            .put(self.url(&format!("/prompt/{}", index)))
            .json(&serde_json::json!({ "prompt": new_prompt }));
        self.send("update prompt", request).await
    }

    /// Remove the prompt at `index`.
    pub async fn delete_prompt(&self, index: i64) -> Result<DeletedPrompt, ClientError> {
        let request = self.http.delete(self.url(&format!("/prompt/{}", index)));
        self.send("delete prompt", request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::request(operation, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::request(operation, e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| {
            if status == StatusCode::NOT_FOUND && operation == "get response" {
                "Prompt not found".to_string()
            } else {
                format!("HTTP {}", status)
            }
        });

        Err(ClientError::server(operation, status.as_u16(), message))
    }
}

/// Read the `error` field of a relay error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(|s| s.to_string())
}
