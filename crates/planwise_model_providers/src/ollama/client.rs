//! Ollama API client.

use super::types::{ChatRequest, ChatResponse};
use planwise_models::llm::GenerationError;

/// HTTP client for the Ollama chat API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns the server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat request to the Ollama server.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, GenerationError> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| GenerationError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GenerationError::Http(err.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::provider(Some(status.as_u16()), body));
        }

        serde_json::from_str(&body).map_err(|err| {
            GenerationError::InvalidResponse(format!(
                "Failed to parse response: {err}\nBody: {body}"
            ))
        })
    }
}
