//! Ollama [`LlmProvider`] implementation.

use super::client::OllamaClient;
use super::types::{ChatMessage, ChatOptions, ChatRequest, ChatResponse, Role};
use async_trait::async_trait;
use planwise_models::llm::{
    GenerationError, GenerationOptions, GenerationRequest, GenerationResponse, LlmProvider,
    Message, OutputFormat, Role as PlanwiseRole, Usage,
};
use serde_json::Value;

/// Server address used when `OLLAMA_HOST` is unset.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Ollama [`LlmProvider`] implementation.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: OllamaClient,
}

impl OllamaProvider {
    /// Creates a provider talking to the given server URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: OllamaClient::new(base_url),
        }
    }

    /// Creates a provider from the `OLLAMA_HOST` environment variable,
    /// falling back to [`DEFAULT_HOST`].
    #[must_use]
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::from_host(&host)
    }

    /// Creates a provider from an `OLLAMA_HOST`-style value such as
    /// `127.0.0.1:11434`, adding `http://` when no scheme is given.
    #[must_use]
    pub fn from_host(host: &str) -> Self {
        Self::new(normalize_host(host))
    }

    /// Returns the server URL this provider sends requests to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let ollama_request = convert_request(model, &request);

        tracing::debug!(
            model,
            messages = ollama_request.messages.len(),
            "sending ollama chat request"
        );

        let response = self.client.chat(&ollama_request).await?;

        Ok(convert_response(response))
    }
}

/// Accepts the bare `host:port` form the Ollama CLI itself understands.
fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

fn convert_request(model: &str, request: &GenerationRequest) -> ChatRequest {
    let messages = request.messages.iter().map(convert_message).collect();

    let format = request.output_format.as_ref().map(|format| match format {
        OutputFormat::Json => Value::String("json".to_string()),
        OutputFormat::Schema(schema) => schema.clone(),
    });

    ChatRequest {
        model: model.to_string(),
        messages,
        stream: false,
        format,
        options: convert_options(request.options),
    }
}

fn convert_message(message: &Message) -> ChatMessage {
    // Ollama has no developer role; corrective notes travel as system messages.
    let role = match message.role {
        PlanwiseRole::System | PlanwiseRole::Developer => Role::System,
        PlanwiseRole::User => Role::User,
        PlanwiseRole::Assistant => Role::Assistant,
    };

    ChatMessage {
        role,
        content: message.content.clone(),
    }
}

fn convert_options(options: GenerationOptions) -> Option<ChatOptions> {
    if options == GenerationOptions::default() {
        return None;
    }

    Some(ChatOptions {
        temperature: options.temperature,
        top_p: options.top_p,
        repeat_penalty: options.repeat_penalty,
    })
}

fn convert_response(response: ChatResponse) -> GenerationResponse {
    let total_tokens = match (response.prompt_eval_count, response.eval_count) {
        (Some(input), Some(output)) => Some(input + output),
        _ => None,
    };

    GenerationResponse {
        text: response.message.content,
        usage: Usage {
            input_tokens: response.prompt_eval_count,
            output_tokens: response.eval_count,
            total_tokens,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn developer_messages_become_system() {
        let request = GenerationRequest::new(vec![
            Message::system("rules"),
            Message::user("weather in delhi"),
            Message::developer("{\"type\":\"error\"}"),
            Message::assistant("{\"type\":\"plan\"}"),
        ]);

        let converted = convert_request("llama3.1:8b", &request);
        let roles: Vec<Role> = converted.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::System, Role::Assistant]
        );
        assert_eq!(converted.messages[2].content, "{\"type\":\"error\"}");
    }

    #[test]
    fn json_format_and_options_serialize() {
        let request = GenerationRequest::new(vec![Message::user("hi")])
            .output_format(OutputFormat::Json)
            .options(GenerationOptions {
                temperature: Some(0.5),
                top_p: None,
                repeat_penalty: Some(1.5),
            });

        let body = serde_json::to_value(convert_request("llama3.1:8b", &request)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "llama3.1:8b",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false,
                "format": "json",
                "options": {"temperature": 0.5, "repeat_penalty": 1.5}
            })
        );
    }

    #[test]
    fn schema_format_is_passed_verbatim() {
        let schema = json!({"type": "object"});
        let request = GenerationRequest::new(vec![Message::user("hi")])
            .output_format(OutputFormat::Schema(schema.clone()));

        let converted = convert_request("m", &request);
        assert_eq!(converted.format, Some(schema));
        assert!(converted.options.is_none());
    }

    #[test]
    fn response_text_and_usage() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "llama3.1:8b",
            "created_at": "2024-07-22T20:33:28.123648Z",
            "message": {"role": "assistant", "content": "{\"type\":\"plan\"}"},
            "done": true,
            "prompt_eval_count": 26,
            "eval_count": 12
        }))
        .unwrap();

        let converted = convert_response(response);
        assert_eq!(converted.text, "{\"type\":\"plan\"}");
        assert_eq!(converted.usage.input_tokens, Some(26));
        assert_eq!(converted.usage.output_tokens, Some(12));
        assert_eq!(converted.usage.total_tokens, Some(38));
    }

    #[test]
    fn response_without_counts() {
        let response: ChatResponse = serde_json::from_value(json!({
            "message": {"role": "assistant", "content": "hello"}
        }))
        .unwrap();

        let converted = convert_response(response);
        assert_eq!(converted.text, "hello");
        assert_eq!(converted.usage.total_tokens, None);
    }

    #[test]
    fn host_without_scheme_gets_http() {
        assert_eq!(normalize_host("127.0.0.1:11434"), "http://127.0.0.1:11434");
        assert_eq!(normalize_host("https://ollama.lan"), "https://ollama.lan");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider = OllamaProvider::new("http://localhost:11434/");
        assert_eq!(provider.base_url(), "http://localhost:11434");
    }
}
