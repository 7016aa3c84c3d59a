//! Core types for LLM generation requests and responses.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────
// Request / Response
// ─────────────────────

/// A generation request to a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The ordered conversation to send to the model.
    pub messages: Vec<Message>,
    /// Hint asking the model for structured output.
    ///
    /// Providers forward this to backends that support constrained decoding.
    /// The hint does not guarantee well-formed output.
    pub output_format: Option<OutputFormat>,
    /// Sampling options.
    #[serde(default)]
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Creates a new generation request from an ordered conversation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use planwise_models::llm::{GenerationRequest, Message};
    ///
    /// let request = GenerationRequest::new(vec![
    ///     Message::system("Answer in JSON"),
    ///     Message::user("What's the weather like?"),
    /// ]);
    /// assert_eq!(request.messages.len(), 2);
    /// ```
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            output_format: None,
            options: GenerationOptions::default(),
        }
    }

    /// Sets the structured-output hint.
    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Sets the sampling options.
    #[must_use]
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// A generation response from a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The raw generated text.
    pub text: String,
    /// Token usage information.
    pub usage: Usage,
}

impl GenerationResponse {
    /// Creates a response carrying only text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: Usage::default(),
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input.
    pub input_tokens: Option<u64>,
    /// Number of tokens in the output.
    pub output_tokens: Option<u64>,
    /// Total tokens (input + output).
    pub total_tokens: Option<u64>,
}

// ─────────────────────
// Output format
// ─────────────────────

/// Structured output hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Any JSON value.
    Json,
    /// JSON conforming to the given schema.
    Schema(Value),
}

impl OutputFormat {
    /// Builds a [`OutputFormat::Schema`] from the JSON schema of `T`.
    #[must_use]
    pub fn schema<T: JsonSchema>() -> Self {
        let schema = schema_for!(T);
        Self::Schema(serde_json::to_value(schema).unwrap_or(Value::Null))
    }
}

/// Sampling options. Unset fields fall back to the provider's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling probability mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Penalty applied to repeated tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
}

// ─────────────────────
// Messages
// ─────────────────────

/// The author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standing instructions for the model.
    System,
    /// A line typed by the user.
    User,
    /// Output attributed to the assistant.
    Assistant,
    /// Corrective instructions injected by the application.
    Developer,
}

impl Role {
    /// Returns the lowercase wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Developer => "developer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl Message {
    /// Creates a message with the given role.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a developer message.
    #[must_use]
    pub fn developer(content: impl Into<String>) -> Self {
        Self::new(Role::Developer, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_lowercase_role() {
        let value = serde_json::to_value(Message::developer("retry")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "developer", "content": "retry"}));
    }

    #[test]
    fn request_builder_sets_format_and_options() {
        let options = GenerationOptions {
            temperature: Some(0.1),
            ..GenerationOptions::default()
        };
        let request = GenerationRequest::new(vec![Message::user("hi")])
            .output_format(OutputFormat::Json)
            .options(options);

        assert_eq!(request.output_format, Some(OutputFormat::Json));
        assert_eq!(request.options.temperature, Some(0.1));
        assert_eq!(request.options.top_p, None);
    }

    #[test]
    fn unset_options_are_omitted() {
        let value = serde_json::to_value(GenerationOptions::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[derive(JsonSchema)]
    #[expect(dead_code, reason = "only the schema is inspected")]
    struct Probe {
        name: String,
    }

    #[test]
    fn schema_format_describes_type() {
        let OutputFormat::Schema(schema) = OutputFormat::schema::<Probe>() else {
            panic!("expected schema format");
        };
        assert_eq!(schema["properties"]["name"]["type"], "string");
    }
}
