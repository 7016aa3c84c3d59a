//! Agent configuration.

use planwise_models::llm::{GenerationOptions, OutputFormat};
use std::time::Duration;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "ollama/llama3.1:8b";

/// Default number of model invocations per turn.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default bound on a single model invocation.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for a [`TurnController`](crate::TurnController).
///
/// # Example
///
/// ```
/// use planwise_agent::AgentConfig;
/// use std::time::Duration;
///
/// let config = AgentConfig::new("ollama/llama3.1:8b")
///     .with_max_attempts(5)
///     .with_request_timeout(Some(Duration::from_secs(30)));
///
/// assert_eq!(config.max_attempts, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Model identifier in `provider/model` form.
    pub model_id: String,
    /// Model invocations allowed per turn. Never zero.
    pub max_attempts: usize,
    /// Bound on a single model invocation; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Structured-output hint sent with every request.
    pub output_format: Option<OutputFormat>,
    /// Sampling options sent with every request.
    pub options: GenerationOptions,
    /// Name of the tool that answers plan entities.
    pub tool: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl AgentConfig {
    /// Creates a config for `model_id` with default settings.
    #[must_use]
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            output_format: Some(OutputFormat::Json),
            options: GenerationOptions::default(),
            tool: "weather".to_string(),
        }
    }

    /// Sets the attempt bound. Values below one are raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets or disables the per-invocation timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets or clears the structured-output hint.
    #[must_use]
    pub fn with_output_format(mut self, format: Option<OutputFormat>) -> Self {
        self.output_format = format;
        self
    }

    /// Sets the sampling options.
    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the name of the lookup tool.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }
}
