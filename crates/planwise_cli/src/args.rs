//! Command-line arguments.

use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use planwise_agent::AgentConfig;
use planwise_agent::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL};
use planwise_agent::plan::PlanSchema;
use planwise_core::{TracingConfig, TracingFormat};
use planwise_models::llm::{GenerationOptions, OutputFormat};
use std::time::Duration;
use tracing::Level;

/// How the model is told to shape its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// Any JSON object.
    Json,
    /// JSON matching the plan schema.
    Schema,
}

/// Ask about city weather in plain language.
#[derive(Debug, Parser)]
#[command(
    name = "planwise",
    version,
    about = "Ask about city weather in plain language",
    long_about = "Interactive assistant that asks a local model for a lookup plan, \
                  then answers from a fixed temperature table.",
    after_help = "Examples:\n  planwise\n  planwise --model ollama/qwen2.5:7b --timeout-secs 30\n  \
                  PLANWISE_LOG_FORMAT=json planwise --log-level debug"
)]
pub struct Cli {
    /// Model identifier in provider/model form.
    #[arg(long, env = "PLANWISE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Ollama server address; `http://` is added when no scheme is given.
    #[arg(long, env = "OLLAMA_HOST")]
    pub ollama_host: Option<String>,

    /// Model invocations allowed per turn.
    #[arg(long, env = "PLANWISE_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub max_attempts: usize,

    /// Output constraint sent with every request.
    #[arg(long, env = "PLANWISE_FORMAT", value_enum, default_value_t = PlanFormat::Json)]
    pub format: PlanFormat,

    /// Seconds to wait for one model invocation; 0 waits indefinitely.
    #[arg(long, env = "PLANWISE_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Maximum log level written to stderr.
    #[arg(long, env = "PLANWISE_LOG", default_value = "warn")]
    pub log_level: Level,

    /// Log format: pretty, compact or json.
    #[arg(long, env = "PLANWISE_LOG_FORMAT", default_value = "compact")]
    pub log_format: TracingFormat,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.1)]
    pub temperature: f32,

    /// Nucleus sampling probability mass.
    #[arg(long, default_value_t = 0.9)]
    pub top_p: f32,

    /// Penalty applied to repeated tokens.
    #[arg(long, default_value_t = 1.1)]
    pub repeat_penalty: f32,
}

impl Cli {
    /// Agent settings derived from the arguments.
    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        let output_format = match self.format {
            PlanFormat::Json => OutputFormat::Json,
            PlanFormat::Schema => OutputFormat::schema::<PlanSchema>(),
        };
        AgentConfig::new(&self.model)
            .with_max_attempts(self.max_attempts)
            .with_request_timeout(timeout)
            .with_output_format(Some(output_format))
            .with_options(GenerationOptions {
                temperature: Some(self.temperature),
                top_p: Some(self.top_p),
                repeat_penalty: Some(self.repeat_penalty),
            })
    }

    /// Logging settings derived from the arguments.
    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        TracingConfig::new()
            .with_level(self.log_level)
            .with_format(self.log_format)
    }
}
