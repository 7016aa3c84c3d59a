//! Plan-then-execute assistant built on a local model and deterministic tools.
//!
//! The model is only asked which entities to look up and whether to list or
//! sum their readings. Every number in an answer comes from a tool.

/// Model abstraction: messages, requests, providers and the registry.
pub use planwise_models as models;

/// Concrete model providers.
pub use planwise_model_providers as model_providers;

/// Lookup tools and per-entity observation.
pub use planwise_tools as tools;

/// Plan extraction, validation, retries and sessions.
pub use planwise_agent as agent;

/// Logging setup.
pub use planwise_core as logging;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use planwise_agent::{
        AgentConfig, Aggregator, Context, Intent, Measure, Plan, Session, SessionReply,
        TurnController, TurnError, TurnOutcome,
    };
    pub use planwise_core::{TracingConfig, TracingFormat};
    pub use planwise_models::ModelRegistry;
    pub use planwise_models::llm::{GenerationOptions, Llm, Message, OutputFormat, Role};
    #[cfg(feature = "ollama")]
    pub use planwise_model_providers::OllamaProvider;
    pub use planwise_tools::{LookupTool, Observations, StaticTable, Tool, ToolRegistry};
}
