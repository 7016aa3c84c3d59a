//! Model provider backends for Planwise.
//!
//! Each provider implements [`LlmProvider`](planwise_models::llm::LlmProvider) and is
//! registered with the [`ModelRegistry`](planwise_models::ModelRegistry) under a short
//! name, allowing standardized access through `provider/model` identifiers.
//!
//! # Supported Providers
//!
//! | Provider | Feature Flag | Description |
//! |----------|--------------|-------------|
//! | Ollama | `ollama` (default) | Local Ollama chat API |
//!
//! # Usage
//!
//! ```no_run
//! # #[cfg(feature = "ollama")]
//! # {
//! use planwise_model_providers::OllamaProvider;
//! use planwise_models::ModelRegistry;
//! use std::sync::Arc;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register_llm_provider("ollama", Arc::new(OllamaProvider::from_env()));
//!
//! let llm = registry.llm("ollama/llama3.1:8b").unwrap();
//! # }
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;
