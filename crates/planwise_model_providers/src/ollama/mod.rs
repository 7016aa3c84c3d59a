//! Ollama provider backend.
//!
//! Uses the non-streaming `/api/chat` endpoint.
//!
//! ```no_run
//! # use planwise_model_providers::ollama::OllamaProvider;
//! let provider = OllamaProvider::new("http://localhost:11434");
//! ```

mod client;
mod provider;
mod types;

pub use provider::{DEFAULT_HOST, OllamaProvider};
