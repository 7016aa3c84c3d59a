//! Model provider interface and registry for Planwise.
//!
//! Provides a unified interface for chat model access, decoupling the agent
//! pipeline from provider implementations.
//!
//! # Overview
//!
//! - Provider-agnostic: the agent depends only on this crate, not on a specific backend.
//!
//! - Swappable backends: provider crates register with a [`ModelRegistry`] at startup,
//!   so the model can be switched through configuration without code changes.
//!
//! - Untrusted output: a provider returns raw text. Turning that text into
//!   something structured is the caller's job.
//!
//! # Example
//!
//! ```ignore
//! use planwise_models::ModelRegistry;
//! use planwise_models::llm::{GenerationRequest, Message, OutputFormat};
//!
//! let llm = registry.llm("ollama/llama3.1:8b")?;
//!
//! let request = GenerationRequest::new(vec![
//!     Message::system("You are helpful"),
//!     Message::user("Hello!"),
//! ])
//! .output_format(OutputFormat::Json);
//!
//! let response = llm.generate(request).await?;
//! println!("{}", response.text);
//! ```

pub mod error;
pub mod llm;
mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use registry::ModelRegistry;
