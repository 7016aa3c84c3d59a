//! LLM (Large Language Model) chat generation.
//!
//! This module provides the core trait and types for chat generation:
//!
//! - Role-tagged conversation messages
//! - A structured-output hint (plain JSON or a JSON schema)
//! - Sampling options passed through to the provider

mod error;
mod model;
mod provider;
mod types;

pub use error::GenerationError;
pub use model::Llm;
pub use provider::LlmProvider;
pub use types::{
    GenerationOptions, GenerationRequest, GenerationResponse, Message, OutputFormat, Role, Usage,
};
