//! The [`LlmProvider`] trait for LLM model providers.

use super::error::GenerationError;
use super::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;

/// Trait implemented by LLM providers for chat generation.
///
/// Provider crates implement this trait to handle generation requests.
/// Implementations must not try to repair or validate the model's text;
/// the response is returned exactly as the backend produced it.
#[async_trait]
pub trait LlmProvider: Send + Sync + 'static {
    /// Sends a generation request to the provider.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name on which to perform generation
    /// * `request` - The generation request
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}
