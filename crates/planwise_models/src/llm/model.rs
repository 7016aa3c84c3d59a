//! LLM handle for generation requests.

use super::error::GenerationError;
use super::provider::LlmProvider;
use super::types::{GenerationRequest, GenerationResponse};
use std::sync::Arc;

/// An LLM handle for making generation requests.
///
/// Created via [`ModelRegistry::llm()`](crate::ModelRegistry::llm).
#[derive(Clone)]
pub struct Llm {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl core::fmt::Debug for Llm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Llm").field("model", &self.model).finish()
    }
}

impl Llm {
    /// Creates a new LLM handle from provider and model name.
    ///
    /// Normally obtained through the registry; exposed so a provider can be
    /// wired directly in tests.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Sends a generation request to the model.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the request fails.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.provider.generate(&self.model, request).await
    }

    /// Returns the model name (without provider prefix).
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model
    }
}
