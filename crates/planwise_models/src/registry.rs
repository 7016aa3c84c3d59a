//! Model provider registry.

use crate::error::CreateModelError;
use crate::llm::{Llm, LlmProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for model provider implementations.
///
/// # For Consumers
///
/// Access models using provider/model identifiers (e.g., `"ollama/llama3.1:8b"`).
/// See [`llm()`](Self::llm) for details.
///
/// # For Provider Authors
///
/// Providers are registered once at startup, before the first turn runs.
///
/// ```
/// # use planwise_models::ModelRegistry;
/// # use planwise_models::llm::{LlmProvider, GenerationRequest, GenerationResponse, GenerationError};
/// # use async_trait::async_trait;
/// # use std::sync::Arc;
/// # struct MyProvider;
/// # #[async_trait]
/// # impl LlmProvider for MyProvider {
/// #   async fn generate(&self, _model: &str, _request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
/// #     unimplemented!()
/// #   }
/// # }
/// let mut registry = ModelRegistry::new();
/// registry.register_llm_provider("my_provider", Arc::new(MyProvider));
///
/// let llm = registry.llm("my_provider/some-model").unwrap();
/// assert_eq!(llm.model_name(), "some-model");
/// ```
#[derive(Default)]
pub struct ModelRegistry {
    // Maps provider names to implementations.
    llm_providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("llm_providers", &self.llm_provider_names())
            .finish()
    }
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            llm_providers: HashMap::new(),
        }
    }

    /// Creates a handle to an [`Llm`].
    ///
    /// # Arguments
    ///
    /// * `model_id` - Identifier in `"provider/model"` format (e.g., `"ollama/llama3.1:8b"`).
    ///   Only the first `/` separates the provider, so model names may contain slashes.
    ///
    /// # Errors
    ///
    /// Returns an error if the `model_id` structure is invalid or the provider is not registered.
    pub fn llm(&self, model_id: impl AsRef<str>) -> Result<Llm, CreateModelError> {
        let model_id = model_id.as_ref();

        let (provider_name, model_name) = model_id
            .split_once('/')
            .filter(|(provider, model)| !provider.is_empty() && !model.is_empty())
            .ok_or_else(|| CreateModelError::InvalidModelId(model_id.to_string()))?;

        let provider = self
            .get_llm_provider(provider_name)
            .ok_or_else(|| CreateModelError::UnknownProvider(provider_name.to_string()))?;

        Ok(Llm::new(provider, model_name))
    }

    /// Registers an LLM provider.
    ///
    /// # Arguments
    ///
    /// * `name` - Provider name used in identifiers (e.g., `"ollama"` for `"ollama/llama3.1:8b"`)
    /// * `provider` - The provider implementation
    ///
    /// # Panics
    ///
    /// Panics if a provider with the same name is already registered.
    pub fn register_llm_provider<P: LlmProvider>(
        &mut self,
        name: impl Into<String>,
        provider: Arc<P>,
    ) {
        let name = name.into();
        assert!(
            !self.llm_providers.contains_key(&name),
            "LLM provider '{name}' is already registered"
        );
        self.llm_providers
            .insert(name, provider as Arc<dyn LlmProvider>);
    }

    /// Returns a provider by name.
    #[must_use]
    pub fn get_llm_provider(&self, name: impl AsRef<str>) -> Option<Arc<dyn LlmProvider>> {
        self.llm_providers.get(name.as_ref()).cloned()
    }

    /// Checks if a provider is registered.
    #[must_use]
    pub fn has_llm_provider(&self, name: impl AsRef<str>) -> bool {
        self.llm_providers.contains_key(name.as_ref())
    }

    /// Lists registered provider names.
    #[must_use]
    pub fn llm_provider_names(&self) -> Vec<String> {
        self.llm_providers.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register_llm_provider("scripted", Arc::new(ScriptedProvider::new()));
        registry
    }

    #[test]
    fn resolves_provider_and_model() {
        let llm = registry().llm("scripted/llama3.1:8b").unwrap();
        assert_eq!(llm.model_name(), "llama3.1:8b");
    }

    #[test]
    fn model_name_may_contain_slashes() {
        let llm = registry().llm("scripted/library/llama3").unwrap();
        assert_eq!(llm.model_name(), "library/llama3");
    }

    #[test]
    fn rejects_id_without_separator() {
        let err = registry().llm("llama3").unwrap_err();
        assert!(matches!(err, CreateModelError::InvalidModelId(id) if id == "llama3"));
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(matches!(
            registry().llm("scripted/"),
            Err(CreateModelError::InvalidModelId(_))
        ));
        assert!(matches!(
            registry().llm("/model"),
            Err(CreateModelError::InvalidModelId(_))
        ));
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = registry().llm("openai/gpt-4o").unwrap_err();
        assert!(matches!(err, CreateModelError::UnknownProvider(name) if name == "openai"));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut registry = registry();
        registry.register_llm_provider("scripted", Arc::new(ScriptedProvider::new()));
    }

    #[test]
    fn lists_provider_names() {
        let registry = registry();
        assert!(registry.has_llm_provider("scripted"));
        assert!(!registry.has_llm_provider("ollama"));
        assert_eq!(registry.llm_provider_names(), vec!["scripted".to_string()]);
    }
}
