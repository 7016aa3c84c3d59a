//! Error types for the model registry.

/// Why a `provider/model` identifier could not be turned into an [`Llm`](crate::llm::Llm).
#[derive(Debug, thiserror::Error)]
pub enum CreateModelError {
    /// The identifier is not of the form `provider/model`.
    #[error("model id '{0}' is not of the form 'provider/model'")]
    InvalidModelId(String),

    /// No provider is registered under this name.
    #[error("no model provider named '{0}' is registered")]
    UnknownProvider(String),
}
