//! Error types for model invocations.

/// Why a model invocation produced no text.
///
/// These describe transport and backend failures only. Text that arrives
/// but is not a usable plan is the agent's concern, not the provider's.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The request never completed (connection refused, broken body stream).
    #[error("http error: {0}")]
    Http(String),

    /// A request or response body could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered, but not in the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The backend reported an error.
    #[error("provider error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Provider {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error body or description.
        message: String,
    },
}

impl GenerationError {
    /// Creates a [`Provider`](Self::Provider) error.
    pub fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }
}
