//! Deterministic provider for tests.
//!
//! Enabled with the `test-utils` feature.

use crate::llm::{GenerationError, GenerationRequest, GenerationResponse, LlmProvider};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A provider that replays a fixed script of replies.
///
/// Every request is recorded so tests can assert how many times the model
/// was invoked and what conversation it saw. Once the script runs out,
/// further calls fail with a [`GenerationError::Provider`].
///
/// ```ignore
/// use planwise_models::llm::{GenerationRequest, Llm, Message};
/// use planwise_models::testing::ScriptedProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(ScriptedProvider::with_replies(["{\"ok\":true}"]));
/// let llm = Llm::new(provider.clone(), "scripted");
///
/// let request = GenerationRequest::new(vec![Message::user("hi")]);
/// let response = llm.generate(request).await?;
/// assert_eq!(response.text, "{\"ok\":true}");
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    /// Creates a provider with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that answers with each reply in order.
    #[must_use]
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for reply in replies {
            provider.push_reply(reply);
        }
        provider
    }

    /// Appends a text reply to the script.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.script.lock().push_back(Ok(reply.into()));
    }

    /// Appends a failed call to the script.
    pub fn push_error(&self, error: GenerationError) {
        self.script.lock().push_back(Err(error));
    }

    /// Returns the number of generation calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of scripted replies not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(
        &self,
        _model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.requests.lock().push(request);

        match self.script.lock().pop_front() {
            Some(Ok(text)) => Ok(GenerationResponse::text(text)),
            Some(Err(err)) => Err(err),
            None => Err(GenerationError::provider(
                None,
                "scripted provider has no replies left",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    #[tokio::test]
    async fn replays_script_then_fails() {
        let provider = ScriptedProvider::with_replies(["first"]);
        provider.push_error(GenerationError::Http("connection refused".to_string()));

        let request = GenerationRequest::new(vec![Message::user("hi")]);
        let first = provider.generate("m", request.clone()).await.unwrap();
        assert_eq!(first.text, "first");

        let second = provider.generate("m", request.clone()).await;
        assert!(matches!(second, Err(GenerationError::Http(_))));

        let third = provider.generate("m", request).await;
        assert!(matches!(third, Err(GenerationError::Provider { .. })));

        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = ScriptedProvider::with_replies(["a", "b"]);
        provider
            .generate("m", GenerationRequest::new(vec![Message::user("one")]))
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, "one");
        assert_eq!(provider.remaining(), 1);
    }
}
