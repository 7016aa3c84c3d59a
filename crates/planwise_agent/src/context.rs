//! Conversation context for one session.

use crate::prompt::WEATHER_PROMPT;
use planwise_models::llm::{GenerationRequest, Message, OutputFormat, Role};

/// Ordered message history sent to the model on every turn.
///
/// The first message is always the system prompt. Everything after it is
/// appended by a turn: user lines, committed plans, corrective notes, and
/// final answers. A context belongs to exactly one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    messages: Vec<Message>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(WEATHER_PROMPT)
    }
}

impl Context {
    /// Creates a context holding only `system_prompt`.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// The system prompt the context started with.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// All messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, system prompt included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`: the system prompt is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Drops everything except the system prompt.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }

    /// Builds a request carrying the whole history.
    #[must_use]
    pub fn to_request(&self, format: Option<OutputFormat>) -> GenerationRequest {
        let request = GenerationRequest::new(self.messages.clone());
        match format {
            Some(format) => request.output_format(format),
            None => request,
        }
    }

    pub(crate) fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    pub(crate) fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    pub(crate) fn push_developer(&mut self, content: impl Into<String>) {
        self.push(Role::Developer, content);
    }

    fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }
}
