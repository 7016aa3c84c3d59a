//! Line-oriented sessions.

use crate::context::Context;
use crate::turn::{TurnController, TurnOutcome};
use tracing::debug;

/// What a session did with an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// The user asked to leave.
    Exit,
    /// The line was blank and was ignored.
    Empty,
    /// The line was answered, or the turn failed softly.
    Reply(String),
}

/// One conversation: a [`Context`] plus the controller that runs its turns.
///
/// Sessions share nothing with each other. Two sessions built from clones of
/// the same controller keep separate histories.
///
/// # Example
///
/// ```ignore
/// let mut session = Session::new(controller);
/// match session.handle("weather in delhi").await {
///     SessionReply::Reply(text) => println!("Bot: {text}"),
///     SessionReply::Empty => {}
///     SessionReply::Exit => return,
/// }
/// ```
#[derive(Debug)]
pub struct Session {
    controller: TurnController,
    context: Context,
}

impl Session {
    /// Creates a session with the default system prompt.
    #[must_use]
    pub fn new(controller: TurnController) -> Self {
        Self::with_context(controller, Context::default())
    }

    /// Creates a session continuing from `context`.
    #[must_use]
    pub fn with_context(controller: TurnController, context: Context) -> Self {
        Self {
            controller,
            context,
        }
    }

    /// Returns `true` for `exit` or `quit`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn is_exit_command(line: &str) -> bool {
        let line = line.trim();
        line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
    }

    /// Handles one input line.
    pub async fn handle(&mut self, line: &str) -> SessionReply {
        if Self::is_exit_command(line) {
            return SessionReply::Exit;
        }

        let input = line.trim();
        if input.is_empty() {
            return SessionReply::Empty;
        }

        let outcome = self.run_turn(input).await;
        if !outcome.is_answered() {
            debug!(attempts = outcome.attempts(), "replying with fallback");
        }
        SessionReply::Reply(outcome.reply().to_string())
    }

    /// Runs a turn for `input` and returns the full outcome.
    pub async fn run_turn(&mut self, input: &str) -> TurnOutcome {
        self.controller.run_turn(&mut self.context, input).await
    }

    /// The conversation so far.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Forgets the conversation, keeping the system prompt.
    pub fn reset(&mut self) {
        self.context.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        for line in ["exit", "quit", "  EXIT ", "Quit\n"] {
            assert!(Session::is_exit_command(line), "{line:?}");
        }
        for line in ["exit now", "q", ""] {
            assert!(!Session::is_exit_command(line), "{line:?}");
        }
    }
}
