//! Error types for agent turns.

use crate::plan::ValidationError;
use planwise_models::llm::GenerationError;
use std::time::Duration;

/// Why a plan attempt, or a whole turn, did not produce an answer.
///
/// None of these end the session: a failed turn is reported to the user
/// and the next line is read as usual.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// No JSON object could be recovered from the model output.
    #[error("model output contained no JSON object")]
    Extraction,
    /// A JSON object was found but is not a valid plan.
    #[error("invalid plan: {0}")]
    Validation(#[from] ValidationError),
    /// The model invocation itself failed.
    #[error("model invocation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The model did not answer within the configured bound.
    #[error("model invocation timed out after {0:?}")]
    Timeout(Duration),
    /// Every attempt of the turn failed.
    #[error("no valid plan after {attempts} attempts")]
    RetryBudgetExhausted {
        /// Number of model invocations made.
        attempts: usize,
    },
}

impl TurnError {
    /// The corrective note appended to the context after this failure.
    ///
    /// Only failures where the model produced unusable output get a note.
    #[must_use]
    pub fn corrective_note(&self) -> Option<String> {
        let message = match self {
            Self::Extraction => "Please return valid JSON only in the required plan format.",
            Self::Validation(_) => "Expecting type=plan and a non-empty entities list. Retry.",
            Self::Generation(_) | Self::Timeout(_) | Self::RetryBudgetExhausted { .. } => {
                return None;
            }
        };
        Some(serde_json::json!({"type": "error", "error": message}).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_note() {
        assert_eq!(
            TurnError::Extraction.corrective_note().unwrap(),
            r#"{"type":"error","error":"Please return valid JSON only in the required plan format."}"#
        );
    }

    #[test]
    fn validation_note() {
        let note = TurnError::Validation(ValidationError::EmptyEntities)
            .corrective_note()
            .unwrap();
        assert_eq!(
            note,
            r#"{"type":"error","error":"Expecting type=plan and a non-empty entities list. Retry."}"#
        );
    }

    #[test]
    fn invocation_failures_have_no_note() {
        assert!(TurnError::Timeout(Duration::from_secs(1)).corrective_note().is_none());
        assert!(
            TurnError::Generation(GenerationError::Http("refused".into()))
                .corrective_note()
                .is_none()
        );
    }
}
