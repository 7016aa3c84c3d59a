//! The per-turn state machine.
//!
//! A turn starts when the user submits a line and ends with either an answer
//! or a soft failure:
//!
//! ```text
//! AwaitingPlan ──valid plan──▶ ToolExecution ──▶ Aggregation ──▶ Respond
//!      │  ▲
//!      │  └── invalid output, attempts remain
//!      └───── attempts exhausted ──▶ Fail
//! ```
//!
//! Every model invocation counts against the same per-turn bound, whether
//! it failed at the transport, timed out, or produced an unusable plan.

use crate::aggregate::Aggregator;
use crate::config::AgentConfig;
use crate::context::Context;
use crate::error::TurnError;
use crate::extract::extract_plan_object;
use crate::normalize::normalize_keys;
use crate::plan::Plan;
use planwise_models::llm::Llm;
use planwise_tools::{Observations, Tool, observe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reply shown when a turn exhausts its attempts.
pub const FAILURE_REPLY: &str =
    "Failed to get a valid plan from the model after retries. Please rephrase.";

/// A state of one turn.
#[derive(Debug)]
pub enum TurnState {
    /// Waiting for the model to produce a valid plan.
    AwaitingPlan {
        /// One-based number of the next model invocation.
        attempt: usize,
    },
    /// Looking up every entity of the committed plan.
    ToolExecution(Plan),
    /// Combining observations into an answer.
    Aggregation(Plan, Observations),
    /// Recording the answer in the context.
    Respond(Plan, String),
    /// No valid plan within the attempt bound.
    Fail,
}

impl TurnState {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingPlan { .. } => "awaiting_plan",
            Self::ToolExecution(_) => "tool_execution",
            Self::Aggregation(..) => "aggregation",
            Self::Respond(..) => "respond",
            Self::Fail => "fail",
        }
    }
}

/// How a turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// A plan was committed and answered.
    Answered {
        /// The final answer text.
        answer: String,
        /// The committed plan.
        plan: Plan,
        /// Model invocations used, including the successful one.
        attempts: usize,
    },
    /// Every attempt failed.
    Failed {
        /// Model invocations used.
        attempts: usize,
        /// The failure of the last attempt.
        last_error: TurnError,
    },
}

impl TurnOutcome {
    /// The line shown to the user.
    #[must_use]
    pub fn reply(&self) -> &str {
        match self {
            Self::Answered { answer, .. } => answer,
            Self::Failed { .. } => FAILURE_REPLY,
        }
    }

    /// Model invocations used by the turn.
    #[must_use]
    pub fn attempts(&self) -> usize {
        match self {
            Self::Answered { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// Returns `true` if the turn produced an answer.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }

    /// Converts into the answer, or [`TurnError::RetryBudgetExhausted`].
    ///
    /// # Errors
    ///
    /// Returns an error if the turn failed.
    pub fn into_answer(self) -> Result<String, TurnError> {
        match self {
            Self::Answered { answer, .. } => Ok(answer),
            Self::Failed { attempts, .. } => Err(TurnError::RetryBudgetExhausted { attempts }),
        }
    }
}

/// Drives turns: asks the model for a plan, retries on bad output, runs the
/// tool, and builds the answer.
///
/// The controller holds no conversation state; each call to
/// [`run_turn`](Self::run_turn) works on the [`Context`] it is given.
#[derive(Clone)]
pub struct TurnController {
    llm: Llm,
    tool: Arc<dyn Tool>,
    aggregator: Aggregator,
    config: AgentConfig,
}

impl core::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TurnController")
            .field("llm", &self.llm)
            .field("tool", &self.tool.definition().name)
            .field("aggregator", &self.aggregator)
            .field("config", &self.config)
            .finish()
    }
}

impl TurnController {
    /// Creates a controller answering plans with `tool`.
    #[must_use]
    pub fn new(llm: Llm, tool: Arc<dyn Tool>, config: AgentConfig) -> Self {
        Self {
            llm,
            tool,
            aggregator: Aggregator::default(),
            config,
        }
    }

    /// Replaces the answer phrasing.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Returns the aggregator phrasing answers.
    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Runs one turn for `input`, appending to `context` as it goes.
    ///
    /// The user line is appended first. A committed plan and the final answer
    /// are appended as assistant messages; each unusable model output is
    /// followed by a corrective developer message. On failure the context is
    /// left as it stands.
    pub async fn run_turn(&self, context: &mut Context, input: &str) -> TurnOutcome {
        context.push_user(input);

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempts = 0;
        let mut last_error = None;
        let mut state = TurnState::AwaitingPlan { attempt: 1 };

        loop {
            debug!(state = state.name(), attempts, "turn transition");

            state = match state {
                TurnState::AwaitingPlan { attempt } => {
                    attempts = attempt;
                    match self.request_plan(context).await {
                        Ok(plan) => {
                            context.push_assistant(plan.to_message_json());
                            TurnState::ToolExecution(plan)
                        }
                        Err(err) => {
                            warn!(attempt, max_attempts, error = %err, "plan attempt failed");
                            if let Some(note) = err.corrective_note() {
                                context.push_developer(note);
                            }
                            last_error = Some(err);
                            if attempt < max_attempts {
                                TurnState::AwaitingPlan {
                                    attempt: attempt + 1,
                                }
                            } else {
                                TurnState::Fail
                            }
                        }
                    }
                }
                TurnState::ToolExecution(plan) => {
                    let observations = observe(self.tool.as_ref(), plan.entities()).await;
                    if let Ok(json) = serde_json::to_string(&observations) {
                        debug!(observations = %json, "tool observations");
                    }
                    TurnState::Aggregation(plan, observations)
                }
                TurnState::Aggregation(plan, observations) => {
                    let answer = self.aggregator.aggregate(&plan, &observations);
                    TurnState::Respond(plan, answer)
                }
                TurnState::Respond(plan, answer) => {
                    let output = serde_json::json!({"type": "output", "output": answer});
                    context.push_assistant(output.to_string());

                    info!(attempts, intent = plan.intent().as_str(), "turn answered");
                    return TurnOutcome::Answered {
                        answer,
                        plan,
                        attempts,
                    };
                }
                TurnState::Fail => {
                    let last_error =
                        last_error.unwrap_or(TurnError::RetryBudgetExhausted { attempts });
                    info!(attempts, error = %last_error, "turn failed");
                    return TurnOutcome::Failed {
                        attempts,
                        last_error,
                    };
                }
            };
        }
    }

    /// One model invocation followed by extraction, normalization and validation.
    async fn request_plan(&self, context: &Context) -> Result<Plan, TurnError> {
        let request = context
            .to_request(self.config.output_format.clone())
            .options(self.config.options);

        let generation = self.llm.generate(request);
        let response = match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, generation)
                .await
                .map_err(|_elapsed| TurnError::Timeout(limit))??,
            None => generation.await?,
        };
        debug!(text = %response.text, "model output");

        let object = extract_plan_object(&response.text).ok_or(TurnError::Extraction)?;
        let normalized = normalize_keys(object);
        debug!(plan = %normalized, "candidate plan");

        Ok(Plan::validate(&normalized)?)
    }
}
