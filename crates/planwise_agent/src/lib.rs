//! Plan-then-execute agent core for Planwise.
//!
//! The model never answers the user directly. It is asked for a small JSON
//! plan naming the entities to look up and what to do with them; the agent
//! recovers and validates that plan, runs a deterministic tool for every
//! entity, and builds the answer itself.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Recover a JSON object from raw output | [`extract`] |
//! | Trim whitespace from keys | [`normalize`] |
//! | Check the plan shape | [`plan`] |
//! | Look up entities | [`planwise_tools::observe`] |
//! | Phrase the answer | [`aggregate`] |
//! | Retry and sequence the above | [`turn`] |
//!
//! # Quick Start
//!
//! ```no_run
//! use planwise_agent::{AgentConfig, Session, SessionReply, TurnController};
//! use planwise_models::ModelRegistry;
//! use planwise_tools::LookupTool;
//! use std::sync::Arc;
//!
//! # async fn run(registry: ModelRegistry) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::default();
//! let llm = registry.llm(&config.model_id)?;
//! let controller = TurnController::new(llm, Arc::new(LookupTool::weather()), config);
//!
//! let mut session = Session::new(controller);
//! if let SessionReply::Reply(text) = session.handle("sum of patiala and mohali").await {
//!     println!("Bot: {text}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod plan;
pub mod prompt;
pub mod session;
pub mod turn;

pub use aggregate::{Aggregator, Measure};
pub use config::AgentConfig;
pub use context::Context;
pub use error::TurnError;
pub use plan::{Intent, Plan, ValidationError};
pub use session::{Session, SessionReply};
pub use turn::{TurnController, TurnOutcome, TurnState};
