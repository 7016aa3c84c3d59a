//! Tool framework for Planwise agents.
//!
//! Tools are the deterministic half of the agent: the model only names the
//! entities it wants looked up, and a [`Tool`] produces the readings. A tool
//! never fails. An unknown entity yields a sentinel reading that flows through
//! aggregation like any other string.
//!
//! # Quick Start
//!
//! ```
//! use planwise_tools::{LookupTool, StaticTable, ToolRegistry, observe};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut registry = ToolRegistry::new();
//! registry.register(LookupTool::weather());
//!
//! let tool = registry.get_shared("weather").unwrap();
//! let entities = vec!["Patiala".to_string(), "atlantis".to_string()];
//! let observations = observe(tool.as_ref(), &entities).await;
//!
//! assert_eq!(observations.get("Patiala").unwrap().value, Some(10));
//! assert_eq!(observations.get("atlantis").unwrap().value, None);
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`Tool`]: trait for executable lookups
//! - [`StaticTable`] / [`LookupTool`]: in-memory data source and the tool over it
//! - [`parse_reading`]: numeric extraction from a reading string
//! - [`observe`]: runs a tool for every entity of a plan
//! - [`ToolRegistry`]: stores and dispatches tools by name

pub mod error;
pub mod observe;
pub mod reading;
pub mod registry;
pub mod table;
pub mod tool;

// Re-export core types at crate root.
pub use error::ToolError;
pub use observe::{Observation, Observations, observe};
pub use reading::parse_reading;
pub use registry::ToolRegistry;
pub use table::{LookupTool, StaticTable};
pub use tool::{Tool, ToolDefinition};
