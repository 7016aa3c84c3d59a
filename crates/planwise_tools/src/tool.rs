//! The core [`Tool`] trait for entity lookups.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Human-facing description of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (e.g., `weather`).
    pub name: String,
    /// What the tool reports for an entity.
    pub description: String,
}

/// A deterministic lookup keyed by entity name.
///
/// Implementations must be side-effect free and must always produce a
/// reading, using a sentinel string for entities they know nothing about.
pub trait Tool: Send + Sync + 'static {
    /// Returns the tool definition.
    fn definition(&self) -> ToolDefinition;

    /// Produces the reading for one entity.
    fn execute<'a>(&'a self, entity: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}
