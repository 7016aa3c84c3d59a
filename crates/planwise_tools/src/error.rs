//! Error types for tool dispatch.

use thiserror::Error;

/// Errors that can occur when dispatching through a [`ToolRegistry`](crate::ToolRegistry).
///
/// Executing a tool itself cannot fail; only naming a tool that was never
/// registered can.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Creates an [`UnknownTool`](Self::UnknownTool).
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}
