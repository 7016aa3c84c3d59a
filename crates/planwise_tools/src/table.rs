//! Static lookup tables and the tool built on them.

use crate::tool::{Tool, ToolDefinition};
use indexmap::IndexMap;
use std::future::Future;
use std::pin::Pin;

/// Sentinel reading returned by [`StaticTable::weather`] for unknown cities.
pub const WEATHER_UNAVAILABLE: &str = "Weather data not available";

/// An in-memory table mapping entity names to canned readings.
///
/// Keys are matched case-insensitively after trimming surrounding
/// whitespace. Names missing from the table resolve to the sentinel.
#[derive(Debug, Clone)]
pub struct StaticTable {
    entries: IndexMap<String, String>,
    sentinel: String,
}

impl StaticTable {
    /// Creates an empty table answering `sentinel` for every name.
    #[must_use]
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            entries: IndexMap::new(),
            sentinel: sentinel.into(),
        }
    }

    /// The fixed city temperature table.
    #[must_use]
    pub fn weather() -> Self {
        Self::new(WEATHER_UNAVAILABLE)
            .with_entry("patiala", "10°C")
            .with_entry("mohali", "14°C")
            .with_entry("delhi", "12°C")
            .with_entry("bangalore", "20°C")
            .with_entry("chandigarh", "8°C")
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with_entry(mut self, entity: &str, reading: impl Into<String>) -> Self {
        self.entries.insert(normalize_entity(entity), reading.into());
        self
    }

    /// Returns the reading for `entity`, if the table knows it.
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.entries
            .get(&normalize_entity(entity))
            .map(String::as_str)
    }

    /// Returns the reading for `entity`, or the sentinel.
    #[must_use]
    pub fn lookup(&self, entity: &str) -> &str {
        self.get(entity).unwrap_or(&self.sentinel)
    }

    /// Returns the sentinel reading.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Known entity names, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize_entity(entity: &str) -> String {
    entity.trim().to_lowercase()
}

/// A [`Tool`] answering from a [`StaticTable`].
#[derive(Debug, Clone)]
pub struct LookupTool {
    name: String,
    description: String,
    table: StaticTable,
}

impl LookupTool {
    /// Creates a lookup tool.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, table: StaticTable) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            table,
        }
    }

    /// The `weather` tool over [`StaticTable::weather`].
    #[must_use]
    pub fn weather() -> Self {
        Self::new(
            "weather",
            "Current temperature of a city",
            StaticTable::weather(),
        )
    }

    /// Returns the backing table.
    #[must_use]
    pub fn table(&self) -> &StaticTable {
        &self.table
    }
}

impl Tool for LookupTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    fn execute<'a>(&'a self, entity: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move {
            let reading = self.table.lookup(entity).to_string();
            tracing::debug!(tool = %self.name, entity, %reading, "lookup");
            reading
        })
    }
}
