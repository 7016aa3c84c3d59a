//! Per-entity tool execution.

use crate::reading::parse_reading;
use crate::tool::Tool;
use futures::future::join_all;
use indexmap::IndexMap;
use serde::Serialize;

/// The outcome of looking up one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// The raw reading string, possibly a sentinel.
    pub reading: String,
    /// The integer parsed from the reading, if any.
    pub value: Option<i64>,
}

impl Observation {
    /// Wraps a reading and parses its numeric value.
    #[must_use]
    pub fn new(reading: impl Into<String>) -> Self {
        let reading = reading.into();
        let value = parse_reading(&reading);
        Self { reading, value }
    }
}

/// Observations keyed by entity name, in first-requested order.
///
/// An entity named twice in a plan has a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Observations(IndexMap<String, Observation>);

impl Observations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the observation for `entity`, replacing any earlier one.
    pub fn insert(&mut self, entity: impl Into<String>, observation: Observation) {
        self.0.insert(entity.into(), observation);
    }

    /// Returns the observation recorded for `entity`.
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&Observation> {
        self.0.get(entity)
    }

    /// Iterates entries in first-requested order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Observation)> {
        self.0.iter().map(|(entity, obs)| (entity.as_str(), obs))
    }

    /// Iterates the numeric values that are present, one per distinct entity.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.values().filter_map(|obs| obs.value)
    }

    /// Number of distinct entities observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runs `tool` once per entity and collects the results.
///
/// Lookups run concurrently; the returned map follows the order of
/// `entities`, not completion order.
pub async fn observe(tool: &dyn Tool, entities: &[String]) -> Observations {
    let readings = join_all(entities.iter().map(|entity| tool.execute(entity))).await;

    let mut observations = Observations::new();
    for (entity, reading) in entities.iter().zip(readings) {
        observations.insert(entity.clone(), Observation::new(reading));
    }

    tracing::debug!(
        tool = %tool.definition().name,
        count = observations.len(),
        "observations collected"
    );

    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{LookupTool, WEATHER_UNAVAILABLE};
    use crate::tool::ToolDefinition;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    fn names(entities: &[&str]) -> Vec<String> {
        entities.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn observation_parses_value() {
        assert_eq!(Observation::new("14°C").value, Some(14));
        assert_eq!(Observation::new(WEATHER_UNAVAILABLE).value, None);
    }

    #[tokio::test]
    async fn follows_plan_order() {
        let tool = LookupTool::weather();
        let observations = observe(&tool, &names(&["chandigarh", "bangalore", "delhi"])).await;

        let order: Vec<&str> = observations.iter().map(|(entity, _)| entity).collect();
        assert_eq!(order, vec!["chandigarh", "bangalore", "delhi"]);
    }

    #[tokio::test]
    async fn unknown_entity_is_observed_without_value() {
        let tool = LookupTool::weather();
        let observations = observe(&tool, &names(&["patiala", "narnia"])).await;

        let narnia = observations.get("narnia").unwrap();
        assert_eq!(narnia.reading, WEATHER_UNAVAILABLE);
        assert_eq!(narnia.value, None);
        assert_eq!(observations.values().collect::<Vec<_>>(), vec![10]);
    }

    #[tokio::test]
    async fn duplicates_collapse() {
        let tool = LookupTool::weather();
        let observations = observe(&tool, &names(&["mohali", "delhi", "mohali"])).await;

        assert_eq!(observations.len(), 2);
        assert_eq!(observations.values().sum::<i64>(), 26);
    }

    /// Answers slower for entities earlier in the alphabet.
    struct SlowTool;

    impl Tool for SlowTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "slow".to_string(),
                description: "Delays by name".to_string(),
            }
        }

        fn execute<'a>(
            &'a self,
            entity: &'a str,
        ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
            Box::pin(async move {
                let delay = if entity == "a" { 30 } else { 1 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                format!("{entity}:1")
            })
        }
    }

    #[tokio::test]
    async fn completion_order_does_not_leak() {
        let observations = observe(&SlowTool, &names(&["a", "b"])).await;
        let order: Vec<&str> = observations.iter().map(|(entity, _)| entity).collect();
        assert_eq!(order, vec!["a", "b"]);
    }
}
