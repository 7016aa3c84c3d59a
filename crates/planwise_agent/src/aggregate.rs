//! Turning observations into the final answer text.

use crate::plan::{Intent, Plan};
use planwise_tools::Observations;

/// Vocabulary used when phrasing an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    /// Plural name of the quantity, e.g. `"temperatures"`.
    pub plural: String,
    /// Singular name of the quantity, e.g. `"temperature"`.
    pub noun: String,
    /// Unit appended to a sum, e.g. `"°C"`.
    pub unit: String,
    /// What the entities are called, e.g. `"cities"`.
    pub entity_label: String,
}

impl Measure {
    /// City temperatures in degrees Celsius.
    #[must_use]
    pub fn temperature() -> Self {
        Self {
            plural: "temperatures".to_string(),
            noun: "temperature".to_string(),
            unit: "°C".to_string(),
            entity_label: "cities".to_string(),
        }
    }
}

impl Default for Measure {
    fn default() -> Self {
        Self::temperature()
    }
}

/// Combines observations into one answer according to a plan's intent.
///
/// The answer is built entirely from tool output; the model never supplies
/// a reading.
///
/// # Example
///
/// ```
/// use planwise_agent::aggregate::Aggregator;
/// use planwise_agent::plan::{Intent, Plan};
/// use planwise_tools::{Observation, Observations};
///
/// let mut observations = Observations::new();
/// observations.insert("patiala", Observation::new("10°C"));
/// observations.insert("mohali", Observation::new("14°C"));
///
/// let plan = Plan::new(["patiala", "mohali"], Intent::Sum).unwrap();
/// assert_eq!(
///     Aggregator::default().aggregate(&plan, &observations),
///     "The sum of temperatures for Patiala, Mohali is 24°C."
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    measure: Measure,
}

impl Aggregator {
    /// Separator between `list` segments.
    pub const LIST_SEPARATOR: &'static str = " ; ";

    /// Creates an aggregator phrasing answers with `measure`.
    #[must_use]
    pub fn new(measure: Measure) -> Self {
        Self { measure }
    }

    /// Returns the measure used for phrasing.
    #[must_use]
    pub fn measure(&self) -> &Measure {
        &self.measure
    }

    /// Builds the answer for `plan` from `observations`.
    #[must_use]
    pub fn aggregate(&self, plan: &Plan, observations: &Observations) -> String {
        match plan.intent() {
            Intent::Sum => self.sum(plan.entities(), observations),
            Intent::List => self.list(plan.entities(), observations),
        }
    }

    /// One `Entity: reading` segment per requested entity, in request order.
    #[must_use]
    pub fn list(&self, entities: &[String], observations: &Observations) -> String {
        entities
            .iter()
            .map(|entity| {
                let reading = observations
                    .get(entity)
                    .map_or("", |observation| observation.reading.as_str());
                format!("{}: {reading}", title_case(entity))
            })
            .collect::<Vec<_>>()
            .join(Self::LIST_SEPARATOR)
    }

    /// Total of the numeric readings, naming every requested entity.
    ///
    /// Entities without a numeric reading are left out of the total. If none
    /// has one, the answer says so instead of reporting zero.
    #[must_use]
    pub fn sum(&self, entities: &[String], observations: &Observations) -> String {
        let names = entities
            .iter()
            .map(|entity| title_case(entity))
            .collect::<Vec<_>>()
            .join(", ");

        let mut values = observations.values().peekable();
        if values.peek().is_none() {
            return format!(
                "No numeric {} available to sum for the requested {}: {names}.",
                self.measure.noun, self.measure.entity_label
            );
        }

        let total = values.fold(0i64, i64::saturating_add);
        format!(
            "The sum of {} for {names} is {total}{}.",
            self.measure.plural, self.measure.unit
        )
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
///
/// ```
/// use planwise_agent::aggregate::title_case;
///
/// assert_eq!(title_case("new delhi"), "New Delhi");
/// assert_eq!(title_case("o'BRIEN-town"), "O'Brien-Town");
/// ```
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwise_tools::Observation;

    fn observations(pairs: &[(&str, &str)]) -> Observations {
        let mut observations = Observations::new();
        for (entity, reading) in pairs {
            observations.insert(*entity, Observation::new(*reading));
        }
        observations
    }

    fn entities(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn list_keeps_request_order() {
        let observed = observations(&[("patiala", "10°C"), ("bangalore", "20°C")]);
        let answer = Aggregator::default().list(&entities(&["bangalore", "patiala"]), &observed);
        assert_eq!(answer, "Bangalore: 20°C ; Patiala: 10°C");
    }

    #[test]
    fn list_includes_unavailable_entities() {
        let observed = observations(&[
            ("delhi", "12°C"),
            ("atlantis", "Weather data not available"),
        ]);
        let answer = Aggregator::default().list(&entities(&["delhi", "atlantis"]), &observed);
        assert_eq!(answer, "Delhi: 12°C ; Atlantis: Weather data not available");
    }

    #[test]
    fn sum_skips_unavailable_entities() {
        let observed = observations(&[
            ("patiala", "10°C"),
            ("atlantis", "Weather data not available"),
            ("chandigarh", "8°C"),
        ]);
        let answer = Aggregator::default()
            .sum(&entities(&["patiala", "atlantis", "chandigarh"]), &observed);
        assert_eq!(
            answer,
            "The sum of temperatures for Patiala, Atlantis, Chandigarh is 18°C."
        );
    }

    #[test]
    fn sum_with_no_numeric_reading() {
        let observed = observations(&[
            ("atlantis", "Weather data not available"),
            ("lemuria", "Weather data not available"),
        ]);
        let answer = Aggregator::default().sum(&entities(&["atlantis", "lemuria"]), &observed);
        assert_eq!(
            answer,
            "No numeric temperature available to sum for the requested cities: Atlantis, Lemuria."
        );
    }

    #[test]
    fn duplicate_entity_counted_once_but_named_twice() {
        let observed = observations(&[("delhi", "12°C")]);
        let answer = Aggregator::default().sum(&entities(&["delhi", "delhi"]), &observed);
        assert_eq!(answer, "The sum of temperatures for Delhi, Delhi is 12°C.");
    }

    #[test]
    fn negative_readings_are_summed() {
        let observed = observations(&[("leh", "-5°C"), ("delhi", "12°C")]);
        let answer = Aggregator::default().sum(&entities(&["leh", "delhi"]), &observed);
        assert!(answer.ends_with("is 7°C."));
    }

    #[test]
    fn custom_measure_phrasing() {
        let aggregator = Aggregator::new(Measure {
            plural: "prices".to_string(),
            noun: "price".to_string(),
            unit: " USD".to_string(),
            entity_label: "tickers".to_string(),
        });
        let observed = observations(&[("acme", "120"), ("globex", "30")]);
        let plan = Plan::new(["acme", "globex"], Intent::Sum).unwrap();
        assert_eq!(
            aggregator.aggregate(&plan, &observed),
            "The sum of prices for Acme, Globex is 150 USD."
        );
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("patiala"), "Patiala");
        assert_eq!(title_case("SAN  FRANCISCO"), "San  Francisco");
        assert_eq!(title_case("3rd street"), "3Rd Street");
        assert_eq!(title_case(""), "");
    }
}
