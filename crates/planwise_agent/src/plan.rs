//! The plan a model emits and its validation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with the observations of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Report each entity's reading.
    #[default]
    List,
    /// Add up the numeric readings.
    Sum,
}

impl Intent {
    /// Parses the wire value. Anything other than `"list"` or `"sum"` is `None`.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Self::List),
            "sum" => Some(Self::Sum),
            _ => None,
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Sum => "sum",
        }
    }
}

/// Why a candidate object was rejected as a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The candidate is not a JSON object.
    #[error("plan must be a JSON object")]
    NotAnObject,
    /// The `type` field is missing or not `"plan"`.
    #[error("expected type \"plan\", found {}", .found.as_deref().unwrap_or("nothing"))]
    WrongType {
        /// The offending `type` value rendered as JSON, if present.
        found: Option<String>,
    },
    /// Neither `entities` nor `cities` is present.
    #[error("plan has no entities field")]
    MissingEntities,
    /// The entities field holds no usable names.
    #[error("plan entities are empty after trimming")]
    EmptyEntities,
}

/// A validated plan: at least one trimmed, non-empty entity and an intent.
///
/// Only [`Plan::validate`] and [`Plan::new`] construct plans, so the
/// non-empty invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    entities: Vec<String>,
    intent: Intent,
}

impl Plan {
    /// Builds a plan from entity names, applying the same trimming and
    /// filtering as [`Plan::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEntities`] if no name survives.
    pub fn new<I, S>(entities: I, intent: Intent) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entities: Vec<String> = entities
            .into_iter()
            .map(|entity| entity.as_ref().trim().to_string())
            .filter(|entity| !entity.is_empty())
            .collect();

        if entities.is_empty() {
            return Err(ValidationError::EmptyEntities);
        }
        Ok(Self { entities, intent })
    }

    /// Validates a normalized candidate object.
    ///
    /// Checks run in order: the value is an object, its `type` is `"plan"`,
    /// and its `entities` field (or the older `cities` field) yields at least
    /// one name. A single string counts as a one-item list; non-string items
    /// and blank strings are dropped. A missing or unrecognized `intent`
    /// becomes [`Intent::List`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    ///
    /// # Example
    ///
    /// ```
    /// use planwise_agent::plan::{Intent, Plan};
    /// use serde_json::json;
    ///
    /// let plan = Plan::validate(&json!({
    ///     "type": "plan",
    ///     "entities": [" patiala ", "", 7, "mohali"],
    ///     "intent": "sum"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(plan.entities(), ["patiala", "mohali"]);
    /// assert_eq!(plan.intent(), Intent::Sum);
    /// ```
    pub fn validate(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        match object.get("type") {
            Some(Value::String(kind)) if kind == "plan" => {}
            other => {
                return Err(ValidationError::WrongType {
                    found: other.map(Value::to_string),
                });
            }
        }

        let raw = object
            .get("entities")
            .or_else(|| object.get("cities"))
            .ok_or(ValidationError::MissingEntities)?;

        let names: Vec<&str> = match raw {
            Value::String(name) => vec![name.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };

        let intent = object
            .get("intent")
            .and_then(Value::as_str)
            .and_then(Intent::from_wire)
            .unwrap_or_default();

        Self::new(names, intent)
    }

    /// Entity names in the order the model gave them.
    #[must_use]
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// The requested intent.
    #[must_use]
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Serializes the plan as the assistant message recorded in the context.
    #[must_use]
    pub fn to_message_json(&self) -> String {
        let wire = PlanSchema {
            kind: PlanTag::Plan,
            entities: self.entities.clone(),
            intent: self.intent,
        };
        // A struct of strings and unit enums always serializes.
        serde_json::to_string(&wire).unwrap_or_default()
    }
}

/// Wire shape of a plan, used for the structured-output schema.
///
/// ```
/// use planwise_agent::plan::PlanSchema;
/// use planwise_models::llm::OutputFormat;
///
/// let OutputFormat::Schema(schema) = OutputFormat::schema::<PlanSchema>() else {
///     unreachable!()
/// };
/// assert!(schema["required"].as_array().unwrap().contains(&"entities".into()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanSchema {
    /// Always `"plan"`.
    #[serde(rename = "type")]
    pub kind: PlanTag,
    /// Entity names to look up.
    pub entities: Vec<String>,
    /// What to do with the readings.
    #[serde(default)]
    pub intent: Intent,
}

/// The single accepted value of a plan's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanTag {
    /// `"plan"`
    Plan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_string_becomes_one_entity() {
        let plan = Plan::validate(&json!({"type": "plan", "entities": "delhi"})).unwrap();
        assert_eq!(plan.entities(), ["delhi"]);
        assert_eq!(plan.intent(), Intent::List);
    }

    #[test]
    fn legacy_cities_key_is_accepted() {
        let plan =
            Plan::validate(&json!({"type": "plan", "cities": ["mohali"], "intent": "sum"})).unwrap();
        assert_eq!(plan.entities(), ["mohali"]);
        assert_eq!(plan.intent(), Intent::Sum);
    }

    #[test]
    fn entities_key_takes_precedence_over_cities() {
        let plan = Plan::validate(&json!({
            "type": "plan",
            "entities": ["delhi"],
            "cities": ["mohali"]
        }))
        .unwrap();
        assert_eq!(plan.entities(), ["delhi"]);
    }

    #[test]
    fn unknown_intent_falls_back_to_list() {
        for intent in [json!("average"), json!("SUM"), json!(3), json!(null)] {
            let plan = Plan::validate(&json!({
                "type": "plan",
                "entities": ["delhi"],
                "intent": intent
            }))
            .unwrap();
            assert_eq!(plan.intent(), Intent::List);
        }
    }

    #[test]
    fn rejects_non_object() {
        assert_eq!(
            Plan::validate(&json!(["delhi"])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn rejects_wrong_or_missing_type() {
        let err = Plan::validate(&json!({"type": "answer", "entities": ["delhi"]})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                found: Some("\"answer\"".to_string())
            }
        );

        let err = Plan::validate(&json!({"entities": ["delhi"]})).unwrap_err();
        assert_eq!(err, ValidationError::WrongType { found: None });
    }

    #[test]
    fn type_check_precedes_entities_check() {
        let err = Plan::validate(&json!({"type": "output"})).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn rejects_missing_entities() {
        assert_eq!(
            Plan::validate(&json!({"type": "plan", "intent": "sum"})),
            Err(ValidationError::MissingEntities)
        );
    }

    #[test]
    fn rejects_blank_entities() {
        for entities in [json!([]), json!(["", "   "]), json!(""), json!([1, null]), json!(42)] {
            assert_eq!(
                Plan::validate(&json!({"type": "plan", "entities": entities})),
                Err(ValidationError::EmptyEntities)
            );
        }
    }

    #[test]
    fn message_json_uses_entities_key() {
        let plan = Plan::new(["patiala", "mohali"], Intent::Sum).unwrap();
        let value: Value = serde_json::from_str(&plan.to_message_json()).unwrap();
        assert_eq!(
            value,
            json!({"type": "plan", "entities": ["patiala", "mohali"], "intent": "sum"})
        );
    }

    #[test]
    fn message_json_revalidates_to_same_plan() {
        let plan = Plan::new([" bangalore", "delhi "], Intent::List).unwrap();
        let value: Value = serde_json::from_str(&plan.to_message_json()).unwrap();
        assert_eq!(Plan::validate(&value).unwrap(), plan);
    }
}
