//! Key normalization for parsed model output.

use serde_json::Value;

/// Strips leading and trailing whitespace from every object key, recursively.
///
/// Arrays are walked element by element; scalars are returned unchanged.
/// When two keys collide after trimming, the later value wins.
///
/// ```
/// use planwise_agent::normalize::normalize_keys;
/// use serde_json::json;
///
/// let value = normalize_keys(json!({" a ": {" b ": 1}}));
/// assert_eq!(value, json!({"a": {"b": 1}}));
/// ```
#[must_use]
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.trim().to_string(), normalize_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        scalar => scalar,
    }
}
