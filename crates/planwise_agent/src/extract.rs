//! Recovery of a JSON object from free-form model output.
//!
//! Models asked for "JSON only" still wrap their answer in prose, code
//! fences, or several brace-delimited fragments. [`extract_plan_object`]
//! finds the first fragment that is both brace-balanced and valid JSON.

use serde_json::Value;

/// Returns the first JSON object recoverable from `text`.
///
/// The whole text is tried first. If it is not a JSON object, every `{` is
/// taken in turn as a candidate start; the candidate ends where the brace
/// depth returns to zero and is kept if it parses. A candidate that fails
/// to parse is abandoned and the scan moves on to the next `{`.
///
/// Braces are counted without regard to string literals.
///
/// ```
/// use planwise_agent::extract::extract_plan_object;
///
/// let text = r#"Sure! Here is the plan: {"type": "plan", "entities": ["delhi"]} Hope that helps."#;
/// let value = extract_plan_object(text).unwrap();
/// assert_eq!(value["entities"][0], "delhi");
///
/// assert!(extract_plan_object("hello there").is_none());
/// ```
#[must_use]
pub fn extract_plan_object(text: &str) -> Option<Value> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    let bytes = text.as_bytes();
    for (start, _) in bytes.iter().enumerate().filter(|(_, byte)| **byte == b'{') {
        let Some(end) = balanced_end(bytes, start) else {
            continue;
        };

        // Both ends are ASCII braces, so the slice lies on char boundaries.
        let candidate = &text[start..=end];
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Some(value),
            Err(err) => tracing::trace!(start, end, error = %err, "discarding candidate"),
        }
    }

    None
}

/// Index of the `}` closing the `{` at `start`, if the braces ever balance.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_text_object() {
        let value = extract_plan_object(r#" {"type":"plan","entities":["delhi"]} "#).unwrap();
        assert_eq!(value, json!({"type": "plan", "entities": ["delhi"]}));
    }

    #[test]
    fn object_embedded_in_prose_matches_isolated_parse() {
        let payload = r#"{"type": "plan", "entities": ["patiala", "mohali"], "intent": "sum"}"#;
        let text = format!("Okay, here you go:\n{payload}\nLet me know if you need more.");

        let expected: Value = serde_json::from_str(payload).unwrap();
        assert_eq!(extract_plan_object(&text), Some(expected));
    }

    #[test]
    fn code_fence_is_skipped() {
        let text = "```json\n{\"type\": \"plan\", \"entities\": \"delhi\"}\n```";
        let value = extract_plan_object(text).unwrap();
        assert_eq!(value["entities"], "delhi");
    }

    #[test]
    fn no_brace_is_not_found() {
        assert_eq!(extract_plan_object("hello there"), None);
        assert_eq!(extract_plan_object(""), None);
    }

    #[test]
    fn unbalanced_braces_are_not_found() {
        assert_eq!(extract_plan_object(r#"{"type": "plan", "entities": ["delhi"]"#), None);
        assert_eq!(extract_plan_object("}}}{"), None);
    }

    #[test]
    fn invalid_fragment_before_valid_one() {
        let text = r#"{not json} and then {"type": "plan", "entities": ["delhi"]}"#;
        let value = extract_plan_object(text).unwrap();
        assert_eq!(value["type"], "plan");
    }

    #[test]
    fn first_parseable_candidate_wins() {
        let text = r#"{"a": 1} {"b": 2}"#;
        assert_eq!(extract_plan_object(text), Some(json!({"a": 1})));
    }

    #[test]
    fn nested_object_recovered_after_broken_outer() {
        // The outer candidate fails to parse; the scan then reaches the inner `{`.
        let text = r#"{ plan: {"type": "plan", "entities": ["mohali"]} }"#;
        let value = extract_plan_object(text).unwrap();
        assert_eq!(value["entities"][0], "mohali");
    }

    #[test]
    fn top_level_array_falls_back_to_scan() {
        let text = r#"[{"type": "plan", "entities": ["delhi"]}]"#;
        let value = extract_plan_object(text).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn scalar_json_is_not_an_object() {
        assert_eq!(extract_plan_object("42"), None);
        assert_eq!(extract_plan_object("\"plan\""), None);
    }

    #[test]
    fn multibyte_prose_around_object() {
        let text = "Températures ☀️: {\"type\": \"plan\", \"entities\": [\"delhi\"]} fin";
        let value = extract_plan_object(text).unwrap();
        assert_eq!(value["entities"][0], "delhi");
    }
}
