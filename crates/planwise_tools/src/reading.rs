//! Numeric extraction from reading strings.

use regex::Regex;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("integer pattern is valid"));

/// Returns the first signed-or-unsigned integer in `reading`.
///
/// Returns `None` when the string holds no digits (as with a sentinel
/// reading) or when the number does not fit an `i64`.
///
/// ```
/// use planwise_tools::parse_reading;
///
/// assert_eq!(parse_reading("10°C"), Some(10));
/// assert_eq!(parse_reading("-4°C"), Some(-4));
/// assert_eq!(parse_reading("Weather data not available"), None);
/// ```
#[must_use]
pub fn parse_reading(reading: &str) -> Option<i64> {
    INTEGER
        .find(reading)
        .and_then(|found| found.as_str().parse().ok())
}
