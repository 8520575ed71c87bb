//! Field deserializers for pipeline output.
//!
//! The report backend writes `null` in place of NaN or infinite floats and
//! occasionally emits non-string values for text fields. A single such record
//! must not reject the whole preview, so these helpers fall back to values
//! the engine already treats as "missing".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numbers pass through, numeric strings are parsed, anything else is 0.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.filter(|value: &f64| value.is_finite()).unwrap_or(0.0))
}

/// Strings pass through, anything else becomes the empty string.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Reading {
        #[serde(default, deserialize_with = "f64_or_zero")]
        amount: f64,
        #[serde(default, deserialize_with = "string_or_empty")]
        text: String,
    }

    fn parse(raw: &str) -> Reading {
        serde_json::from_str(raw).expect("lenient fields never fail")
    }

    #[test]
    fn numbers_and_numeric_strings_pass_through() {
        assert_eq!(parse(r#"{"amount": 12.5}"#).amount, 12.5);
        assert_eq!(parse(r#"{"amount": 3}"#).amount, 3.0);
        assert_eq!(parse(r#"{"amount": " 7.25 "}"#).amount, 7.25);
    }

    #[test]
    fn nulls_and_garbage_become_zero() {
        assert_eq!(parse(r#"{"amount": null}"#).amount, 0.0);
        assert_eq!(parse(r#"{"amount": "NaN"}"#).amount, 0.0);
        assert_eq!(parse(r#"{"amount": {"x": 1}}"#).amount, 0.0);
        assert_eq!(parse("{}").amount, 0.0);
    }

    #[test]
    fn non_strings_become_empty_text() {
        assert_eq!(parse(r#"{"text": "2024-02-02T09:00:00Z"}"#).text, "2024-02-02T09:00:00Z");
        assert_eq!(parse(r#"{"text": null}"#).text, "");
        assert_eq!(parse(r#"{"text": 1706864400}"#).text, "");
    }
}
