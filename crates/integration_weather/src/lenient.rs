//! Lenient field decoding
//!
//! Provider payloads are loosely typed: numbers sometimes arrive as strings,
//! fields go missing, arrays contain nulls. These helpers decode such fields
//! without failing the surrounding object. A value that cannot be read is
//! `None`, never zero.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Interpret a JSON value as a finite number
///
/// Numbers and numeric strings are accepted, anything else is `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Deserialize an optional number, tolerating strings and garbage
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_number(&value))
}

/// Deserialize an optional array of optional numbers
///
/// A non-array yields `None` so the metric reads as not provided.
pub fn numbers<'de, D>(deserializer: D) -> Result<Option<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.iter().map(to_number).collect()),
        _ => None,
    })
}

/// Deserialize an array of strings, non-strings become empty entries
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Deserialize an optional small integer index such as an AQI
///
/// Only whole numbers in `0..=255` are kept.
pub fn index<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u8::try_from(n).ok()))
}

/// Deserialize any nested structure, falling back to its default on mismatch
pub fn tolerant<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "number")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "numbers")]
        series: Option<Vec<Option<f64>>>,
        #[serde(default, deserialize_with = "strings")]
        labels: Vec<String>,
        #[serde(default, deserialize_with = "index")]
        aqi: Option<u8>,
    }

    fn parse(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(12.5)), Some(12.5));
        assert_eq!(to_number(&json!("12.5")), Some(12.5));
        assert_eq!(to_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(to_number(&json!("n/a")), None);
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&json!("NaN")), None);
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let sample = parse(json!({}));
        assert_eq!(sample.value, None);
        assert_eq!(sample.series, None);
        assert!(sample.labels.is_empty());
        assert_eq!(sample.aqi, None);
    }

    #[test]
    fn test_null_and_garbage_are_absent() {
        let sample = parse(json!({ "value": null, "series": "oops", "aqi": "two" }));
        assert_eq!(sample.value, None);
        assert_eq!(sample.series, None);
        assert_eq!(sample.aqi, None);
    }

    #[test]
    fn test_zero_is_kept() {
        let sample = parse(json!({ "value": 0 }));
        assert_eq!(sample.value, Some(0.0));
    }

    #[test]
    fn test_series_with_holes() {
        let sample = parse(json!({ "series": [1, null, "3", "x"] }));
        assert_eq!(sample.series, Some(vec![Some(1.0), None, Some(3.0), None]));
    }

    #[test]
    fn test_strings_replace_non_strings() {
        let sample = parse(json!({ "labels": ["2025-01-01T10:00", 5] }));
        assert_eq!(sample.labels, vec!["2025-01-01T10:00".to_string(), String::new()]);
    }

    #[test]
    fn test_index_requires_whole_number() {
        assert_eq!(parse(json!({ "aqi": 3 })).aqi, Some(3));
        assert_eq!(parse(json!({ "aqi": 2.5 })).aqi, None);
        assert_eq!(parse(json!({ "aqi": 300 })).aqi, None);
        assert_eq!(parse(json!({ "aqi": 9 })).aqi, Some(9));
    }

    #[test]
    fn test_tolerant_falls_back_to_default() {
        #[derive(Debug, Default, Deserialize, PartialEq)]
        struct Inner {
            speed: f64,
        }
        #[derive(Debug, Deserialize)]
        struct Outer {
            #[serde(default, deserialize_with = "tolerant")]
            inner: Option<Inner>,
        }

        let ok: Outer = serde_json::from_value(json!({ "inner": { "speed": 2.0 } })).unwrap();
        assert_eq!(ok.inner, Some(Inner { speed: 2.0 }));

        let bad: Outer = serde_json::from_value(json!({ "inner": [1, 2] })).unwrap();
        assert_eq!(bad.inner, None);
    }
}
