//! Field-level decoders for request bodies. A field whose value has the wrong
//! shape falls back to its default instead of failing the whole body.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::timestamp;

pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!("undecodable field, using default: {e}");
        T::default()
    }))
}

/// Integer from a JSON number or a numeric string.
pub fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        tracing::warn!("undecodable integer {value}, using 0");
        0
    }))
}

pub fn datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = value.as_str().and_then(timestamp::parse);
    Ok(parsed.unwrap_or_else(|| {
        tracing::warn!("undecodable timestamp {value}, using the epoch");
        NaiveDateTime::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "integer")]
        count: i32,
        #[serde(deserialize_with = "datetime")]
        at: NaiveDateTime,
        #[serde(deserialize_with = "or_default")]
        label: String,
    }

    #[test]
    fn integer_accepts_numeric_strings() {
        let sample: Sample = serde_json::from_str(r#"{"count":"5"}"#).unwrap();
        assert_eq!(sample.count, 5);
    }

    #[test]
    fn bad_fields_default_individually() {
        let sample: Sample =
            serde_json::from_str(r#"{"count":1.5,"at":"soon","label":"kept"}"#).unwrap();
        assert_eq!(sample.count, 0);
        assert_eq!(sample.at, NaiveDateTime::default());
        assert_eq!(sample.label, "kept");

        let sample: Sample = serde_json::from_str(r#"{"count":7,"label":{"a":1}}"#).unwrap();
        assert_eq!(sample.count, 7);
        assert_eq!(sample.label, "");
    }

    #[test]
    fn out_of_range_integer_defaults() {
        let sample: Sample = serde_json::from_str(r#"{"count":9999999999}"#).unwrap();
        assert_eq!(sample.count, 0);
    }
}
