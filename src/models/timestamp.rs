//! Serde adapter for `NaiveDateTime` columns.
//!
//! Values go out as UTC RFC 3339 (`2024-01-01T10:00:00Z`). On the way in an
//! offset is normalized to UTC and a naive value is taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        // a bare date means midnight
        .or_else(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?.and_hms_opt(0, 0, 0))
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}
