//! Timestamp parsing for values arriving on the wire.
//!
//! Clients send ISO-8601 strings with or without an offset. Naive values are
//! read as UTC. Years are limited to `1..=9999` so every stored value keeps the
//! same fixed-width text form and compares correctly as a string in SQLite.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::Timestamp;

/// 0001-01-01T00:00:00Z as a Unix timestamp.
const EARLIEST_STORABLE_SECS: i64 = -62_135_596_800;

/// 9999-12-31T23:59:59Z as a Unix timestamp.
const LATEST_STORABLE_SECS: i64 = 253_402_300_799;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Earliest timestamp accepted for storage.
pub fn earliest_storable() -> Timestamp {
    DateTime::from_timestamp(EARLIEST_STORABLE_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Latest timestamp accepted for storage.
pub fn latest_storable() -> Timestamp {
    DateTime::from_timestamp(LATEST_STORABLE_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepted forms, in order of preference:
///
/// | Input                       | Interpretation            |
/// |-----------------------------|---------------------------|
/// | `2023-02-27T10:00:00+10:00` | RFC 3339, converted to UTC |
/// | `2023-02-27T00:00:00`       | naive, UTC                |
/// | `2023-02-27 00:00:00.5`     | naive, UTC                |
/// | `2023-02-27T00:00`          | naive, UTC                |
/// | `2023-02-27`                | midnight UTC              |
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
        .ok_or_else(|| CoreError::Validation(format!("invalid ISO-8601 timestamp: {raw}")))?;

    if !(1..=9999).contains(&parsed.year()) {
        return Err(CoreError::Validation(format!(
            "timestamp year must be between 1 and 9999, got {}",
            parsed.year()
        )));
    }
    Ok(parsed)
}

/// `deserialize_with` adapter for `Option<Timestamp>` fields.
///
/// Missing (with `#[serde(default)]`) and `null` both yield `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// `deserialize_with` adapter for clearable `Option<Option<Timestamp>>` fields.
///
/// Must be paired with `#[serde(default)]` so a missing key stays `None`
/// while an explicit `null` becomes `Some(None)`.
pub fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Option<Timestamp>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional(deserializer).map(Some)
}
