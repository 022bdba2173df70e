//! Todo domain rules: boolean query flags, title validation, and the
//! deadline window used by the list filter.

use chrono::TimeDelta;
use serde::{de::IgnoredAny, Deserialize, Deserializer};

use crate::datetime::{earliest_storable, latest_storable};
use crate::error::CoreError;
use crate::types::Timestamp;

/// Case-insensitive parse of `"true"` / `"false"`.
///
/// Returns `None` for anything else, including surrounding whitespace.
pub fn parse_bool_str(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Interpret the `completed` query parameter.
///
/// Absent or empty means "no filter" (`Ok(None)`). Any other value that is
/// not a boolean string is a validation error.
pub fn parse_completed_param(raw: Option<&str>) -> Result<Option<bool>, CoreError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_bool_str(value)
            .map(Some)
            .ok_or_else(|| CoreError::Validation("incorrect completed parameter".to_string())),
    }
}

/// Interpret the `window` query parameter. Non-integer values are ignored.
pub fn parse_window_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Ensure a todo title is present and not blank.
pub fn validate_title(title: Option<&str>) -> Result<&str, CoreError> {
    match title {
        Some(title) if !title.trim().is_empty() => Ok(title),
        _ => Err(CoreError::Validation("title is required".to_string())),
    }
}

/// `deserialize_with` adapter for `completed` in request bodies.
///
/// Accepts a JSON boolean or a boolean string (`"true"`, `"FALSE"`, ...).
/// Anything unrecognizable, `null`, or a missing key yields `None`.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBool {
        Bool(bool),
        Text(String),
        Other(#[allow(dead_code)] IgnoredAny),
    }

    Ok(match Option::<RawBool>::deserialize(deserializer)? {
        Some(RawBool::Bool(value)) => Some(value),
        Some(RawBool::Text(text)) => parse_bool_str(&text),
        Some(RawBool::Other(_)) | None => None,
    })
}

/// `deserialize_with` adapter for clearable `Option<Option<T>>` fields.
///
/// Pair with `#[serde(default)]`: a missing key stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Inclusive deadline range `[from, to]` selected by `?window=<days>`.
///
/// A negative day count produces an empty window (`to < from`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl DeadlineWindow {
    /// Build the window starting at `now` and spanning `days` days.
    ///
    /// The upper bound is clamped to the storable range.
    pub fn days_from(now: Timestamp, days: i64) -> Self {
        let overflow = if days < 0 {
            earliest_storable()
        } else {
            latest_storable()
        };
        let to = TimeDelta::try_days(days)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(overflow)
            .clamp(earliest_storable(), latest_storable());
        Self { from: now, to }
    }

    /// True when no deadline can fall inside the window.
    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }
}
