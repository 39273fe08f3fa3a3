//! Parsing of caller-supplied date parameters.
//!
//! Accepted forms, all read as UTC when no offset is given:
//!
//! | Input | Example |
//! |-------|---------|
//! | RFC 3339 | `2024-03-01T12:00:00+01:00` |
//! | Naive date-time | `2024-03-01T12:00:00`, `2024-03-01 12:00:00` |
//! | Date | `2024-03-01` (midnight) |
//! | Unix seconds | `@1709294400` |

use crate::domain::errors::QueryError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shared_types::Timestamp;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse the raw value of parameter `name`.
///
/// An empty value means the parameter was not supplied.
pub fn parse_time_param(name: &str, raw: &str) -> Result<Option<Timestamp>, QueryError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_timestamp(value)
        .map(Some)
        .ok_or_else(|| QueryError::InvalidParameter {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if let Some(seconds) = value.strip_prefix('@') {
        return seconds.parse::<i64>().ok();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp());
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
}
