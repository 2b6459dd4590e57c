//! Timestamp coercion.
//!
//! Precedence: a native timestamp as-is, then a string parsed strictly as
//! RFC 3339, then a number read as milliseconds since the Unix epoch. No
//! other textual formats are attempted.

use chrono::{DateTime, Utc};

use super::Coerce;
use crate::error::CoerceError;
use crate::value::{List, Value};

fn from_millis(millis: i64) -> Result<DateTime<Utc>, CoerceError> {
    DateTime::from_timestamp_millis(millis).ok_or(CoerceError::TimestampRange(i128::from(millis)))
}

impl Coerce for DateTime<Utc> {
    fn expected() -> &'static str {
        "DateTime<Utc>"
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::String(s) => Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
            Value::Int(ms) => from_millis(*ms),
            Value::UInt(ms) => i64::try_from(*ms)
                .map_err(|_| CoerceError::TimestampRange(i128::from(*ms)))
                .and_then(from_millis),
            Value::Float(ms) if ms.is_finite() => from_millis(*ms as i64),
            Value::Float(ms) => Err(CoerceError::NonFinite(*ms)),
            other => Err(CoerceError::unsupported(other.kind(), Self::expected())),
        }
    }

    fn from_list(list: &List) -> Option<Vec<Self>> {
        match list {
            List::DateTimes(items) => Some(items.clone()),
            _ => None,
        }
    }
}
