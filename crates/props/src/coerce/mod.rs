//! Coercion rules: dynamic [`Value`] in, native kind out.
//!
//! Each supported target implements [`Coerce`]. The set is closed:
//!
//! | target                         | accepts                                          |
//! |--------------------------------|--------------------------------------------------|
//! | `String`                       | strings only                                     |
//! | `bool`                         | booleans only (`"true"` is rejected)             |
//! | integers and floats            | any number, or a numeric string                  |
//! | [`BigInt`](num_bigint::BigInt) | decimal string, integer, float (truncated)       |
//! | `DateTime<Utc>`                | timestamp, RFC 3339 string, epoch milliseconds   |
//!
//! `null` never coerces to anything; whether a missing or null value becomes
//! a default is the accessor's decision, not the rule's.

mod bigint;
mod number;
mod pattern;
mod timestamp;

use crate::error::CoerceError;
use crate::value::{List, Value};

pub(crate) use pattern::match_pattern;

/// A target kind that a [`Value`] can be converted into
pub trait Coerce: Sized {
    /// Name of the kind, used as the expected type in errors
    fn expected() -> &'static str;

    /// Convert a single value
    fn coerce(value: &Value) -> Result<Self, CoerceError>;

    /// Take a typed list whose elements are already this type, as-is.
    ///
    /// Returns `None` when the list holds some other element type; the
    /// caller then falls back to coercing element by element.
    fn from_list(list: &List) -> Option<Vec<Self>> {
        let _ = list;
        None
    }
}

impl Coerce for String {
    fn expected() -> &'static str {
        "string"
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(CoerceError::unsupported(other.kind(), Self::expected())),
        }
    }

    fn from_list(list: &List) -> Option<Vec<Self>> {
        match list {
            List::Strings(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl Coerce for bool {
    fn expected() -> &'static str {
        "bool"
    }

    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(CoerceError::unsupported(other.kind(), Self::expected())),
        }
    }

    fn from_list(list: &List) -> Option<Vec<Self>> {
        match list {
            List::Bools(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// `type_name` with module paths stripped, for readable error messages.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = core::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        let last = word.rsplit("::").next().unwrap_or_default();
        out.push_str(last);
        word.clear();
    };

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}
