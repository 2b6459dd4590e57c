//! Numeric coercion.
//!
//! Any numeric variant, or a numeric string, converts to any native number
//! width with Rust `as` semantics: floats truncate toward zero (saturating at
//! the target's bounds), integers wrap to the target width. Nothing checks
//! for overflow; the conversion is best-effort by contract.
//!
//! Strings holding an integral literal are parsed exactly as `i64`/`u64`
//! before falling back to `f64`, so the string form of any in-range integer
//! comes back unchanged even past 2^53.

use super::Coerce;
use crate::error::CoerceError;
use crate::value::{List, Value};

/// Parse a base-10 numeric string into the narrowest exact numeric value.
fn parse_numeric(s: &str) -> Result<Value, CoerceError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Ok(Value::UInt(u));
    }
    Ok(Value::Float(s.parse::<f64>()?))
}

macro_rules! impl_coerce_number {
    (@from_list) => {};
    (@from_list $variant:ident) => {
        fn from_list(list: &List) -> Option<Vec<Self>> {
            match list {
                List::$variant(items) => Some(items.clone()),
                _ => None,
            }
        }
    };
    ($($ty:ty $(=> $variant:ident)?),* $(,)?) => {
        $(
            #[allow(trivial_numeric_casts, clippy::cast_lossless, reason = "uniform `as` narrowing")]
            impl Coerce for $ty {
                fn expected() -> &'static str {
                    stringify!($ty)
                }

                fn coerce(value: &Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::Int(i) => Ok(*i as $ty),
                        Value::UInt(u) => Ok(*u as $ty),
                        Value::Float(f) => Ok(*f as $ty),
                        Value::String(s) => Self::coerce(&parse_numeric(s)?),
                        other => Err(CoerceError::unsupported(other.kind(), Self::expected())),
                    }
                }

                impl_coerce_number!(@from_list $($variant)?);
            }
        )*
    };
}

impl_coerce_number! {
    i8, i16, i32, i64 => Ints, isize,
    u8, u16, u32, u64 => UInts, usize,
    f32, f64 => Floats,
}
