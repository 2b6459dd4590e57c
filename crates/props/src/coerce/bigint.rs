//! Arbitrary-precision integer coercion.

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use super::Coerce;
use crate::error::CoerceError;
use crate::value::Value;

impl Coerce for BigInt {
    fn expected() -> &'static str {
        "BigInt"
    }

    /// Decimal strings parse exactly, integers promote exactly, floats keep
    /// their integer part (truncated, not rounded).
    fn coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => parse_decimal(s),
            Value::Int(i) => Ok(Self::from(*i)),
            Value::UInt(u) => Ok(Self::from(*u)),
            Value::Float(f) => Self::from_f64(f.trunc()).ok_or(CoerceError::NonFinite(*f)),
            other => Err(CoerceError::unsupported(other.kind(), Self::expected())),
        }
    }
}

/// Parse `[+-]?[0-9]+` and nothing else.
///
/// `BigInt::from_str` also takes `_` separators between digits, which no
/// other numeric coercion accepts.
fn parse_decimal(s: &str) -> Result<BigInt, CoerceError> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoerceError::BigInt(s.to_owned()));
    }
    s.parse::<BigInt>()
        .map_err(|_| CoerceError::BigInt(s.to_owned()))
}
