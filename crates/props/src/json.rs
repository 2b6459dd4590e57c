//! `serde_json` bridge.
//!
//! Decoded JSON is the most common source of property bags. Conversion is
//! lossless for everything JSON can express: integers stay integers (signed
//! when they fit in `i64`, unsigned otherwise), other numbers become floats,
//! strings are kept as text even when they look like timestamps. A number no
//! `f64` can hold (only reachable with serde_json's `arbitrary_precision`)
//! is kept as its decimal text rather than dropped, so it still coerces to
//! [`BigInt`](num_bigint::BigInt) when it is integral.
//!
//! ```rust
//! use nebula_props::{bag_from_json, PropsExt};
//! use serde_json::json;
//!
//! let bag = bag_from_json(json!({ "name": "Alice", "tags": ["a", "b"] })).unwrap();
//! assert_eq!(bag.props().get::<String>("name").unwrap(), "Alice");
//! assert_eq!(bag.props().get_array::<String>("tags").unwrap(), ["a", "b"]);
//! ```

use serde_json::Value as JsonValue;

use crate::bag::PropertyBag;
use crate::value::Value;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64()
                        .map_or_else(|| Self::String(n.to_string()), Self::Float)
                }
            }
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Object(bag_entries(map)),
        }
    }
}

fn bag_entries(map: serde_json::Map<String, JsonValue>) -> PropertyBag {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

/// Convert a JSON object into a bag; any other JSON value yields `None`
pub fn bag_from_json(json: JsonValue) -> Option<PropertyBag> {
    match json {
        JsonValue::Object(map) => Some(bag_entries(map)),
        _ => None,
    }
}
