//! Typed access to dynamically-typed property bags.
//!
//! A [`PropertyBag`] maps string keys to [`Value`]s whose type is only known
//! at runtime (decoded JSON, loose configuration, ...). [`Props`] reads them
//! back as native Rust types under one contract:
//!
//! - an absent key (or an absent bag) is [`PropError::MissingField`]
//! - a present value that cannot be coerced, `null` included, is
//!   [`PropError::InvalidType`]
//! - a string failing a required pattern is [`PropError::RegexMismatch`]
//!
//! Each accessor comes in four failure policies: return the error (`get*`),
//! abort with a [`Fault`] panic (`require*`), fall back to a default
//! (`*_or`), or compute one lazily (`*_or_else`).
//!
//! ```rust
//! use nebula_props::prelude::*;
//!
//! let bag = bag! {
//!     "name" => "Alice",
//!     "count" => "42",
//!     "ts" => 1_700_000_000_000_i64,
//!     "items" => vec!["a", "b", "c"],
//! };
//! let props = bag.props();
//!
//! assert_eq!(props.get::<String>("name")?, "Alice");
//! assert_eq!(props.get::<i32>("count")?, 42);
//! assert_eq!(props.get::<DateTime<Utc>>("ts")?.timestamp(), 1_700_000_000);
//! assert_eq!(props.get_array::<String>("items")?.len(), 3);
//! assert_eq!(props.get_or("missing", 0_u16), 0);
//! # Ok::<(), PropError>(())
//! ```

#[macro_use]
mod macros;

pub mod accessor;
pub mod bag;
pub mod coerce;
pub mod error;
pub mod fault;
#[cfg(feature = "serde")]
pub mod json;
pub mod value;

pub use bag::{PropertyBag, Props, PropsExt};
pub use coerce::Coerce;
pub use error::{CoerceError, PropError, PropResult};
pub use fault::{catch_fault, Fault};
#[cfg(feature = "serde")]
pub use json::bag_from_json;
pub use value::{List, Value, ValueKind};

/// Prelude for common imports
pub mod prelude {
    pub use crate::bag;
    pub use crate::{
        catch_fault, Coerce, Fault, List, PropError, PropResult, PropertyBag, Props, PropsExt,
        Value, ValueKind,
    };

    pub use chrono::{DateTime, Utc};
    pub use num_bigint::BigInt;

    #[cfg(feature = "serde")]
    pub use crate::bag_from_json;
}
