//! Runtime classification of [`Value`](super::Value).
//!
//! ```rust
//! use nebula_props::{Value, ValueKind};
//!
//! let v = Value::from(3.5);
//! assert_eq!(v.kind(), ValueKind::Float);
//! assert!(ValueKind::Float.is_numeric());
//! assert_eq!(ValueKind::Float.name(), "float");
//! ```

use core::fmt::{Display, Formatter};

/// Represents the kind/type of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Unsigned,
    Float,
    String,
    DateTime,
    Array,
    List,
    Object,
}

impl ValueKind {
    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Unsigned | Self::Float)
    }

    /// Check if this kind is a sequence, typed or not
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Array | Self::List)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned integer",
            Self::Float => "float",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Array => "array",
            Self::List => "typed list",
            Self::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
