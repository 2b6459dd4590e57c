//! Homogeneous native sequences.
//!
//! A [`List`] is what a producer stores when it already knows the element
//! type (a `Vec<String>`, a `Vec<i64>`, ...). Array accessors hand these back
//! without re-checking each element, while a heterogeneous
//! [`Value::Array`](super::Value::Array) is coerced element by element.

use core::any::Any;

use chrono::{DateTime, Utc};

use super::{Value, ValueKind};
use crate::bag::PropertyBag;

/// Typed sequence of native values
#[derive(Debug, Clone, PartialEq)]
pub enum List {
    Strings(Vec<String>),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    UInts(Vec<u64>),
    Floats(Vec<f64>),
    DateTimes(Vec<DateTime<Utc>>),
    Objects(Vec<PropertyBag>),
}

impl List {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::Strings(v) => v.len(),
            Self::Bools(v) => v.len(),
            Self::Ints(v) => v.len(),
            Self::UInts(v) => v.len(),
            Self::Floats(v) => v.len(),
            Self::DateTimes(v) => v.len(),
            Self::Objects(v) => v.len(),
        }
    }

    /// Check if the list has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind shared by every element
    pub const fn element_kind(&self) -> ValueKind {
        match self {
            Self::Strings(_) => ValueKind::String,
            Self::Bools(_) => ValueKind::Boolean,
            Self::Ints(_) => ValueKind::Integer,
            Self::UInts(_) => ValueKind::Unsigned,
            Self::Floats(_) => ValueKind::Float,
            Self::DateTimes(_) => ValueKind::DateTime,
            Self::Objects(_) => ValueKind::Object,
        }
    }

    /// The backing `Vec<_>` as `&dyn Any`, for exact-type downcasts.
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Self::Strings(v) => v,
            Self::Bools(v) => v,
            Self::Ints(v) => v,
            Self::UInts(v) => v,
            Self::Floats(v) => v,
            Self::DateTimes(v) => v,
            Self::Objects(v) => v,
        }
    }

    /// Copy the elements out as dynamic values.
    ///
    /// Used when a caller asks for an element type other than the native one
    /// (e.g. `i32` out of a `Vec<i64>`), so the regular coercion rule applies.
    pub fn to_values(&self) -> Vec<Value> {
        match self {
            Self::Strings(v) => v.iter().cloned().map(Value::String).collect(),
            Self::Bools(v) => v.iter().copied().map(Value::Bool).collect(),
            Self::Ints(v) => v.iter().copied().map(Value::Int).collect(),
            Self::UInts(v) => v.iter().copied().map(Value::UInt).collect(),
            Self::Floats(v) => v.iter().copied().map(Value::Float).collect(),
            Self::DateTimes(v) => v.iter().copied().map(Value::DateTime).collect(),
            Self::Objects(v) => v.iter().cloned().map(Value::Object).collect(),
        }
    }
}

// ==================== From impls ====================

macro_rules! impl_list_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for List {
                fn from(items: Vec<$ty>) -> Self {
                    Self::$variant(items)
                }
            }

            impl From<Vec<Box<$ty>>> for List {
                fn from(items: Vec<Box<$ty>>) -> Self {
                    Self::$variant(items.into_iter().map(|item| *item).collect())
                }
            }
        )*
    };
}

impl_list_from! {
    String => Strings,
    bool => Bools,
    i64 => Ints,
    u64 => UInts,
    f64 => Floats,
    DateTime<Utc> => DateTimes,
    PropertyBag => Objects,
}
