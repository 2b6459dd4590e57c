//! The dynamically-typed payload stored under a property key.
//!
//! [`Value`] is a closed enum: every kind an accessor can coerce from is a
//! variant, so runtime inspection is a `match` rather than reflection.

mod conversions;
mod kind;
mod list;

use core::any::{Any, TypeId};

use chrono::{DateTime, Utc};

pub use kind::ValueKind;
pub use list::List;

use crate::bag::PropertyBag;

/// Dynamically-typed property value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null, distinct from an absent key
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed integer (narrower signed and unsigned types widen into this)
    Int(i64),

    /// Unsigned integer that may not fit in `i64`
    UInt(u64),

    /// Floating point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Timestamp
    DateTime(DateTime<Utc>),

    /// Heterogeneous sequence
    Array(Vec<Value>),

    /// Homogeneous sequence of native values
    List(List),

    /// Nested property bag
    Object(PropertyBag),
}

impl Value {
    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Integer,
            Self::UInt(_) => ValueKind::Unsigned,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Array(_) => ValueKind::Array,
            Self::List(_) => ValueKind::List,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Check if this is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a nested bag
    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    // ==================== Borrowing accessors ====================

    /// Try to get as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as nested bag
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&PropertyBag> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The variant payload as `&dyn Any`.
    ///
    /// Object accessors downcast this to the requested type, which is how an
    /// exact-shape check works without structural conversion: a
    /// `Value::Object` downcasts to [`PropertyBag`], a `Value::List` to its
    /// backing `Vec<_>`, a `Value::Array` to `Vec<Value>`. Null has no
    /// payload.
    #[must_use]
    pub fn payload(&self) -> Option<&dyn Any> {
        match self {
            Self::Null => None,
            Self::Bool(v) => Some(v),
            Self::Int(v) => Some(v),
            Self::UInt(v) => Some(v),
            Self::Float(v) => Some(v),
            Self::String(v) => Some(v),
            Self::DateTime(v) => Some(v),
            Self::Array(v) => Some(v),
            Self::List(list) => Some(list.as_any()),
            Self::Object(v) => Some(v),
        }
    }

    /// Clone out the payload if it is exactly a `T`.
    ///
    /// `Value` itself always matches, so `downcast::<Value>()` returns a copy
    /// of any value, null included. Numbers are stored widened, so a numeric
    /// `T` also matches when the stored number fits it without loss: an
    /// `Int(30)` downcasts to `i32` and `u8`, an `Int(300)` does not downcast
    /// to `u8`, and a `Float` downcasts to `f32` only if it round-trips.
    #[must_use]
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        let this: &dyn Any = self;
        if let Some(value) = this.downcast_ref::<T>() {
            return Some(value.clone());
        }
        if let Some(value) = self.payload()?.downcast_ref::<T>() {
            return Some(value.clone());
        }
        self.narrow::<T>()
    }

    fn narrow<T: Any + Clone>(&self) -> Option<T> {
        macro_rules! narrow_integer {
            ($v:expr; $($ty:ty),*) => {
                $(
                    if TypeId::of::<T>() == TypeId::of::<$ty>() {
                        let narrowed = <$ty>::try_from($v).ok()?;
                        return (&narrowed as &dyn Any).downcast_ref::<T>().cloned();
                    }
                )*
            };
        }

        match *self {
            Self::Int(v) => {
                narrow_integer!(v; i8, i16, i32, isize, u8, u16, u32, u64, usize);
                None
            }
            Self::UInt(v) => {
                narrow_integer!(v; i8, i16, i32, i64, isize, u8, u16, u32, usize);
                None
            }
            Self::Float(v) if TypeId::of::<T>() == TypeId::of::<f32>() => {
                let narrowed = v as f32;
                (v.is_nan() || f64::from(narrowed) == v)
                    .then(|| (&narrowed as &dyn Any).downcast_ref::<T>().cloned())
                    .flatten()
            }
            _ => None,
        }
    }
}
