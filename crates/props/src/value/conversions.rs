//! `From` conversions into [`Value`].
//!
//! Narrow native numbers widen into the three numeric variants here, so the
//! coercion rules only ever see `i64`, `u64` and `f64`.

use chrono::{DateTime, Utc};

use super::{List, Value};
use crate::bag::PropertyBag;

macro_rules! impl_from_lossless {
    ($variant:ident as $target:ty: $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_lossless!(Int as i64: i8, i16, i32, i64, u8, u16, u32);
impl_from_lossless!(UInt as u64: u64);
impl_from_lossless!(Float as f64: f32, f64);

impl From<isize> for Value {
    #[inline]
    fn from(v: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Self::Int(v as i64)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<PropertyBag> for Value {
    fn from(v: PropertyBag) -> Self {
        Self::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// Native sequences (and sequences of boxes) become typed lists.
macro_rules! impl_from_native_vec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for Value {
                fn from(v: Vec<$ty>) -> Self {
                    Self::List(List::from(v))
                }
            }

            impl From<Vec<Box<$ty>>> for Value {
                fn from(v: Vec<Box<$ty>>) -> Self {
                    Self::List(List::from(v))
                }
            }
        )*
    };
}

impl_from_native_vec!(String, bool, i64, u64, f64, DateTime<Utc>, PropertyBag);

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::List(List::Strings(v.into_iter().map(str::to_owned).collect()))
    }
}
