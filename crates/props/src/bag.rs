//! Property bags and the read-only view the accessors hang off.
//!
//! A [`PropertyBag`] is a plain `HashMap<String, Value>`; whoever decoded it
//! owns it. [`Props`] borrows a bag (or no bag at all) for the duration of a
//! call and performs the one lookup step every accessor shares: an absent
//! bag or key is [`PropError::MissingField`], anything else, `null`
//! included, is handed on to the coercion rules.

use std::collections::HashMap;

use crate::error::{PropError, PropResult};
use crate::value::Value;

/// Mapping from string key to dynamically-typed value
pub type PropertyBag = HashMap<String, Value>;

/// Borrowed, possibly absent, property bag
#[derive(Debug, Clone, Copy, Default)]
pub struct Props<'a> {
    bag: Option<&'a PropertyBag>,
}

impl<'a> Props<'a> {
    /// View over an existing bag
    #[inline]
    pub const fn new(bag: &'a PropertyBag) -> Self {
        Self { bag: Some(bag) }
    }

    /// View over a missing bag; every key is absent
    #[inline]
    pub const fn none() -> Self {
        Self { bag: None }
    }

    /// The underlying bag, if any
    #[inline]
    pub const fn bag(&self) -> Option<&'a PropertyBag> {
        self.bag
    }

    /// Check whether `key` is present (an explicit null counts as present)
    pub fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// Raw value under `key`, without distinguishing why it is absent
    #[inline]
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.bag?.get(key)
    }

    /// Look up `key`, failing with `MissingField` if the bag or key is absent
    pub fn lookup(&self, key: &str) -> PropResult<&'a Value> {
        self.raw(key).ok_or_else(|| PropError::missing_field(key))
    }
}

impl<'a> From<&'a PropertyBag> for Props<'a> {
    fn from(bag: &'a PropertyBag) -> Self {
        Self::new(bag)
    }
}

impl<'a> From<Option<&'a PropertyBag>> for Props<'a> {
    fn from(bag: Option<&'a PropertyBag>) -> Self {
        Self { bag }
    }
}

/// Entry point for reading typed properties out of a bag
///
/// ```rust
/// use nebula_props::{bag, PropsExt};
///
/// let user = bag! { "name" => "Alice", "age" => 30 };
/// assert_eq!(user.props().get::<String>("name").unwrap(), "Alice");
/// assert_eq!(user.props().get_or("nickname", "none".to_string()), "none");
/// ```
pub trait PropsExt {
    /// Borrow as a [`Props`] view
    fn props(&self) -> Props<'_>;
}

impl PropsExt for PropertyBag {
    fn props(&self) -> Props<'_> {
        Props::new(self)
    }
}

impl PropsExt for Option<PropertyBag> {
    fn props(&self) -> Props<'_> {
        Props::from(self.as_ref())
    }
}
