//! Sequence accessors.
//!
//! Every element must coerce, or the whole access fails with the position
//! and value of the first bad element. There are no partial results.

#![allow(clippy::box_collection, clippy::vec_box, reason = "boxed shapes are part of the accessor surface")]

use std::any::Any;
use std::borrow::Cow;

use super::fallback;
use crate::bag::{PropertyBag, Props};
use crate::coerce::{short_type_name, Coerce};
use crate::error::{PropError, PropResult};
use crate::fault::abort;
use crate::value::{List, Value};

fn not_a_sequence(key: &str, element: impl std::fmt::Display, value: &Value) -> PropError {
    PropError::invalid_type(key, format!("array of {element}"), value, None)
}

/// Coerce a sequence value element by element.
fn coerce_sequence<T: Coerce>(key: &str, value: &Value) -> PropResult<Vec<T>> {
    match value {
        Value::List(list) => match T::from_list(list) {
            Some(items) => Ok(items),
            None => coerce_elements(key, &list.to_values()),
        },
        Value::Array(items) => coerce_elements(key, items),
        other => Err(not_a_sequence(key, T::expected(), other)),
    }
}

fn coerce_elements<T: Coerce>(key: &str, items: &[Value]) -> PropResult<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::coerce(item).map_err(|err| {
                PropError::invalid_element(
                    key,
                    format!("{} element", T::expected()),
                    index,
                    item,
                    Some(err),
                )
            })
        })
        .collect()
}

/// Downcast a sequence value element by element.
fn downcast_sequence<T: Any + Clone>(key: &str, value: &Value) -> PropResult<Vec<T>> {
    let items: Cow<'_, [Value]> = match value {
        Value::List(list) => {
            if let Some(items) = list.as_any().downcast_ref::<Vec<T>>() {
                return Ok(items.clone());
            }
            Cow::Owned(list.to_values())
        }
        Value::Array(items) => Cow::Borrowed(items.as_slice()),
        other => return Err(not_a_sequence(key, short_type_name::<T>(), other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.downcast::<T>().ok_or_else(|| {
                PropError::invalid_element(
                    key,
                    format!("{} element", short_type_name::<T>()),
                    index,
                    item,
                    None,
                )
            })
        })
        .collect()
}

/// Hand each nested bag of a sequence value to `ctor`.
fn construct_sequence<T, F>(key: &str, value: &Value, mut ctor: F) -> PropResult<Vec<T>>
where
    F: FnMut(&PropertyBag) -> T,
{
    match value {
        Value::List(List::Objects(bags)) => Ok(bags.iter().map(ctor).collect()),
        Value::Array(items) => {
            // Validate every element before constructing any of them.
            let bags = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_object().ok_or_else(|| {
                        PropError::invalid_element(key, "object element", index, item, None)
                    })
                })
                .collect::<PropResult<Vec<_>>>()?;
            Ok(bags.into_iter().map(&mut ctor).collect())
        }
        Value::List(list) => match list.to_values().into_iter().next() {
            None => Ok(Vec::new()),
            Some(first) => Err(PropError::invalid_element(key, "object element", 0, &first, None)),
        },
        other => Err(not_a_sequence(key, "objects", other)),
    }
}

fn boxed<T>(items: Vec<T>) -> Vec<Box<T>> {
    items.into_iter().map(Box::new).collect()
}

impl Props<'_> {
    // ==================== Vec<T> ====================

    /// Get the sequence under `key` with every element coerced to `T`
    pub fn get_array<T: Coerce>(&self, key: &str) -> PropResult<Vec<T>> {
        coerce_sequence(key, self.lookup(key)?)
    }

    /// [`get_array`](Self::get_array), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_array<T: Coerce>(&self, key: &str) -> Vec<T> {
        self.get_array(key).unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_array`](Self::require_array) with `message` as the fault text
    #[track_caller]
    pub fn require_array_with<T: Coerce>(&self, key: &str, message: &str) -> Vec<T> {
        self.get_array(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// [`get_array`](Self::get_array), or `default` on failure
    pub fn get_array_or<T: Coerce>(&self, key: &str, default: Vec<T>) -> Vec<T> {
        fallback(key, self.get_array(key), || default)
    }

    /// [`get_array`](Self::get_array), or a computed default on failure
    pub fn get_array_or_else<T: Coerce, F>(&self, key: &str, default_fn: F) -> Vec<T>
    where
        F: FnOnce() -> Vec<T>,
    {
        fallback(key, self.get_array(key), default_fn)
    }

    // ==================== Vec<Box<T>> ====================

    /// Coerced sequence with every element boxed
    pub fn get_array_of_boxed<T: Coerce>(&self, key: &str) -> PropResult<Vec<Box<T>>> {
        self.get_array(key).map(boxed)
    }

    /// [`get_array_of_boxed`](Self::get_array_of_boxed), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_array_of_boxed<T: Coerce>(&self, key: &str) -> Vec<Box<T>> {
        self.get_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_array_of_boxed`](Self::require_array_of_boxed) with `message` as the fault text
    #[track_caller]
    pub fn require_array_of_boxed_with<T: Coerce>(&self, key: &str, message: &str) -> Vec<Box<T>> {
        self.get_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed elements, or `default` on failure
    pub fn get_array_of_boxed_or<T: Coerce>(&self, key: &str, default: Vec<Box<T>>) -> Vec<Box<T>> {
        fallback(key, self.get_array_of_boxed(key), || default)
    }

    /// Boxed elements, or a computed default on failure
    pub fn get_array_of_boxed_or_else<T: Coerce, F>(&self, key: &str, default_fn: F) -> Vec<Box<T>>
    where
        F: FnOnce() -> Vec<Box<T>>,
    {
        fallback(key, self.get_array_of_boxed(key), default_fn)
    }

    // ==================== Box<Vec<T>> ====================

    /// Coerced sequence in a fresh box
    pub fn get_boxed_array<T: Coerce>(&self, key: &str) -> PropResult<Box<Vec<T>>> {
        self.get_array(key).map(Box::new)
    }

    /// [`get_boxed_array`](Self::get_boxed_array), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_boxed_array<T: Coerce>(&self, key: &str) -> Box<Vec<T>> {
        self.get_boxed_array(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_boxed_array`](Self::require_boxed_array) with `message` as the fault text
    #[track_caller]
    pub fn require_boxed_array_with<T: Coerce>(&self, key: &str, message: &str) -> Box<Vec<T>> {
        self.get_boxed_array(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed sequence, or `default` (which may be `None`) on failure
    pub fn get_boxed_array_or<T: Coerce>(
        &self,
        key: &str,
        default: Option<Box<Vec<T>>>,
    ) -> Option<Box<Vec<T>>> {
        fallback(key, self.get_boxed_array(key).map(Some), || default)
    }

    /// Boxed sequence, or a computed (possibly `None`) default on failure
    pub fn get_boxed_array_or_else<T: Coerce, F>(&self, key: &str, default_fn: F) -> Option<Box<Vec<T>>>
    where
        F: FnOnce() -> Option<Box<Vec<T>>>,
    {
        fallback(key, self.get_boxed_array(key).map(Some), default_fn)
    }

    // ==================== Box<Vec<Box<T>>> ====================

    /// Boxed sequence of boxed elements
    pub fn get_boxed_array_of_boxed<T: Coerce>(&self, key: &str) -> PropResult<Box<Vec<Box<T>>>> {
        self.get_array_of_boxed(key).map(Box::new)
    }

    /// [`get_boxed_array_of_boxed`](Self::get_boxed_array_of_boxed), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_boxed_array_of_boxed<T: Coerce>(&self, key: &str) -> Box<Vec<Box<T>>> {
        self.get_boxed_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_boxed_array_of_boxed`](Self::require_boxed_array_of_boxed) with `message` as the fault text
    #[track_caller]
    pub fn require_boxed_array_of_boxed_with<T: Coerce>(
        &self,
        key: &str,
        message: &str,
    ) -> Box<Vec<Box<T>>> {
        self.get_boxed_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed sequence of boxes, or `default` (which may be `None`) on failure
    pub fn get_boxed_array_of_boxed_or<T: Coerce>(
        &self,
        key: &str,
        default: Option<Box<Vec<Box<T>>>>,
    ) -> Option<Box<Vec<Box<T>>>> {
        fallback(key, self.get_boxed_array_of_boxed(key).map(Some), || default)
    }

    /// Boxed sequence of boxes, or a computed default on failure
    pub fn get_boxed_array_of_boxed_or_else<T: Coerce, F>(
        &self,
        key: &str,
        default_fn: F,
    ) -> Option<Box<Vec<Box<T>>>>
    where
        F: FnOnce() -> Option<Box<Vec<Box<T>>>>,
    {
        fallback(key, self.get_boxed_array_of_boxed(key).map(Some), default_fn)
    }

    // ==================== Exact-shape objects ====================

    /// Get a sequence whose every element is exactly a `T`.
    ///
    /// A typed list backed by `Vec<T>` is returned whole; anything else is
    /// checked element by element with [`Value::downcast`].
    pub fn get_object_array<T: Any + Clone>(&self, key: &str) -> PropResult<Vec<T>> {
        downcast_sequence(key, self.lookup(key)?)
    }

    /// [`get_object_array`](Self::get_object_array), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_object_array<T: Any + Clone>(&self, key: &str) -> Vec<T> {
        self.get_object_array(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_object_array`](Self::require_object_array) with `message` as the fault text
    #[track_caller]
    pub fn require_object_array_with<T: Any + Clone>(&self, key: &str, message: &str) -> Vec<T> {
        self.get_object_array(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Exact-shape sequence, or `default` on failure
    pub fn get_object_array_or<T: Any + Clone>(&self, key: &str, default: Vec<T>) -> Vec<T> {
        fallback(key, self.get_object_array(key), || default)
    }

    /// Exact-shape sequence, or a computed default on failure
    pub fn get_object_array_or_else<T: Any + Clone, F>(&self, key: &str, default_fn: F) -> Vec<T>
    where
        F: FnOnce() -> Vec<T>,
    {
        fallback(key, self.get_object_array(key), default_fn)
    }

    // Vec<Box<T>>

    /// Exact-shape sequence with every element boxed
    pub fn get_object_array_of_boxed<T: Any + Clone>(&self, key: &str) -> PropResult<Vec<Box<T>>> {
        self.get_object_array(key).map(boxed)
    }

    /// [`get_object_array_of_boxed`](Self::get_object_array_of_boxed), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_object_array_of_boxed<T: Any + Clone>(&self, key: &str) -> Vec<Box<T>> {
        self.get_object_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_object_array_of_boxed`](Self::require_object_array_of_boxed) with `message` as the fault text
    #[track_caller]
    pub fn require_object_array_of_boxed_with<T: Any + Clone>(
        &self,
        key: &str,
        message: &str,
    ) -> Vec<Box<T>> {
        self.get_object_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// [`get_object_array_of_boxed`](Self::get_object_array_of_boxed), or `default` on failure
    pub fn get_object_array_of_boxed_or<T: Any + Clone>(
        &self,
        key: &str,
        default: Vec<Box<T>>,
    ) -> Vec<Box<T>> {
        fallback(key, self.get_object_array_of_boxed(key), || default)
    }

    /// [`get_object_array_of_boxed`](Self::get_object_array_of_boxed), or a computed default on failure
    pub fn get_object_array_of_boxed_or_else<T: Any + Clone, F>(
        &self,
        key: &str,
        default_fn: F,
    ) -> Vec<Box<T>>
    where
        F: FnOnce() -> Vec<Box<T>>,
    {
        fallback(key, self.get_object_array_of_boxed(key), default_fn)
    }

    // Box<Vec<T>>

    /// Exact-shape sequence in a fresh box
    pub fn get_boxed_object_array<T: Any + Clone>(&self, key: &str) -> PropResult<Box<Vec<T>>> {
        self.get_object_array(key).map(Box::new)
    }

    /// [`get_boxed_object_array`](Self::get_boxed_object_array), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_boxed_object_array<T: Any + Clone>(&self, key: &str) -> Box<Vec<T>> {
        self.get_boxed_object_array(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_boxed_object_array`](Self::require_boxed_object_array) with `message` as the fault text
    #[track_caller]
    pub fn require_boxed_object_array_with<T: Any + Clone>(
        &self,
        key: &str,
        message: &str,
    ) -> Box<Vec<T>> {
        self.get_boxed_object_array(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed exact-shape sequence, or `default` (which may be `None`) on failure
    pub fn get_boxed_object_array_or<T: Any + Clone>(
        &self,
        key: &str,
        default: Option<Box<Vec<T>>>,
    ) -> Option<Box<Vec<T>>> {
        fallback(key, self.get_boxed_object_array(key).map(Some), || default)
    }

    /// [`get_boxed_object_array`](Self::get_boxed_object_array), or a computed default on failure
    pub fn get_boxed_object_array_or_else<T: Any + Clone, F>(
        &self,
        key: &str,
        default_fn: F,
    ) -> Option<Box<Vec<T>>>
    where
        F: FnOnce() -> Option<Box<Vec<T>>>,
    {
        fallback(key, self.get_boxed_object_array(key).map(Some), default_fn)
    }

    // Box<Vec<Box<T>>>

    /// Boxed exact-shape sequence of boxed elements
    pub fn get_boxed_object_array_of_boxed<T: Any + Clone>(
        &self,
        key: &str,
    ) -> PropResult<Box<Vec<Box<T>>>> {
        self.get_object_array_of_boxed(key).map(Box::new)
    }

    /// [`get_boxed_object_array_of_boxed`](Self::get_boxed_object_array_of_boxed), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_boxed_object_array_of_boxed<T: Any + Clone>(&self, key: &str) -> Box<Vec<Box<T>>> {
        self.get_boxed_object_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_boxed_object_array_of_boxed`](Self::require_boxed_object_array_of_boxed) with `message` as the fault text
    #[track_caller]
    pub fn require_boxed_object_array_of_boxed_with<T: Any + Clone>(
        &self,
        key: &str,
        message: &str,
    ) -> Box<Vec<Box<T>>> {
        self.get_boxed_object_array_of_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// [`get_boxed_object_array_of_boxed`](Self::get_boxed_object_array_of_boxed), or `default` on failure
    pub fn get_boxed_object_array_of_boxed_or<T: Any + Clone>(
        &self,
        key: &str,
        default: Option<Box<Vec<Box<T>>>>,
    ) -> Option<Box<Vec<Box<T>>>> {
        fallback(key, self.get_boxed_object_array_of_boxed(key).map(Some), || default)
    }

    /// [`get_boxed_object_array_of_boxed`](Self::get_boxed_object_array_of_boxed), or a computed default on failure
    pub fn get_boxed_object_array_of_boxed_or_else<T: Any + Clone, F>(
        &self,
        key: &str,
        default_fn: F,
    ) -> Option<Box<Vec<Box<T>>>>
    where
        F: FnOnce() -> Option<Box<Vec<Box<T>>>>,
    {
        fallback(key, self.get_boxed_object_array_of_boxed(key).map(Some), default_fn)
    }

    // ==================== Constructor-delegated objects ====================

    /// Build a `T` from every nested bag in the sequence under `key`.
    ///
    /// All elements are checked before `ctor` runs, so a bad element at any
    /// position means `ctor` is never called.
    pub fn get_object_array_via<T, F>(&self, key: &str, ctor: F) -> PropResult<Vec<T>>
    where
        F: FnMut(&PropertyBag) -> T,
    {
        construct_sequence(key, self.lookup(key)?, ctor)
    }

    /// [`get_object_array_via`](Self::get_object_array_via), panicking with a
    /// [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_object_array_via<T, F>(&self, key: &str, ctor: F) -> Vec<T>
    where
        F: FnMut(&PropertyBag) -> T,
    {
        self.get_object_array_via(key, ctor)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_object_array_via`](Self::require_object_array_via) with
    /// `message` as the fault text
    #[track_caller]
    pub fn require_object_array_via_with<T, F>(&self, key: &str, ctor: F, message: &str) -> Vec<T>
    where
        F: FnMut(&PropertyBag) -> T,
    {
        self.get_object_array_via(key, ctor)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Constructed sequence, or `default` on failure
    pub fn get_object_array_via_or<T, F>(&self, key: &str, ctor: F, default: Vec<T>) -> Vec<T>
    where
        F: FnMut(&PropertyBag) -> T,
    {
        fallback(key, self.get_object_array_via(key, ctor), || default)
    }

    /// Constructed sequence, or a computed default on failure
    pub fn get_object_array_via_or_else<T, F, D>(&self, key: &str, ctor: F, default_fn: D) -> Vec<T>
    where
        F: FnMut(&PropertyBag) -> T,
        D: FnOnce() -> Vec<T>,
    {
        fallback(key, self.get_object_array_via(key, ctor), default_fn)
    }
}
