//! Nested object accessors.
//!
//! Two ways to get a structured value out of a bag:
//!
//! - exact shape: the stored value already *is* a `T` ([`Props::get_object`],
//!   [`Props::get_map`]); nothing is converted. Numbers are stored widened
//!   (`i64`, `u64`, `f64`), so a narrower numeric `T` matches when the stored
//!   number converts to it without loss: `30` is an `i32`, `300` is not a
//!   `u8`, `0.1` is not an `f32`.
//! - constructor: the stored value is a nested bag and the caller turns it
//!   into a `T` ([`Props::get_object_via`])
//!
//! ```rust
//! use nebula_props::{bag, PropertyBag, PropsExt};
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! fn server(bag: &PropertyBag) -> Server {
//!     let props = bag.props();
//!     Server {
//!         host: props.get_or("host", "localhost".to_string()),
//!         port: props.get_or("port", 8080),
//!     }
//! }
//!
//! let config = bag! { "server" => bag! { "port" => "9000" } };
//! let srv = config.props().get_object_via("server", server).unwrap();
//! assert_eq!(srv.host, "localhost");
//! assert_eq!(srv.port, 9000);
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;

use super::fallback;
use crate::bag::{PropertyBag, Props};
use crate::coerce::short_type_name;
use crate::error::{PropError, PropResult};
use crate::fault::abort;
use crate::value::Value;

impl Props<'_> {
    // ==================== Exact shape ====================

    /// Get the value under `key` if it is exactly a `T`
    pub fn get_object<T: Any + Clone>(&self, key: &str) -> PropResult<T> {
        let value = self.lookup(key)?;
        value
            .downcast::<T>()
            .ok_or_else(|| PropError::invalid_type(key, short_type_name::<T>(), value, None))
    }

    /// [`get_object`](Self::get_object), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_object<T: Any + Clone>(&self, key: &str) -> T {
        self.get_object(key).unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_object`](Self::require_object) with `message` as the fault text
    #[track_caller]
    pub fn require_object_with<T: Any + Clone>(&self, key: &str, message: &str) -> T {
        self.get_object(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Exact-shape value, or `default` on failure
    pub fn get_object_or<T: Any + Clone>(&self, key: &str, default: T) -> T {
        fallback(key, self.get_object(key), || default)
    }

    /// Exact-shape value, or a computed default on failure
    pub fn get_object_or_else<T: Any + Clone, F>(&self, key: &str, default_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        fallback(key, self.get_object(key), default_fn)
    }

    /// Boxed copy of an exact-shape value
    pub fn get_object_boxed<T: Any + Clone>(&self, key: &str) -> PropResult<Box<T>> {
        self.get_object(key).map(Box::new)
    }

    /// Boxed [`require_object`](Self::require_object)
    #[track_caller]
    pub fn require_object_boxed<T: Any + Clone>(&self, key: &str) -> Box<T> {
        self.get_object_boxed(key)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// Boxed [`require_object_with`](Self::require_object_with)
    #[track_caller]
    pub fn require_object_boxed_with<T: Any + Clone>(&self, key: &str, message: &str) -> Box<T> {
        self.get_object_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed exact-shape value, or `default` (which may be `None`) on failure
    pub fn get_object_boxed_or<T: Any + Clone>(
        &self,
        key: &str,
        default: Option<Box<T>>,
    ) -> Option<Box<T>> {
        fallback(key, self.get_object_boxed(key).map(Some), || default)
    }

    /// Three-way lookup that keeps an explicit null distinct from a default.
    ///
    /// - `null` under `key`: `None`
    /// - absent, or not exactly a `T`: `Some(default)`
    /// - a `T`: `Some(value)`
    pub fn get_object_or_null<T: Any + Clone>(&self, key: &str, default: T) -> Option<Box<T>> {
        match self.raw(key) {
            Some(Value::Null) => None,
            _ => Some(Box::new(self.get_object_or(key, default))),
        }
    }

    // ==================== Maps ====================

    /// Get a map stored under `key` as exactly `HashMap<K, V>`.
    ///
    /// Only a value that already has this type matches; a nested bag is a
    /// `HashMap<String, Value>` and is not re-typed into anything else.
    pub fn get_map<K, V>(&self, key: &str) -> PropResult<HashMap<K, V>>
    where
        K: Any + Clone + Eq + Hash,
        V: Any + Clone,
    {
        self.get_object(key)
    }

    /// [`get_map`](Self::get_map), panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_map<K, V>(&self, key: &str) -> HashMap<K, V>
    where
        K: Any + Clone + Eq + Hash,
        V: Any + Clone,
    {
        self.get_map(key).unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_map`](Self::require_map) with `message` as the fault text
    #[track_caller]
    pub fn require_map_with<K, V>(&self, key: &str, message: &str) -> HashMap<K, V>
    where
        K: Any + Clone + Eq + Hash,
        V: Any + Clone,
    {
        self.get_map(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Exact-type map, or `default` on failure
    pub fn get_map_or<K, V>(&self, key: &str, default: HashMap<K, V>) -> HashMap<K, V>
    where
        K: Any + Clone + Eq + Hash,
        V: Any + Clone,
    {
        fallback(key, self.get_map(key), || default)
    }

    // ==================== Constructor ====================

    /// Hand the nested bag under `key` to `ctor`.
    ///
    /// Anything other than a nested bag, null included, is `InvalidType`.
    pub fn get_object_via<T, F>(&self, key: &str, ctor: F) -> PropResult<T>
    where
        F: FnOnce(&PropertyBag) -> T,
    {
        let value = self.lookup(key)?;
        value
            .as_object()
            .map(ctor)
            .ok_or_else(|| PropError::invalid_type(key, "object", value, None))
    }

    /// [`get_object_via`](Self::get_object_via), panicking with a
    /// [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_object_via<T, F>(&self, key: &str, ctor: F) -> T
    where
        F: FnOnce(&PropertyBag) -> T,
    {
        self.get_object_via(key, ctor)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_object_via`](Self::require_object_via) with `message` as the
    /// fault text
    #[track_caller]
    pub fn require_object_via_with<T, F>(&self, key: &str, ctor: F, message: &str) -> T
    where
        F: FnOnce(&PropertyBag) -> T,
    {
        self.get_object_via(key, ctor)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Constructed object, or `default` when the key is absent or not a nested bag
    pub fn get_object_via_or<T, F>(&self, key: &str, ctor: F, default: T) -> T
    where
        F: FnOnce(&PropertyBag) -> T,
    {
        fallback(key, self.get_object_via(key, ctor), || default)
    }

    /// Constructed object, or a computed default on failure
    pub fn get_object_via_or_else<T, F, D>(&self, key: &str, ctor: F, default_fn: D) -> T
    where
        F: FnOnce(&PropertyBag) -> T,
        D: FnOnce() -> T,
    {
        fallback(key, self.get_object_via(key, ctor), default_fn)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use crate::fault::catch_fault;
    use crate::{bag, List, PropertyBag, PropsExt, Value};

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        name: String,
        age: i32,
    }

    fn user(bag: &PropertyBag) -> User {
        let props = bag.props();
        User {
            name: props.get_or("name", String::new()),
            age: props.get_or("age", 0),
        }
    }

    #[test]
    fn test_exact_shape() {
        let nested = bag! { "k" => "v" };
        let bag = bag! {
            "obj" => nested.clone(),
            "str" => "text",
            "list" => vec![1_i64, 2],
        };
        let props = bag.props();

        assert_eq!(props.get_object::<PropertyBag>("obj").unwrap(), nested);
        assert_eq!(props.get_object::<String>("str").unwrap(), "text");
        assert_eq!(props.get_object::<Vec<i64>>("list").unwrap(), [1, 2]);
        assert!(props.get_object::<Vec<i32>>("list").unwrap_err().is_invalid_type());
        assert!(props.get_object::<PropertyBag>("str").unwrap_err().is_invalid_type());
        assert!(props.get_object::<PropertyBag>("missing").unwrap_err().is_missing());

        let err = props.get_object::<Vec<i32>>("list").unwrap_err();
        assert!(err.to_string().contains("Vec<i32>"));
    }

    #[test]
    fn test_exact_shape_policies() {
        let bag = bag! { "obj" => bag! { "a" => 1 }, "str" => "x" };
        let props = bag.props();

        assert_eq!(props.require_object::<PropertyBag>("obj").len(), 1);
        assert!(catch_fault(|| props.require_object::<PropertyBag>("str")).is_err());

        let fault = catch_fault(|| props.require_object_with::<PropertyBag>("str", "need obj"))
            .unwrap_err();
        assert_eq!(fault.message(), "need obj");

        assert!(props.get_object_or("str", PropertyBag::new()).is_empty());
        assert!(props.get_object_or_else("missing", PropertyBag::new).is_empty());
        assert_eq!(props.get_object_boxed::<PropertyBag>("obj").unwrap().len(), 1);
        assert_eq!(props.require_object_boxed::<PropertyBag>("obj").len(), 1);
        assert!(props.get_object_boxed_or::<PropertyBag>("str", None).is_none());
    }

    #[test]
    fn test_or_null_three_way() {
        let bag = bag! { "null" => Value::Null, "str" => "value", "num" => 1 };
        let props = bag.props();

        assert_eq!(props.get_object_or_null("null", "d".to_string()), None);
        assert_eq!(
            props.get_object_or_null("missing", "d".to_string()),
            Some(Box::new("d".to_string()))
        );
        assert_eq!(
            props.get_object_or_null("num", "d".to_string()),
            Some(Box::new("d".to_string()))
        );
        assert_eq!(
            props.get_object_or_null("str", "d".to_string()),
            Some(Box::new("value".to_string()))
        );
    }

    #[test]
    fn test_map_exact_type_only() {
        let bag = bag! { "obj" => bag! { "a" => 1 } };
        let props = bag.props();

        let map = props.get_map::<String, Value>("obj").unwrap();
        assert_eq!(map.get("a"), Some(&Value::Int(1)));

        assert!(props.get_map::<String, i64>("obj").unwrap_err().is_invalid_type());
        assert!(props.get_map::<String, i64>("missing").unwrap_err().is_missing());
        assert!(props.get_map_or::<String, i64>("obj", HashMap::new()).is_empty());
        assert_eq!(props.require_map::<String, Value>("obj").len(), 1);
        assert!(catch_fault(|| props.require_map::<String, i64>("obj")).is_err());
    }

    #[test]
    fn test_via_constructor() {
        let bag = bag! {
            "user" => bag! { "name" => "Alice", "age" => "30" },
            "flat" => "Alice",
            "null" => Value::Null,
        };
        let props = bag.props();

        assert_eq!(
            props.get_object_via("user", user).unwrap(),
            User { name: "Alice".into(), age: 30 }
        );
        assert!(props.get_object_via("flat", user).unwrap_err().is_invalid_type());
        assert!(props.get_object_via("null", user).unwrap_err().is_invalid_type());
        assert!(props.get_object_via("missing", user).unwrap_err().is_missing());
    }

    #[test]
    fn test_via_constructor_policies() {
        let bag = bag! { "user" => bag! { "name" => "Bob" }, "flat" => 1 };
        let props = bag.props();
        let fallback = User { name: "default".into(), age: -1 };

        assert_eq!(props.get_object_via_or("user", user, fallback.clone()).name, "Bob");
        assert_eq!(props.get_object_via_or("flat", user, fallback.clone()), fallback);
        assert_eq!(props.get_object_via_or("missing", user, fallback.clone()), fallback);

        let calls = Cell::new(0);
        let lazy = || {
            calls.set(calls.get() + 1);
            fallback.clone()
        };
        assert_eq!(props.get_object_via_or_else("user", user, lazy).name, "Bob");
        assert_eq!(calls.get(), 0);
        assert_eq!(props.get_object_via_or_else("flat", user, lazy), fallback);
        assert_eq!(calls.get(), 1);

        assert_eq!(props.require_object_via("user", user).name, "Bob");
        let fault = catch_fault(|| props.require_object_via_with("flat", user, "bad user"))
            .unwrap_err();
        assert_eq!(fault.message(), "bad user");
        assert!(fault.cause().is_invalid_type());
    }

    #[test]
    fn test_constructor_not_called_on_failure() {
        let bag = bag! { "flat" => List::from(vec![1_i64]) };
        let called = Cell::new(false);
        let result = bag.props().get_object_via("flat", |_| called.set(true));
        assert!(result.is_err());
        assert!(!called.get());
    }

    #[test]
    fn test_narrow_numbers_keep_their_shape() {
        let bag = bag! {
            "i32" => 30_i32,
            "u8" => 200_u8,
            "f32" => 1.5_f32,
            "wide" => 300_i64,
            "lossy" => 0.1_f64,
            "neg" => -1_i32,
        };
        let props = bag.props();

        assert_eq!(props.get_object::<i32>("i32").unwrap(), 30);
        assert_eq!(props.get_object::<u8>("u8").unwrap(), 200);
        assert_eq!(props.get_object::<f32>("f32").unwrap(), 1.5);
        assert_eq!(props.get_object::<i64>("i32").unwrap(), 30);

        assert!(props.get_object::<u8>("wide").unwrap_err().is_invalid_type());
        assert!(props.get_object::<f32>("lossy").unwrap_err().is_invalid_type());
        assert!(props.get_object::<u32>("neg").unwrap_err().is_invalid_type());
        assert!(props.get_object::<String>("i32").unwrap_err().is_invalid_type());
    }

    #[test]
    fn test_object_aborts_take_custom_message() {
        let bag = bag! { "str" => "x" };
        let props = bag.props();

        let fault = catch_fault(|| props.require_object_boxed_with::<PropertyBag>("str", "need obj"))
            .unwrap_err();
        assert_eq!(fault.message(), "need obj");

        let fault = catch_fault(|| props.require_map_with::<String, i64>("str", "need map"))
            .unwrap_err();
        assert_eq!(fault.message(), "need map");
        assert!(fault.cause().is_invalid_type());

        let fault = catch_fault(|| props.require_object_via("missing", |b| b.len())).unwrap_err();
        assert!(fault.cause().is_missing());
    }
}
