//! Single-value accessors.
//!
//! ```rust
//! use nebula_props::{bag, PropsExt};
//!
//! let bag = bag! { "name" => "Alice", "age" => 30, "count" => "42" };
//! let props = bag.props();
//!
//! assert_eq!(props.get::<String>("name").unwrap(), "Alice");
//! assert!(props.get::<String>("age").unwrap_err().is_invalid_type());
//! assert!(props.get::<String>("missing").unwrap_err().is_missing());
//! assert_eq!(props.get_or("missing", "Bob".to_string()), "Bob");
//! assert_eq!(props.get::<i32>("count").unwrap(), 42);
//! ```

#![allow(clippy::box_collection, reason = "boxed shapes are part of the accessor surface")]

use std::borrow::Cow;

use regex::Regex;

use super::fallback;
use crate::bag::Props;
use crate::coerce::{match_pattern, Coerce};
use crate::error::{PropError, PropResult};
use crate::fault::abort;
use crate::value::Value;

impl<'a> Props<'a> {
    // ==================== Owned values ====================

    /// Get the value under `key` coerced to `T`
    pub fn get<T: Coerce>(&self, key: &str) -> PropResult<T> {
        let value = self.lookup(key)?;
        T::coerce(value).map_err(|err| PropError::invalid_type(key, T::expected(), value, Some(err)))
    }

    /// Get the value under `key`, panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require<T: Coerce>(&self, key: &str) -> T {
        self.get(key).unwrap_or_else(|err| abort(err, None))
    }

    /// Like [`require`](Self::require), with `message` as the fault text
    #[track_caller]
    pub fn require_with<T: Coerce>(&self, key: &str, message: &str) -> T {
        self.get(key).unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Get the value under `key`, or `default` if it is missing or invalid
    pub fn get_or<T: Coerce>(&self, key: &str, default: T) -> T {
        fallback(key, self.get(key), || default)
    }

    /// Get the value under `key`, or compute a default if it is missing or invalid
    pub fn get_or_else<T: Coerce, F>(&self, key: &str, default_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        fallback(key, self.get(key), default_fn)
    }

    /// Try to get the value under `key`, returning None on error
    pub fn get_opt<T: Coerce>(&self, key: &str) -> Option<T> {
        self.get(key).ok()
    }

    // ==================== Boxed values ====================

    /// Get a freshly allocated copy of the value under `key`
    pub fn get_boxed<T: Coerce>(&self, key: &str) -> PropResult<Box<T>> {
        self.get(key).map(Box::new)
    }

    /// Boxed [`require`](Self::require)
    #[track_caller]
    pub fn require_boxed<T: Coerce>(&self, key: &str) -> Box<T> {
        self.get_boxed(key).unwrap_or_else(|err| abort(err, None))
    }

    /// Boxed [`require_with`](Self::require_with)
    #[track_caller]
    pub fn require_boxed_with<T: Coerce>(&self, key: &str, message: &str) -> Box<T> {
        self.get_boxed(key)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed value, or `default` (which may be `None`) on failure
    pub fn get_boxed_or<T: Coerce>(&self, key: &str, default: Option<Box<T>>) -> Option<Box<T>> {
        fallback(key, self.get_boxed(key).map(Some), || default)
    }

    /// Boxed value, or a computed default on failure
    pub fn get_boxed_or_else<T: Coerce, F>(&self, key: &str, default_fn: F) -> Option<Box<T>>
    where
        F: FnOnce() -> Option<Box<T>>,
    {
        fallback(key, self.get_boxed(key).map(Some), default_fn)
    }

    // ==================== Raw-value constructors ====================

    /// Build a `T` from whatever raw value sits under `key`.
    ///
    /// `ctor` sees the value untouched (null included); only an absent key
    /// yields `default`.
    pub fn get_with<T, F>(&self, key: &str, ctor: F, default: T) -> T
    where
        F: FnOnce(&'a Value) -> T,
    {
        self.raw(key).map_or(default, ctor)
    }

    /// Like [`get_with`](Self::get_with), computing the default lazily
    pub fn get_with_or_else<T, F, D>(&self, key: &str, ctor: F, default_fn: D) -> T
    where
        F: FnOnce(&'a Value) -> T,
        D: FnOnce() -> T,
    {
        self.raw(key).map_or_else(default_fn, ctor)
    }

    // ==================== Pattern-validated strings ====================

    /// Get a string that must match `pattern`.
    ///
    /// A non-string value is `InvalidType`; a string that does not match is
    /// `RegexMismatch`; a pattern that does not compile is `InvalidType`
    /// with a [`CoerceError::Pattern`](crate::CoerceError::Pattern) cause.
    pub fn get_matching(&self, key: &str, pattern: &str) -> PropResult<String> {
        let value = self.lookup(key)?;
        match_pattern(key, value, pattern, || Regex::new(pattern).map(Cow::Owned))
    }

    /// Get a string that must match an already compiled `regex`
    pub fn get_matching_regex(&self, key: &str, regex: &Regex) -> PropResult<String> {
        let value = self.lookup(key)?;
        match_pattern(key, value, regex.as_str(), || Ok(Cow::Borrowed(regex)))
    }

    /// Matching string, panicking with a [`Fault`](crate::Fault) on failure
    #[track_caller]
    pub fn require_matching(&self, key: &str, pattern: &str) -> String {
        self.get_matching(key, pattern)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// [`require_matching`](Self::require_matching) with `message` as the fault text
    #[track_caller]
    pub fn require_matching_with(&self, key: &str, pattern: &str, message: &str) -> String {
        self.get_matching(key, pattern)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Matching string, or `default` on failure
    pub fn get_matching_or(&self, key: &str, pattern: &str, default: impl Into<String>) -> String {
        fallback(key, self.get_matching(key, pattern), || default.into())
    }

    /// Matching string, or a computed default on failure
    pub fn get_matching_or_else<F>(&self, key: &str, pattern: &str, default_fn: F) -> String
    where
        F: FnOnce() -> String,
    {
        fallback(key, self.get_matching(key, pattern), default_fn)
    }

    /// Boxed [`get_matching`](Self::get_matching)
    pub fn get_matching_boxed(&self, key: &str, pattern: &str) -> PropResult<Box<String>> {
        self.get_matching(key, pattern).map(Box::new)
    }

    /// Boxed [`require_matching`](Self::require_matching)
    #[track_caller]
    pub fn require_matching_boxed(&self, key: &str, pattern: &str) -> Box<String> {
        self.get_matching_boxed(key, pattern)
            .unwrap_or_else(|err| abort(err, None))
    }

    /// Boxed [`require_matching_with`](Self::require_matching_with)
    #[track_caller]
    pub fn require_matching_boxed_with(&self, key: &str, pattern: &str, message: &str) -> Box<String> {
        self.get_matching_boxed(key, pattern)
            .unwrap_or_else(|err| abort(err, Some(message)))
    }

    /// Boxed matching string, or `default` (which may be `None`) on failure
    pub fn get_matching_boxed_or(
        &self,
        key: &str,
        pattern: &str,
        default: Option<Box<String>>,
    ) -> Option<Box<String>> {
        fallback(key, self.get_matching_boxed(key, pattern).map(Some), || default)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{DateTime, Utc};
    use num_bigint::BigInt;

    use crate::fault::catch_fault;
    use crate::{bag, CoerceError, Props, PropsExt, Value};

    const EMAIL: &str = r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$";

    #[test]
    fn test_string() {
        let bag = bag! { "valid" => "test", "invalid" => 123 };
        let props = bag.props();

        assert_eq!(props.get::<String>("valid").unwrap(), "test");
        assert!(props.get::<String>("missing").unwrap_err().is_missing());
        assert!(props.get::<String>("invalid").unwrap_err().is_invalid_type());

        assert_eq!(props.require::<String>("valid"), "test");
        assert!(catch_fault(|| props.require::<String>("missing")).is_err());
        assert!(catch_fault(|| props.require::<String>("invalid")).is_err());

        assert_eq!(props.get_or("valid", "default".to_string()), "test");
        assert_eq!(props.get_or("missing", "default".to_string()), "default");
        assert_eq!(props.get_or("invalid", "default".to_string()), "default");
    }

    #[test]
    fn test_invalid_type_carries_value_and_expected() {
        let bag = bag! { "age" => 30 };
        match bag.props().get::<String>("age").unwrap_err() {
            crate::PropError::InvalidType {
                expected, actual, ..
            } => {
                assert_eq!(expected, "string");
                assert_eq!(actual, Value::Int(30));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_is_invalid_not_default() {
        let bag = bag! { "n" => Value::Null };
        assert!(bag.props().get::<i64>("n").unwrap_err().is_invalid_type());
        assert_eq!(bag.props().get_or("n", 7_i64), 7);
    }

    #[test]
    fn test_nil_bag() {
        let props = Props::none();
        assert!(props.get::<bool>("any").unwrap_err().is_missing());
        assert!(props.get_or("any", true));
    }

    #[test]
    fn test_computed_default_is_lazy() {
        let bag = bag! { "n" => 5 };
        let calls = Cell::new(0);
        let count = || {
            calls.set(calls.get() + 1);
            100
        };

        assert_eq!(bag.props().get_or_else::<i32, _>("n", count), 5);
        assert_eq!(calls.get(), 0);
        assert_eq!(bag.props().get_or_else::<i32, _>("missing", count), 100);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_require_with_custom_message() {
        let bag = bag! {};
        let fault = catch_fault(|| bag.props().require_with::<bool>("flag", "flag is required"))
            .unwrap_err();
        assert_eq!(fault.message(), "flag is required");
        assert!(fault.cause().is_missing());
    }

    #[test]
    fn test_boolean() {
        let bag = bag! { "true" => true, "false" => false, "invalid" => "true" };
        let props = bag.props();

        assert!(props.get::<bool>("true").unwrap());
        assert!(!props.get::<bool>("false").unwrap());
        assert!(props.get::<bool>("invalid").is_err());
        assert!(props.require::<bool>("true"));
        assert!(props.get_or("missing", true));
    }

    #[test]
    fn test_number() {
        let bag = bag! { "int" => 10, "float" => 10.5, "string" => "20", "invalid" => "abc" };
        let props = bag.props();

        assert_eq!(props.get::<i32>("int").unwrap(), 10);
        assert_eq!(props.get::<f64>("float").unwrap(), 10.5);
        assert_eq!(props.get::<i32>("string").unwrap(), 20);
        assert_eq!(props.get_or("missing", 100_i32), 100);

        let err = props.get::<i32>("invalid").unwrap_err();
        assert!(matches!(err.cause(), Some(CoerceError::Number(_))));
        assert!(err.to_string().contains("i32"));
    }

    #[test]
    fn test_date() {
        let bag = bag! {
            "ms" => 1_700_000_000_000_i64,
            "text" => "2023-11-14T22:13:20Z",
            "invalid" => "not a date",
        };
        let props = bag.props();

        let from_ms = props.get::<DateTime<Utc>>("ms").unwrap();
        let from_text = props.get::<DateTime<Utc>>("text").unwrap();
        assert_eq!(from_ms, from_text);
        assert!(matches!(
            props.get::<DateTime<Utc>>("invalid").unwrap_err().cause(),
            Some(CoerceError::Timestamp(_))
        ));
    }

    #[test]
    fn test_bigint() {
        let bag = bag! { "str" => "12345678901234567890", "float" => 123.0, "invalid" => "abc" };
        let props = bag.props();

        assert_eq!(
            props.get::<BigInt>("str").unwrap().to_string(),
            "12345678901234567890"
        );
        assert_eq!(props.get::<BigInt>("float").unwrap(), BigInt::from(123));
        assert!(props.get::<BigInt>("invalid").is_err());
        assert_eq!(props.get_or("missing", BigInt::from(0)), BigInt::from(0));
    }

    #[test]
    fn test_boxed() {
        let bag = bag! { "str" => "s" };
        let props = bag.props();

        assert_eq!(*props.get_boxed::<String>("str").unwrap(), "s");
        assert_eq!(*props.require_boxed::<String>("str"), "s");
        assert!(props.get_boxed_or::<String>("missing", None).is_none());
        assert_eq!(
            props.get_boxed_or("missing", Some(Box::new(1_i32))),
            Some(Box::new(1))
        );
        assert!(catch_fault(|| props.require_boxed::<String>("missing")).is_err());
        assert_eq!(
            props.get_boxed_or_else::<i32, _>("missing", || Some(Box::new(9))),
            Some(Box::new(9))
        );
    }

    #[test]
    fn test_get_with_raw_constructor() {
        let bag = bag! { "bool" => true };
        let props = bag.props();

        assert!(props.get_with("bool", |v| v == &Value::Bool(true), false));
        assert!(!props.get_with("missing", |_| true, false));
        assert!(props.get_with_or_else("bool", |_| true, || false));
        assert!(!props.get_with_or_else("missing", |_| true, || false));
    }

    #[test]
    fn test_matching() {
        let bag = bag! { "email" => "test@example.com", "invalid" => "not-an-email", "bad_type" => 123 };
        let props = bag.props();

        assert_eq!(props.get_matching("email", EMAIL).unwrap(), "test@example.com");
        assert!(props.get_matching("invalid", EMAIL).unwrap_err().is_regex_mismatch());
        assert!(props.get_matching("bad_type", EMAIL).unwrap_err().is_invalid_type());
        assert!(props.get_matching("missing", EMAIL).unwrap_err().is_missing());

        let err = props.get_matching("email", "[").unwrap_err();
        assert!(err.to_string().contains("invalid regex"));

        assert_eq!(props.require_matching("email", EMAIL), "test@example.com");
        assert!(catch_fault(|| props.require_matching("invalid", EMAIL)).is_err());

        assert_eq!(props.get_matching_or("email", EMAIL, "def"), "test@example.com");
        assert_eq!(props.get_matching_or("invalid", EMAIL, "def"), "def");
        assert_eq!(
            props.get_matching_or_else("invalid", EMAIL, || "lazy".into()),
            "lazy"
        );

        assert_eq!(*props.get_matching_boxed("email", EMAIL).unwrap(), "test@example.com");
        assert!(props.get_matching_boxed_or("invalid", EMAIL, None).is_none());
        assert_eq!(*props.require_matching_boxed("email", EMAIL), "test@example.com");
        assert!(catch_fault(|| props.require_matching_boxed("invalid", EMAIL)).is_err());
    }

    #[test]
    fn test_matching_precompiled() {
        let regex = regex::Regex::new(r"^\d+$").unwrap();
        let bag = bag! { "n" => "123", "s" => "abc" };
        assert_eq!(bag.props().get_matching_regex("n", &regex).unwrap(), "123");

        let err = bag.props().get_matching_regex("s", &regex).unwrap_err();
        assert!(matches!(
            err,
            crate::PropError::RegexMismatch { ref pattern, .. } if pattern == r"^\d+$"
        ));
    }

    #[test]
    fn test_matching_aborts_take_custom_message() {
        let bag = bag! { "email" => "not-an-email", "port" => "http" };
        let props = bag.props();

        let fault = catch_fault(|| props.require_matching_with("email", EMAIL, "email is malformed"))
            .unwrap_err();
        assert_eq!(fault.message(), "email is malformed");
        assert!(fault.cause().is_regex_mismatch());

        let fault = catch_fault(|| props.require_matching_boxed_with("email", EMAIL, "boxed email"))
            .unwrap_err();
        assert_eq!(fault.message(), "boxed email");

        let fault = catch_fault(|| props.require_boxed_with::<u16>("port", "port must be numeric"))
            .unwrap_err();
        assert_eq!(fault.message(), "port must be numeric");
        assert!(fault.cause().is_invalid_type());
    }
}
