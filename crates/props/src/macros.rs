/// Build a [`PropertyBag`](crate::PropertyBag) from `key => value` pairs.
///
/// Values go through `Value::from`, so anything with a `From` impl works.
///
/// ```rust
/// use nebula_props::{bag, Value};
///
/// let bag = bag! {
///     "name" => "Alice",
///     "tags" => vec!["a", "b"],
///     "parent" => Value::Null,
/// };
/// assert_eq!(bag.len(), 3);
/// ```
#[macro_export]
macro_rules! bag {
    () => {
        $crate::PropertyBag::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut bag = $crate::PropertyBag::new();
        $(
            bag.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        bag
    }};
}
