//! Typed accessors on [`Props`](crate::Props).
//!
//! Every accessor is one of four failure policies over the same
//! error-returning core:
//!
//! | policy           | suffix       | on failure                              |
//! |------------------|--------------|-----------------------------------------|
//! | return error     | `get*`       | `Err(PropError)`                        |
//! | abort            | `require*`   | panics with a [`Fault`](crate::Fault)   |
//! | default          | `*_or`       | returns the given default               |
//! | computed default | `*_or_else`  | calls the closure, once, only on failure |
//!
//! - [`scalar`]: one key, one value
//! - [`array`]: one key, element-wise coercion, all or nothing
//! - [`object`]: exact-shape objects, maps, and constructor delegation

pub mod array;
pub mod object;
pub mod scalar;

use crate::error::PropResult;

/// Swallow an error in favour of a default, leaving a trace behind.
#[inline]
pub(crate) fn fallback<T>(key: &str, result: PropResult<T>, default: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::trace!(key, code = err.code(), error = %err, "property fell back to default");
            default()
        }
    }
}
