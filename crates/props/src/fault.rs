//! Abort-on-failure policy.
//!
//! The `require*` accessors turn a [`PropError`] into a panic whose payload
//! is a [`Fault`]. The fault keeps the original error as its source, so a
//! caller that chooses to catch it (see [`catch_fault`]) loses nothing.
//!
//! ```rust
//! use nebula_props::{bag, catch_fault, PropsExt};
//!
//! let bag = bag! { "port" => "not a port" };
//! let fault = catch_fault(|| bag.props().require::<u16>("port")).unwrap_err();
//! assert!(fault.cause().is_invalid_type());
//! ```

use std::any::Any;
use std::panic::{self, UnwindSafe};

use thiserror::Error;

use crate::error::PropError;

/// Irrecoverable accessor failure carried by a panic
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct Fault {
    message: String,
    #[source]
    cause: PropError,
}

impl Fault {
    /// Wrap `cause`, using `message` instead of the error text when given
    pub fn new(cause: PropError, message: Option<&str>) -> Self {
        let message = message.map_or_else(|| cause.to_string(), str::to_owned);
        Self { message, cause }
    }

    /// Message the fault was raised with
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The accessor error that caused the fault
    pub fn cause(&self) -> &PropError {
        &self.cause
    }

    /// Take the accessor error out
    pub fn into_cause(self) -> PropError {
        self.cause
    }

    /// Recover a fault from a panic payload, handing back anything else
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        payload.downcast::<Self>().map(|fault| *fault)
    }
}

/// Raise `err` as a fault. Never returns.
#[cold]
#[track_caller]
pub(crate) fn abort(err: PropError, message: Option<&str>) -> ! {
    tracing::debug!(key = err.key(), code = err.code(), error = %err, "aborting property access");
    panic::panic_any(Fault::new(err, message))
}

/// Run `f`, turning a [`Fault`] panic into `Err`.
///
/// Panics that do not carry a `Fault` are resumed untouched.
pub fn catch_fault<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> T + UnwindSafe,
{
    panic::catch_unwind(f).map_err(|payload| match Fault::from_panic(payload) {
        Ok(fault) => fault,
        Err(other) => panic::resume_unwind(other),
    })
}
