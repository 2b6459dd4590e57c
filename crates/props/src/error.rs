//! Property access errors.
//!
//! Accessors produce exactly three kinds of failure:
//!
//! - [`PropError::MissingField`]: the bag is absent or has no such key
//! - [`PropError::InvalidType`]: the key is present but its value does not
//!   satisfy the requested kind; carries the value and, when one exists, the
//!   underlying [`CoerceError`]
//! - [`PropError::RegexMismatch`]: a valid string that fails a pattern
//!
//! [`CoerceError`] is never returned on its own from an accessor; it is the
//! `source()` of an `InvalidType`.

use std::borrow::Cow;
use std::num::ParseFloatError;

use thiserror::Error;

use crate::value::{Value, ValueKind};

// ============================================================================
// ACCESS ERRORS
// ============================================================================

/// Failure to read a typed property
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum PropError {
    /// The key was absent (a missing bag counts as every key absent)
    #[error("property '{key}' is missing")]
    MissingField { key: String },

    /// The key was present but the value could not be coerced
    #[error(
        "property '{key}' is not of type {expected}, got {}{}",
        .actual.kind(),
        detail(.index, .cause)
    )]
    InvalidType {
        key: String,
        expected: Cow<'static, str>,
        actual: Value,
        /// Offending element position for array accessors
        index: Option<usize>,
        #[source]
        cause: Option<CoerceError>,
    },

    /// A string value did not match the required pattern
    #[error("property '{key}' value {value:?} does not match pattern '{pattern}'")]
    RegexMismatch {
        key: String,
        value: String,
        pattern: String,
    },
}

fn detail(index: &Option<usize>, cause: &Option<CoerceError>) -> String {
    let mut out = String::new();
    if let Some(index) = index {
        out.push_str(&format!(" at index {index}"));
    }
    if let Some(cause) = cause {
        out.push_str(&format!(": {cause}"));
    }
    out
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl PropError {
    /// Create a missing field error
    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Create an invalid type error for the value under `key`.
    ///
    /// A bare [`CoerceError::Unsupported`] carries nothing the message does
    /// not already say, so it is dropped instead of being kept as the cause.
    pub fn invalid_type(
        key: impl Into<String>,
        expected: impl Into<Cow<'static, str>>,
        actual: &Value,
        cause: Option<CoerceError>,
    ) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected: expected.into(),
            actual: actual.clone(),
            index: None,
            cause: cause.filter(|c| !c.is_unsupported()),
        }
    }

    /// Create an invalid type error for one element of an array
    pub fn invalid_element(
        key: impl Into<String>,
        expected: impl Into<Cow<'static, str>>,
        index: usize,
        element: &Value,
        cause: Option<CoerceError>,
    ) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected: expected.into(),
            actual: element.clone(),
            index: Some(index),
            cause: cause.filter(|c| !c.is_unsupported()),
        }
    }

    /// Create a regex mismatch error
    pub fn regex_mismatch(
        key: impl Into<String>,
        value: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::RegexMismatch {
            key: key.into(),
            value: value.into(),
            pattern: pattern.into(),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl PropError {
    /// Key the error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::MissingField { key }
            | Self::InvalidType { key, .. }
            | Self::RegexMismatch { key, .. } => key,
        }
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "PROP_MISSING_FIELD",
            Self::InvalidType { .. } => "PROP_INVALID_TYPE",
            Self::RegexMismatch { .. } => "PROP_REGEX_MISMATCH",
        }
    }

    /// Check if the key was absent
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Check if the value had the wrong shape
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }

    /// Check if the value had the right shape but the wrong content
    pub fn is_regex_mismatch(&self) -> bool {
        matches!(self, Self::RegexMismatch { .. })
    }

    /// Underlying coercion failure, if any
    pub fn cause(&self) -> Option<&CoerceError> {
        match self {
            Self::InvalidType { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }
}

// ============================================================================
// COERCION ERRORS
// ============================================================================

/// Why a single value could not be converted to a target kind
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum CoerceError {
    /// The source kind has no conversion to the target
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: ValueKind, to: &'static str },

    /// Numeric string did not parse
    #[error("invalid number: {0}")]
    Number(#[from] ParseFloatError),

    /// String is not a plain decimal integer (optional sign, ASCII digits)
    #[error("invalid decimal integer {0:?}")]
    BigInt(String),

    /// NaN or infinity where an integral value is required
    #[error("non-finite number {0} has no integer part")]
    NonFinite(f64),

    /// String was not RFC 3339
    #[error("invalid RFC 3339 timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Millisecond offset outside the range of a timestamp
    #[error("millisecond offset {0} is out of range")]
    TimestampRange(i128),

    /// The caller-supplied pattern does not compile
    #[error("invalid regex: {0}")]
    Pattern(#[from] regex::Error),
}

impl CoerceError {
    /// Create an unsupported conversion error
    pub fn unsupported(from: ValueKind, to: &'static str) -> Self {
        Self::Unsupported { from, to }
    }

    /// Check if this is a plain kind mismatch
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for property access
pub type PropResult<T> = Result<T, PropError>;

// ============================================================================
// TESTS
// ============================================================================
