//! Pattern-validated strings.

use std::borrow::Cow;

use regex::Regex;

use super::Coerce;
use crate::error::{CoerceError, PropError, PropResult};
use crate::value::Value;

/// Apply the string rule to `value`, then require it to match `pattern`.
///
/// `pattern` is compiled lazily by `compile`, after the string rule has
/// passed, so a missing or mistyped value is reported as such even when the
/// pattern itself is broken.
pub(crate) fn match_pattern<'r>(
    key: &str,
    value: &Value,
    source: &str,
    compile: impl FnOnce() -> Result<Cow<'r, Regex>, regex::Error>,
) -> PropResult<String> {
    let text = String::coerce(value)
        .map_err(|err| PropError::invalid_type(key, String::expected(), value, Some(err)))?;

    let regex = compile().map_err(|err| {
        PropError::invalid_type(
            key,
            format!("string matching '{source}'"),
            value,
            Some(CoerceError::Pattern(err)),
        )
    })?;

    if regex.is_match(&text) {
        Ok(text)
    } else {
        Err(PropError::regex_mismatch(key, text, source))
    }
}
