//! Parameter list codec
//!
//! Handles the text between the parentheses of one operation, e.g.
//! `h:200,w:100,fill:999`.

use super::descriptor::TransformationParam;
use crate::error::{PixelbinError, Result};

const KEY_VALUE_SEPARATOR: char = ':';

/// Parse a parameter list into ordered pairs
///
/// Each token is split on its first `:`. Tokens without a `:` (or with an
/// empty key) are dropped. Order and duplicates are kept; an empty value is
/// kept as an empty string.
pub fn parse_params(text: &str, separator: &str) -> Vec<TransformationParam> {
    text.split(separator)
        .filter_map(|token| token.split_once(KEY_VALUE_SEPARATOR))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| TransformationParam::new(key, value))
        .collect()
}

/// Render pairs as `key:value` joined by `separator`
///
/// `operation` names the owning operation in error messages.
pub fn serialize_params(
    params: &[TransformationParam],
    operation: &str,
    separator: &str,
) -> Result<String> {
    let rendered = params
        .iter()
        .map(|param| {
            if param.key.trim().is_empty() {
                return Err(PixelbinError::illegal_argument(format!(
                    "key not specified in '{}'",
                    operation
                )));
            }
            if param.value.trim().is_empty() {
                return Err(PixelbinError::illegal_argument(format!(
                    "value not specified for key '{}' in '{}'",
                    param.key, operation
                )));
            }
            Ok(format!("{}{}{}", param.key, KEY_VALUE_SEPARATOR, param.value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(rendered.join(separator))
}
