//! Transformation chain codec
//!
//! A pattern is a chain of operations joined by the operation separator:
//!
//! ```text
//! t.resize(h:200,w:100)~erase.bg()~p:preset1(a:12)
//! ```
//!
//! Module operations are written `plugin.name(params)`; presets are written
//! `p:name` with optional parentheses.

use super::descriptor::{TransformationOp, ORIGINAL_PATTERN, PRESET_PLUGIN};
use super::params::{parse_params, serialize_params};
use crate::config::UrlConfig;
use crate::error::{PixelbinError, Result};

const PRESET_PREFIX: &str = "p:";

/// Parse a pattern segment into its operations
///
/// `"original"` yields no operations. Empty tokens between separators are
/// skipped.
pub fn parse_pattern(pattern: &str, config: &UrlConfig) -> Result<Vec<TransformationOp>> {
    if pattern == ORIGINAL_PATTERN {
        return Ok(Vec::new());
    }

    pattern
        .split(config.operation_separator.as_str())
        .filter(|token| !token.is_empty())
        .map(|token| parse_operation(token, config))
        .collect()
}

/// Parse a single operation token
///
/// The parameter text runs from the first `(` to the end of the token with
/// every `)` removed, so an unterminated `p:preset1(a:12` still yields `a=12`.
/// A module head is read as `plugin.name`; further dotted parts are ignored.
pub fn parse_operation(token: &str, config: &UrlConfig) -> Result<TransformationOp> {
    let (head, params) = match token.split_once('(') {
        Some((head, rest)) => (head, Some(rest.replace(')', ""))),
        None => (token, None),
    };

    let (plugin, name) = match head.strip_prefix(PRESET_PREFIX) {
        Some(name) => (PRESET_PLUGIN, name),
        None => {
            let mut parts = head.split('.');
            match (parts.next(), parts.next()) {
                (Some(plugin), Some(name)) => (plugin, name),
                _ => return Err(PixelbinError::url_processing()),
            }
        }
    };

    if plugin.is_empty() || name.is_empty() {
        return Err(PixelbinError::url_processing());
    }

    let values = match params {
        Some(text) => parse_params(&text, &config.parameter_separator),
        None if plugin == PRESET_PLUGIN => Vec::new(),
        // Module operations always carry parentheses
        None => return Err(PixelbinError::url_processing()),
    };

    Ok(TransformationOp {
        plugin: plugin.to_string(),
        name: name.to_string(),
        values,
    })
}

/// Render a single operation
pub fn serialize_operation(op: &TransformationOp, config: &UrlConfig) -> Result<String> {
    let params = serialize_params(&op.values, &op.name, &config.parameter_separator)?;

    if op.is_preset() {
        if params.is_empty() {
            Ok(format!("{}:{}", op.plugin, op.name))
        } else {
            Ok(format!("{}:{}({})", op.plugin, op.name, params))
        }
    } else {
        Ok(format!("{}.{}({})", op.plugin, op.name, params))
    }
}

/// Render operations as a pattern segment
///
/// Returns `None` when nothing is left to render; callers substitute
/// `"original"`. Operations without a name are skipped.
pub fn serialize_pattern(ops: &[TransformationOp], config: &UrlConfig) -> Result<Option<String>> {
    let rendered = ops
        .iter()
        .filter(|op| !op.name.is_empty())
        .map(|op| serialize_operation(op, config))
        .collect::<Result<Vec<_>>>()?;

    if rendered.is_empty() {
        Ok(None)
    } else {
        Ok(Some(rendered.join(&config.operation_separator)))
    }
}
