//! Query option codec
//!
//! Only two query keys carry meaning for the codec:
//! - `dpr`: `auto` or a ratio between 0.1 and 5.0
//! - `f_auto`: a boolean
//!
//! Any other key is ignored on parse and never emitted on build.

use super::descriptor::{Dpr, UrlOptions};
use crate::error::{PixelbinError, Result};

pub const DPR_AUTO: &str = "auto";

const DPR_MIN: f64 = 0.1;
const DPR_MAX: f64 = 5.0;

const DPR_ERROR: &str = "DPR value should be numeric and should be between 0.1 to 5.0";
const F_AUTO_ERROR: &str = "F_auto value should be boolean";

pub fn parse_dpr(value: &str) -> Result<Dpr> {
    if value == DPR_AUTO {
        return Ok(Dpr::Auto);
    }

    let ratio: f64 = value
        .trim()
        .parse()
        .map_err(|_| PixelbinError::illegal_query_parameter(DPR_ERROR))?;
    validate_ratio(ratio)?;
    Ok(Dpr::Ratio(ratio))
}

fn validate_ratio(ratio: f64) -> Result<()> {
    // NaN fails the range check as well
    if !(DPR_MIN..=DPR_MAX).contains(&ratio) {
        return Err(PixelbinError::illegal_query_parameter(DPR_ERROR));
    }
    Ok(())
}

pub fn parse_f_auto(value: &str) -> Result<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(PixelbinError::illegal_query_parameter(F_AUTO_ERROR))
    }
}

/// Extract options from decoded query pairs, in the order they appear
///
/// A repeated key keeps its last value.
pub fn parse_options<K, V, I>(pairs: I) -> Result<UrlOptions>
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut options = UrlOptions::default();

    for (key, value) in pairs {
        match key.as_ref() {
            "dpr" => options.dpr = Some(parse_dpr(value.as_ref())?),
            "f_auto" => options.f_auto = Some(parse_f_auto(value.as_ref())?),
            _ => {}
        }
    }

    Ok(options)
}

/// Render a ratio with one decimal place, halves rounded away from zero
pub fn format_dpr(dpr: Dpr) -> Result<String> {
    match dpr {
        Dpr::Auto => Ok(DPR_AUTO.to_string()),
        Dpr::Ratio(ratio) => {
            validate_ratio(ratio)?;
            Ok(format!("{:.1}", (ratio * 10.0).round() / 10.0))
        }
    }
}

/// Render options as a query string without the leading `?`
///
/// Returns `None` when no option is set. `dpr` always precedes `f_auto`.
pub fn serialize_options(options: &UrlOptions) -> Result<Option<String>> {
    let mut parts = Vec::new();

    if let Some(dpr) = options.dpr {
        parts.push(format!("dpr={}", format_dpr(dpr)?));
    }

    if let Some(f_auto) = options.f_auto {
        parts.push(format!("f_auto={}", f_auto));
    }

    if parts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parts.join("&")))
    }
}
