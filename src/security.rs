//! URL signing
//!
//! A signed Pixelbin URL carries three extra query parameters:
//! - `pbs`: hex HMAC-SHA256 over the path and query (leading `/` removed)
//!   followed by the expiry timestamp, keyed by the secret token
//! - `pbe`: unix timestamp after which the URL stops being valid
//! - `pbt`: the access key identifying the token

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

use crate::error::{PixelbinError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_PARAM: &str = "pbs";
pub const EXPIRY_PARAM: &str = "pbe";
pub const ACCESS_KEY_PARAM: &str = "pbt";

const MISSING_ARGUMENTS: &str = "Valid url, accessKey & token are required for generating signed URL";

/// Sign `url` so that it stays valid for `expiry_seconds` from now
pub fn sign_url(url: &str, expiry_seconds: i64, access_key: &str, token: &str) -> Result<String> {
    sign_url_at(url, expiry_seconds, access_key, token, Utc::now().timestamp())
}

/// Sign `url` relative to the unix timestamp `now`
pub fn sign_url_at(
    url: &str,
    expiry_seconds: i64,
    access_key: &str,
    token: &str,
    now: i64,
) -> Result<String> {
    if url.trim().is_empty() || access_key.trim().is_empty() || token.trim().is_empty() {
        return Err(PixelbinError::illegal_argument(MISSING_ARGUMENTS));
    }

    let mut parsed = parse(url)?;
    if parsed.query_pairs().any(|(key, _)| key == SIGNATURE_PARAM) {
        return Err(PixelbinError::illegal_argument("URL already has a signature"));
    }

    let expiry = now
        .checked_add(expiry_seconds)
        .ok_or_else(|| PixelbinError::illegal_argument("Expiry is out of range"))?;
    let signature = generate_signature(&path_and_query(parsed.path(), parsed.query()), expiry, token)?;

    parsed
        .query_pairs_mut()
        .append_pair(SIGNATURE_PARAM, &signature)
        .append_pair(EXPIRY_PARAM, &expiry.to_string())
        .append_pair(ACCESS_KEY_PARAM, access_key);

    tracing::debug!(expiry, access_key, "signed url");

    Ok(parsed.into())
}

/// Hex HMAC-SHA256 of `url_path` (without its leading `/`) followed by `expiry`
pub fn generate_signature(url_path: &str, expiry: i64, token: &str) -> Result<String> {
    let message = url_path.strip_prefix('/').unwrap_or(url_path);

    let mut mac = HmacSha256::new_from_slice(token.as_bytes())
        .map_err(|e| PixelbinError::illegal_argument(e.to_string()))?;
    mac.update(message.as_bytes());
    mac.update(expiry.to_string().as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a signed URL against `token` at the unix timestamp `now`
///
/// Returns `Ok(false)` for a wrong signature or an expired URL, and an error
/// when the URL does not carry `pbs`/`pbe` at all.
pub fn verify_signed_url(signed_url: &str, token: &str, now: i64) -> Result<bool> {
    let parsed = parse(signed_url)?;

    let mut signature = None;
    let mut expiry = None;
    let mut kept = Vec::new();

    // Raw pairs, empty ones included, so the remaining query is byte-identical
    // to what was signed
    for pair in parsed.query().unwrap_or_default().split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            SIGNATURE_PARAM => signature = Some(value),
            EXPIRY_PARAM => expiry = Some(value),
            ACCESS_KEY_PARAM => {}
            _ => kept.push(pair),
        }
    }

    let (signature, expiry) = match (signature, expiry) {
        (Some(signature), Some(expiry)) => (signature, expiry),
        _ => return Err(PixelbinError::illegal_argument("URL is not signed")),
    };
    let expiry: i64 = expiry
        .parse()
        .map_err(|_| PixelbinError::illegal_argument("URL has an invalid expiry"))?;

    if now > expiry {
        tracing::debug!(expiry, now, "signed url expired");
        return Ok(false);
    }

    let query = kept.join("&");
    let query = if query.is_empty() { None } else { Some(query.as_str()) };
    let expected = generate_signature(&path_and_query(parsed.path(), query), expiry, token)?;

    Ok(constant_time_compare(&expected, signature))
}

fn parse(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| PixelbinError::illegal_argument(format!("Invalid url: {}", e)))
}

fn path_and_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
