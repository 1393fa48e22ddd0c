//! URL ⇄ descriptor conversion

use std::str::FromStr;

use url::Url;

use super::classify::{is_zone, path_segments, split_path, Route};
use super::descriptor::{UrlDescriptor, ORIGINAL_PATTERN, WORKER_MARKER};
use super::query::{parse_options, serialize_options};
use super::transformation::{parse_pattern, serialize_pattern};
use crate::config::UrlConfig;
use crate::error::{PixelbinError, Result};

const DEFAULT_PARSED_VERSION: &str = "v1";
const DEFAULT_BUILT_VERSION: &str = "v2";

/// Decompose a Pixelbin URL into a descriptor
///
/// `config.is_custom_domain` selects the grammar and is copied into the
/// returned descriptor.
pub fn url_to_obj(url: &str, config: &UrlConfig) -> Result<UrlDescriptor> {
    let parsed = Url::parse(url).map_err(|_| PixelbinError::invalid_url())?;

    let protocol = parsed.scheme().to_string();
    let host = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => return Err(PixelbinError::invalid_url()),
    };

    let segments = path_segments(parsed.path())?;
    let parts = split_path(&segments, config)?;

    let mut descriptor = UrlDescriptor {
        base_url: format!("{}://{}", protocol, host),
        protocol,
        host,
        version: parts.version.unwrap_or(DEFAULT_PARSED_VERSION).to_string(),
        cloud_name: parts.cloud_name.unwrap_or_default().to_string(),
        zone: parts.zone.unwrap_or_default().to_string(),
        is_custom_domain: config.is_custom_domain,
        ..Default::default()
    };

    match parts.route {
        Route::Worker { path } => {
            descriptor.worker = true;
            descriptor.worker_path = path;
        }
        Route::Transform { pattern, file_path } => {
            descriptor.transformations =
                parse_pattern(pattern, config).map_err(|_| PixelbinError::url_processing())?;
            descriptor.pattern = pattern.to_string();
            descriptor.file_path = file_path;
        }
    }

    descriptor.options = parse_options(parsed.query_pairs())?;

    Ok(descriptor)
}

/// Build a Pixelbin URL from a descriptor
///
/// The descriptor's own `is_custom_domain` decides the output shape. An
/// unsupported version is replaced by `v2` and a malformed zone is dropped;
/// `obj` itself is left untouched.
pub fn obj_to_url(obj: &UrlDescriptor, config: &UrlConfig) -> Result<String> {
    validate(obj)?;

    let pattern = if obj.worker {
        WORKER_MARKER.to_string()
    } else {
        serialize_pattern(&obj.transformations, config)?
            .unwrap_or_else(|| ORIGINAL_PATTERN.to_string())
    };

    let version = if config.is_supported_version(obj.version.trim()) {
        obj.version.trim()
    } else {
        DEFAULT_BUILT_VERSION
    };

    let zone = if is_zone(&obj.zone, config) {
        obj.zone.as_str()
    } else {
        ""
    };

    let base_url = base_url(obj, config);
    let tail = if obj.worker {
        &obj.worker_path
    } else {
        &obj.file_path
    };

    let mut url = [
        base_url.as_str(),
        version,
        obj.cloud_name.as_str(),
        zone,
        pattern.as_str(),
        tail.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join("/");

    if let Some(query) = serialize_options(&obj.options)? {
        url.push('?');
        url.push_str(&query);
    }

    Ok(url)
}

fn validate(obj: &UrlDescriptor) -> Result<()> {
    let blank = |value: &str| value.trim().is_empty();

    if !obj.is_custom_domain && blank(&obj.cloud_name) {
        return Err(PixelbinError::illegal_argument(
            "key cloudName should be defined",
        ));
    }
    if obj.is_custom_domain && !blank(&obj.cloud_name) {
        return Err(PixelbinError::illegal_argument(
            "key cloudName is not valid for custom domains",
        ));
    }
    if !obj.worker && blank(&obj.file_path) {
        return Err(PixelbinError::illegal_argument(
            "key filePath should be defined",
        ));
    }
    if obj.worker && blank(&obj.worker_path) {
        return Err(PixelbinError::illegal_argument(
            "key workerPath should be defined",
        ));
    }
    Ok(())
}

/// `base_url`, else `protocol://host`, else the configured default
fn base_url(obj: &UrlDescriptor, config: &UrlConfig) -> String {
    if !obj.base_url.trim().is_empty() {
        return obj.base_url.trim_end_matches('/').to_string();
    }
    if !obj.protocol.is_empty() && !obj.host.is_empty() {
        return format!("{}://{}", obj.protocol.trim_end_matches(':'), obj.host);
    }
    config.default_base_url.clone()
}

impl FromStr for UrlDescriptor {
    type Err = PixelbinError;

    /// Parses a tenant-domain URL with the default grammar
    fn from_str(s: &str) -> Result<Self> {
        url_to_obj(s, &UrlConfig::default())
    }
}
