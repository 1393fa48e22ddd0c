//! Path classification and segment extraction
//!
//! A Pixelbin path is matched against a fixed list of shapes, first match wins:
//!
//! | shape            | segments after version / cloud name        |
//! |------------------|--------------------------------------------|
//! | zoned worker     | `zone` `wrkr` `worker path...`             |
//! | worker           | `wrkr` `worker path...`                    |
//! | zoned transform  | `zone` `pattern` `file path...`            |
//! | transform        | `pattern` `file path...`                   |
//!
//! The zone test only looks at the segment itself (length and charset), so a
//! six character pattern followed by a multi-segment file path is read as a
//! zone. Callers relying on such patterns get the zoned reading.

use super::descriptor::WORKER_MARKER;
use crate::config::UrlConfig;
use crate::error::{PixelbinError, Result};

const MIN_CLOUD_NAME_LENGTH: usize = 3;

/// Path shapes in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlShape {
    ZonedWorker,
    Worker,
    ZonedTransform,
    Transform,
}

impl UrlShape {
    pub const PRECEDENCE: [UrlShape; 4] = [
        UrlShape::ZonedWorker,
        UrlShape::Worker,
        UrlShape::ZonedTransform,
        UrlShape::Transform,
    ];

    pub fn matches(self, segments: &[&str], config: &UrlConfig) -> bool {
        match self {
            UrlShape::ZonedWorker => matches!(
                segments,
                [zone, marker, _, ..] if is_zone(zone, config) && *marker == WORKER_MARKER
            ),
            UrlShape::Worker => matches!(segments, [marker, _, ..] if *marker == WORKER_MARKER),
            UrlShape::ZonedTransform => {
                matches!(segments, [zone, _, _, ..] if is_zone(zone, config))
            }
            UrlShape::Transform => segments.len() >= 2,
        }
    }

    pub fn is_worker(self) -> bool {
        matches!(self, UrlShape::ZonedWorker | UrlShape::Worker)
    }

    pub fn is_zoned(self) -> bool {
        matches!(self, UrlShape::ZonedWorker | UrlShape::ZonedTransform)
    }

    /// First shape matching `segments`
    pub fn classify(segments: &[&str], config: &UrlConfig) -> Option<UrlShape> {
        Self::PRECEDENCE
            .into_iter()
            .find(|shape| shape.matches(segments, config))
    }
}

/// What follows the optional zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Worker { path: String },
    Transform { pattern: &'a str, file_path: String },
}

/// Fields cut out of a classified path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub shape: UrlShape,
    pub version: Option<&'a str>,
    pub cloud_name: Option<&'a str>,
    pub zone: Option<&'a str>,
    pub route: Route<'a>,
}

/// Zone slugs are exactly `zone_length` characters from `[A-Za-z0-9_-]`
pub fn is_zone(segment: &str, config: &UrlConfig) -> bool {
    segment.len() == config.zone_length && segment.bytes().all(is_slug_byte)
}

pub fn is_plausible_cloud_name(segment: &str) -> bool {
    segment.len() >= MIN_CLOUD_NAME_LENGTH && segment.bytes().all(is_slug_byte)
}

fn is_slug_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Split an absolute path into segments
///
/// One leading and one trailing slash are ignored. Any other empty segment
/// (a double slash) makes the path invalid.
pub fn path_segments(path: &str) -> Result<Vec<&str>> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(PixelbinError::invalid_url());
    }

    Ok(segments)
}

/// Classify `segments` and cut them into their parts
pub fn split_path<'a>(segments: &[&'a str], config: &UrlConfig) -> Result<UrlParts<'a>> {
    let mut rest = segments;

    let version = match rest {
        [first, tail @ ..] if config.is_supported_version(first) => {
            rest = tail;
            Some(*first)
        }
        _ if config.is_custom_domain => return Err(PixelbinError::invalid_url()),
        _ => None,
    };

    let cloud_name = if config.is_custom_domain {
        None
    } else {
        match rest {
            [first, tail @ ..] if is_plausible_cloud_name(first) => {
                rest = tail;
                Some(*first)
            }
            _ => return Err(PixelbinError::invalid_url()),
        }
    };

    let shape = UrlShape::classify(rest, config).ok_or_else(PixelbinError::invalid_url)?;
    tracing::debug!(?shape, custom_domain = config.is_custom_domain, "classified url path");

    let (zone, route) = extract(shape, rest).ok_or_else(PixelbinError::invalid_url)?;

    Ok(UrlParts {
        shape,
        version,
        cloud_name,
        zone,
        route,
    })
}

/// Slice a segment list that is known to match `shape`
fn extract<'a>(shape: UrlShape, segments: &[&'a str]) -> Option<(Option<&'a str>, Route<'a>)> {
    let (zone, rest) = match (shape.is_zoned(), segments) {
        (true, [zone, rest @ ..]) => (Some(*zone), rest),
        _ => (None, segments),
    };

    let route = match rest {
        [_marker, path @ ..] if shape.is_worker() => Route::Worker {
            path: path.join("/"),
        },
        [pattern, file_path @ ..] => Route::Transform {
            pattern: *pattern,
            file_path: file_path.join("/"),
        },
        [] => return None,
    };

    Some((zone, route))
}
