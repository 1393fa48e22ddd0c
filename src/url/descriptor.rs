//! Structured form of a Pixelbin URL
//!
//! A [`UrlDescriptor`] is what [`url_to_obj`](super::url_to_obj) produces and what
//! [`obj_to_url`](super::obj_to_url) consumes. Field names serialize in camelCase
//! (`cloudName`, `filePath`, ...) so JSON descriptors match the wire vocabulary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use super::query;
use crate::error::PixelbinError;

/// Plugin id that marks a preset reference (`p:name`)
pub const PRESET_PLUGIN: &str = "p";

/// Pattern segment used when a URL carries no transformations
pub const ORIGINAL_PATTERN: &str = "original";

/// Path marker that introduces a worker path
pub const WORKER_MARKER: &str = "wrkr";

/// One `key:value` parameter of a transformation operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationParam {
    pub key: String,
    pub value: String,
}

impl TransformationParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One step of a transformation chain: `plugin.name(k:v,...)` or `p:name(...)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationOp {
    pub plugin: String,
    pub name: String,
    pub values: Vec<TransformationParam>,
}

impl TransformationOp {
    pub fn new(plugin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Reference to a server-stored preset
    pub fn preset(name: impl Into<String>) -> Self {
        Self::new(PRESET_PLUGIN, name)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push(TransformationParam::new(key, value));
        self
    }

    pub fn is_preset(&self) -> bool {
        self.plugin == PRESET_PLUGIN
    }
}

/// Device pixel ratio query option
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dpr {
    /// `dpr=auto`
    Auto,
    /// Numeric ratio, valid between 0.1 and 5.0
    Ratio(f64),
}

impl FromStr for Dpr {
    type Err = PixelbinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        query::parse_dpr(s)
    }
}

impl Serialize for Dpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dpr::Auto => serializer.serialize_str(query::DPR_AUTO),
            Dpr::Ratio(ratio) => serializer.serialize_f64(*ratio),
        }
    }
}

impl<'de> Deserialize<'de> for Dpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        // Numbers are kept as-is so out-of-range ratios still reach the
        // query codec and fail there with the usual message.
        match Raw::deserialize(deserializer)? {
            Raw::Number(ratio) => Ok(Dpr::Ratio(ratio)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// The recognized query options of a Pixelbin URL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpr: Option<Dpr>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_f_auto"
    )]
    pub f_auto: Option<bool>,
}

impl UrlOptions {
    pub fn is_empty(&self) -> bool {
        self.dpr.is_none() && self.f_auto.is_none()
    }
}

/// Accepts `true`/`false` or their string forms, case-insensitively
fn deserialize_f_auto<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Flag(flag)) => Ok(Some(flag)),
        Some(Raw::Text(text)) => query::parse_f_auto(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Structured representation of a Pixelbin CDN URL
///
/// Invariants kept by the codec:
/// - `worker == true` ⇒ `pattern` and `file_path` are empty, `worker_path` is set
/// - `worker == false` ⇒ `worker_path` is empty, `file_path` is set
/// - `transformations` is empty ⇔ `pattern` is `"original"` (or empty in worker mode)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlDescriptor {
    pub protocol: String,
    pub host: String,
    pub base_url: String,
    pub version: String,
    pub cloud_name: String,
    pub zone: String,
    pub is_custom_domain: bool,
    pub worker: bool,
    pub worker_path: String,
    pub pattern: String,
    pub file_path: String,
    pub options: UrlOptions,
    pub transformations: Vec<TransformationOp>,
}
