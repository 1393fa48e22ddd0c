// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PixelbinError, Result};

pub const DEFAULT_BASE_URL: &str = "https://cdn.pixelbin.io";

/// Signed URL lifetime used when neither the caller nor the config sets one
pub const DEFAULT_EXPIRY_SECONDS: i64 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub url: UrlConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing: Option<SigningConfig>,
}

/// Grammar settings threaded through every parse and build call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Separator between chained operations in a pattern (default: `~`)
    #[serde(default = "default_operation_separator")]
    pub operation_separator: String,

    /// Separator between `key:value` pairs of one operation (default: `,`)
    #[serde(default = "default_parameter_separator")]
    pub parameter_separator: String,

    /// Parse URLs as custom-domain URLs (no cloud name segment, version mandatory)
    #[serde(default)]
    pub is_custom_domain: bool,

    /// Exact length of a zone slug (default: 6)
    #[serde(default = "default_zone_length")]
    pub zone_length: usize,

    /// Accepted version segments (default: v1, v2)
    #[serde(default = "default_supported_versions")]
    pub supported_versions: Vec<String>,

    /// Base URL used when a descriptor carries none
    #[serde(default = "default_base_url")]
    pub default_base_url: String,
}

fn default_operation_separator() -> String {
    "~".to_string()
}

fn default_parameter_separator() -> String {
    ",".to_string()
}

fn default_zone_length() -> usize {
    6
}

fn default_supported_versions() -> Vec<String> {
    vec!["v1".to_string(), "v2".to_string()]
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            operation_separator: default_operation_separator(),
            parameter_separator: default_parameter_separator(),
            is_custom_domain: false,
            zone_length: default_zone_length(),
            supported_versions: default_supported_versions(),
            default_base_url: default_base_url(),
        }
    }
}

impl UrlConfig {
    /// Default grammar with custom-domain parsing switched on
    pub fn custom_domain() -> Self {
        Self {
            is_custom_domain: true,
            ..Default::default()
        }
    }

    pub fn is_supported_version(&self, segment: &str) -> bool {
        self.supported_versions.iter().any(|v| v == segment)
    }

    pub fn validate(&self) -> Result<()> {
        if self.operation_separator.is_empty() {
            return Err(PixelbinError::config("operation_separator cannot be empty"));
        }
        if self.parameter_separator.is_empty() {
            return Err(PixelbinError::config("parameter_separator cannot be empty"));
        }
        if self.operation_separator == self.parameter_separator {
            return Err(PixelbinError::config(format!(
                "operation_separator and parameter_separator must differ (both '{}')",
                self.operation_separator
            )));
        }
        if self.zone_length == 0 {
            return Err(PixelbinError::config("zone_length must be greater than 0"));
        }
        if self.supported_versions.is_empty() {
            return Err(PixelbinError::config("supported_versions cannot be empty"));
        }
        Ok(())
    }
}

/// Credentials and defaults for URL signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    pub access_key: String,
    pub token: String,
    /// Lifetime of a signed URL in seconds (default: 20)
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,
}

fn default_expiry_seconds() -> i64 {
    DEFAULT_EXPIRY_SECONDS
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| PixelbinError::config(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        if let Some(var_name) = missing {
            return Err(PixelbinError::config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )));
        }

        serde_yaml::from_str(&substituted).map_err(|e| PixelbinError::config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| PixelbinError::config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.url.validate()?;

        if let Some(signing) = &self.signing {
            if signing.access_key.trim().is_empty() {
                return Err(PixelbinError::config("signing.access_key cannot be empty"));
            }
            if signing.token.trim().is_empty() {
                return Err(PixelbinError::config("signing.token cannot be empty"));
            }
            if signing.expiry_seconds <= 0 {
                return Err(PixelbinError::config(
                    "signing.expiry_seconds must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}
