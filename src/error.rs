// Error types module

use thiserror::Error;

/// Message for URLs whose path matches none of the known shapes
pub const INVALID_URL_MESSAGE: &str = "Invalid pixelbin url. Please make sure the url is correct.";

/// Message for URLs with a valid shape but an unparseable transformation pattern
pub const URL_PROCESSING_MESSAGE: &str = "Error Processing url. Please check the url is correct";

/// Coarse category of a [`PixelbinError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    IllegalArgument,
    IllegalQueryParameter,
    Config,
}

/// Centralized error type for the codec, the signer and configuration loading
///
/// `Display` renders the bare message so callers can match messages exactly.
/// All errors are deterministic: retrying the same call yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelbinError {
    /// The URL does not match any recognized grammar, or its pattern is malformed
    #[error("{0}")]
    InvalidUrl(String),

    /// A descriptor (or signer input) violates a structural requirement
    #[error("{0}")]
    IllegalArgument(String),

    /// `dpr` or `f_auto` carries an invalid value
    #[error("{0}")]
    IllegalQueryParameter(String),

    /// Configuration could not be read, substituted or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PixelbinError {
    pub fn invalid_url() -> Self {
        PixelbinError::InvalidUrl(INVALID_URL_MESSAGE.to_string())
    }

    pub fn url_processing() -> Self {
        PixelbinError::InvalidUrl(URL_PROCESSING_MESSAGE.to_string())
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        PixelbinError::IllegalArgument(message.into())
    }

    pub fn illegal_query_parameter(message: impl Into<String>) -> Self {
        PixelbinError::IllegalQueryParameter(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        PixelbinError::Config(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PixelbinError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            PixelbinError::IllegalArgument(_) => ErrorKind::IllegalArgument,
            PixelbinError::IllegalQueryParameter(_) => ErrorKind::IllegalQueryParameter,
            PixelbinError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T, E = PixelbinError> = std::result::Result<T, E>;
