// Pixelbin URL library: codec, signer and configuration

pub mod config;
pub mod error;
pub mod logging;
pub mod security;
pub mod url;

pub use error::{PixelbinError, Result};
pub use security::{sign_url, verify_signed_url};
pub use crate::url::{obj_to_url, url_to_obj, UrlDescriptor};
