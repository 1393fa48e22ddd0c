//! Pixelbin URL codec
//!
//! ```text
//! {base}/{version}/{cloudName}[/{zone}]/{pattern|wrkr}/{filePath|workerPath}[?dpr=..&f_auto=..]
//! {base}/{version}[/{zone}]/{pattern|wrkr}/{filePath|workerPath}[?dpr=..&f_auto=..]   custom domain
//! ```
//!
//! [`url_to_obj`] and [`obj_to_url`] convert between this textual form and a
//! [`UrlDescriptor`].

pub mod classify;
pub mod codec;
pub mod descriptor;
pub mod params;
pub mod query;
pub mod transformation;

pub use classify::UrlShape;
pub use codec::{obj_to_url, url_to_obj};
pub use descriptor::{Dpr, TransformationOp, TransformationParam, UrlDescriptor, UrlOptions};
