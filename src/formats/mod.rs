//! Annotation export/import formats.
//!
//! Two formats are supported:
//!
//! - **Generic**: the tool's native per-image JSON (polygon list plus
//!   parallel label/score arrays). The only format that can be imported.
//! - **COCO**: Microsoft COCO dataset JSON (export only).
//!
//! Conversion works on strings so a browser shell can wire it to
//! downloads and file pickers; each exporter also has a `save` helper
//! for shells with filesystem access.

pub mod coco;
mod common;
mod error;
pub mod generic;

pub use common::ImageInfo;
pub use error::FormatError;
