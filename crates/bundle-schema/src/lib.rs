//! Bundle schema definitions for opcheck.
//!
//! This crate defines the on-disk conventions of an operator bundle, the
//! annotations label set, the in-memory bundle and the shape of validation
//! results.

pub mod constants;
pub mod labels;
pub mod manifest;
pub mod result;

pub use labels::{parse_annotations, AnnotationMetadata, Labels};
pub use manifest::{Bundle, MediaType, Object, Validatable};
pub use result::{ErrorType, Finding, Level, ManifestResult};
