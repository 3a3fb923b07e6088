//! opcheck core - locate, load and validate operator bundles.

pub mod loader;
pub mod locator;
pub mod orchestrator;
pub mod reader;
pub mod walk;

pub use loader::{load_bundle_from_dir, LoadedBundle, ManifestReader};
pub use locator::{find_bundle_metadata, MetadataLocation};
pub use orchestrator::{check_bundle, render_results, validate_bundle, Validator};
pub use reader::DirManifestReader;
