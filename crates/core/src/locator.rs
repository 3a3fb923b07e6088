//! Bundle metadata discovery.
//!
//! Metadata normally lives at `metadata/annotations.yaml` under the bundle
//! root. When that file is missing or carries no annotations, the whole tree
//! is searched and the first file that parses to a non-empty label set wins.
//!
//! A broken file at the conventional location is a hard error: somebody
//! wrote it on purpose. A broken file found while searching is only a
//! candidate and is skipped.

use crate::walk::{is_hidden, walk, Visit};
use opcheck_bundle_schema::constants::{ANNOTATIONS_FILE, METADATA_DIR};
use opcheck_bundle_schema::{parse_annotations, Labels};
use opcheck_common::{Error, Filesystem, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Labels found for a bundle and the file they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLocation {
    pub labels: Labels,
    pub path: PathBuf,
}

/// Find and parse the metadata of the bundle rooted at `bundle_root`.
pub fn find_bundle_metadata<F>(fs: &F, bundle_root: &Path) -> Result<MetadataLocation>
where
    F: Filesystem + ?Sized,
{
    let annotations_path = bundle_root.join(METADATA_DIR).join(ANNOTATIONS_FILE);
    match read_annotations(fs, &annotations_path) {
        Ok(labels) if !labels.is_empty() => {
            info!("Found bundle metadata at {}", annotations_path.display());
            return Ok(MetadataLocation {
                labels,
                path: annotations_path,
            });
        }
        Ok(_) => debug!(
            "No annotations in {}, searching {}",
            annotations_path.display(),
            bundle_root.display()
        ),
        Err(err) if err.is_not_found() => debug!(
            "{} does not exist, searching {}",
            annotations_path.display(),
            bundle_root.display()
        ),
        Err(err) => return Err(err),
    }

    let mut found: Option<MetadataLocation> = None;
    walk(fs, bundle_root, |path, kind| {
        if kind.is_dir() || is_hidden(path) {
            return Ok(Visit::Continue);
        }
        match read_annotations(fs, path) {
            Ok(labels) if !labels.is_empty() => {
                found = Some(MetadataLocation {
                    labels,
                    path: path.to_path_buf(),
                });
                Ok(Visit::Stop)
            }
            Ok(_) => Ok(Visit::Continue),
            Err(err) => {
                debug!("Skipping metadata candidate: {}", err);
                Ok(Visit::Continue)
            }
        }
    })?;

    match found {
        Some(location) => {
            info!("Found bundle metadata at {}", location.path.display());
            Ok(location)
        }
        None => Err(Error::NotFound {
            root: bundle_root.to_path_buf(),
        }),
    }
}

/// Read the annotations document at `path`.
fn read_annotations<F>(fs: &F, path: &Path) -> Result<Labels>
where
    F: Filesystem + ?Sized,
{
    let content = fs.read(path).map_err(|e| Error::filesystem(path, e))?;
    parse_annotations(&content).map_err(|source| Error::MalformedMetadata {
        path: path.to_path_buf(),
        source,
    })
}
