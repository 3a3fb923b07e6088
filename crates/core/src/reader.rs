//! Manifest reader over a [`Filesystem`].

use crate::loader::ManifestReader;
use crate::walk::{is_hidden, walk, Visit};
use opcheck_bundle_schema::constants::{CSV_KIND, HELM_CHART_FILE};
use opcheck_bundle_schema::{Bundle, MediaType, Object};
use opcheck_common::{EntryKind, Filesystem};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Reader error type.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("The directory {} contains no yaml files", .0.display())]
    NoFiles(PathBuf),

    #[error("unable to find a csv in bundle directory {}", .0.display())]
    NoCsv(PathBuf),

    #[error("Unable to read file {} in bundle: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads bundle manifests stored as YAML or JSON files.
#[derive(Debug, Clone, Default)]
pub struct DirManifestReader<F> {
    fs: F,
}

impl<F: Filesystem> DirManifestReader<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, ReadError> {
        self.fs.read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Non-directory entries directly inside `dir`, sorted.
    fn files_in(&self, dir: &Path) -> Result<Vec<PathBuf>, ReadError> {
        let io_err = |source: std::io::Error| ReadError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in self.fs.read_dir(dir).map_err(io_err)? {
            if self.fs.entry_kind(&entry).map_err(io_err)? != EntryKind::Dir {
                files.push(entry);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl<F: Filesystem> ManifestReader for DirManifestReader<F> {
    fn classify_media_type(&self, manifests_dir: &Path) -> anyhow::Result<MediaType> {
        let files = self.files_in(manifests_dir)?;
        if files.is_empty() {
            return Err(ReadError::NoFiles(manifests_dir.to_path_buf()).into());
        }

        if files
            .iter()
            .any(|f| f.file_name().is_some_and(|n| n == HELM_CHART_FILE))
        {
            return Ok(MediaType::Helm);
        }

        for file in &files {
            let content = self.read(file)?;
            // Files that are not manifests do not decide the media type.
            let Ok(objects) = decode_objects(&content) else {
                continue;
            };
            if objects.iter().any(|o| o.is_kind(CSV_KIND)) {
                return Ok(MediaType::RegistryV1);
            }
        }
        Ok(MediaType::Plain)
    }

    fn load_bundle(&self, manifests_dir: &Path) -> anyhow::Result<Bundle> {
        let mut objects = Vec::new();
        walk(&self.fs, manifests_dir, |path, kind| {
            if is_hidden(path) && path != manifests_dir {
                return Ok(if kind.is_dir() {
                    Visit::SkipDir
                } else {
                    Visit::Continue
                });
            }
            if kind.is_dir() {
                return Ok(Visit::Continue);
            }
            let content = self
                .fs
                .read(path)
                .map_err(|e| opcheck_common::Error::filesystem(path, e))?;
            match decode_objects(&content) {
                Ok(found) => objects.extend(found),
                Err(err) => debug!("Could not decode file contents for {}: {}", path.display(), err),
            }
            Ok(Visit::Continue)
        })?;

        Bundle::from_objects(objects)
            .ok_or_else(|| ReadError::NoCsv(manifests_dir.to_path_buf()).into())
    }
}

/// Decode every YAML document in `content`, keeping mappings with a `kind`.
fn decode_objects(content: &[u8]) -> Result<Vec<Object>, serde_yaml::Error> {
    let mut objects = Vec::new();
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(objects);
    }
    for document in serde_yaml::Deserializer::from_slice(content) {
        let value = Value::deserialize(document)?;
        if value.get("kind").is_some_and(Value::is_string) {
            objects.push(Object::new(value));
        }
    }
    Ok(objects)
}
