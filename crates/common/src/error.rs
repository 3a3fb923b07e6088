//! Common error types for opcheck.

use std::path::PathBuf;
use thiserror::Error;

/// Common error type for opcheck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No non-empty annotations were found anywhere below the bundle root.
    #[error("metadata not found in {}", root.display())]
    NotFound { root: PathBuf },

    /// The conventional annotations file exists but could not be decoded.
    #[error("error unmarshalling potential bundle metadata {}: {source}", path.display())]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by a manifest reader, passed through untouched.
    #[error(transparent)]
    Loader(#[from] anyhow::Error),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// True when the failure means "nothing there" rather than "something broken".
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Filesystem { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;
