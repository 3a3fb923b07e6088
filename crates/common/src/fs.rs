//! Read-only filesystem access.
//!
//! Everything that touches a bundle on disk goes through [`Filesystem`], so the
//! same discovery and loading code runs against the real filesystem ([`OsFs`])
//! or an in-memory tree ([`MemFs`]) that records how often it was touched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Kind of a directory entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Dir => write!(f, "dir"),
            EntryKind::Symlink => write!(f, "symlink"),
        }
    }
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Dir)
    }
}

/// Narrow read-only view of a filesystem.
pub trait Filesystem {
    /// Read the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Stat `path` without following a trailing symlink.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the entries of the directory at `path` as full paths, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).entry_kind(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).read_dir(path)
    }
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl Filesystem for OsFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let file_type = std::fs::symlink_metadata(path)?.file_type();
        Ok(if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::File
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }
}

/// In-memory filesystem for tests and embedding.
///
/// Parent directories of every added file are created implicitly. Paths
/// registered with [`MemFs::deny`] fail with `PermissionDenied` on read and
/// listing, but can still be stat'ed.
#[derive(Debug, Default)]
pub struct MemFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    denied: BTreeSet<PathBuf>,
    reads: AtomicUsize,
    stats: AtomicUsize,
    listings: AtomicUsize,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.insert(path, contents.as_ref().to_vec());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.insert(path.into());
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(parent.to_path_buf());
        }
    }

    fn check_denied(&self, path: &Path) -> io::Result<()> {
        if self.denied.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }

    /// Number of `read` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `entry_kind` calls so far.
    pub fn stats(&self) -> usize {
        self.stats.load(Ordering::Relaxed)
    }

    /// Number of `read_dir` calls so far.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::Relaxed)
    }

    pub fn accesses(&self) -> usize {
        self.reads() + self.stats() + self.listings()
    }
}

impl Filesystem for MemFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.check_denied(path)?;
        if let Some(contents) = self.files.get(path) {
            return Ok(contents.clone());
        }
        if self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        ))
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        self.stats.fetch_add(1, Ordering::Relaxed);
        if self.files.contains_key(path) {
            Ok(EntryKind::File)
        } else if self.dirs.contains(path) {
            Ok(EntryKind::Dir)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            ))
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.listings.fetch_add(1, Ordering::Relaxed);
        self.check_denied(path)?;
        if !self.dirs.contains(path) {
            let kind = if self.files.contains_key(path) {
                io::ErrorKind::Other
            } else {
                io::ErrorKind::NotFound
            };
            return Err(io::Error::new(
                kind,
                format!("not a directory: {}", path.display()),
            ));
        }
        Ok(self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}
