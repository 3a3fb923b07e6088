//! Depth-first directory walk over a [`Filesystem`].

use opcheck_common::{EntryKind, Error, Filesystem, Result};
use std::ops::ControlFlow;
use std::path::Path;

/// What the walk should do after visiting an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not descend into this directory. Same as `Continue` for files.
    SkipDir,
    /// End the walk.
    Stop,
}

/// Walk the tree rooted at `root`, calling `visit` for every entry.
///
/// The root is visited first, then the entries of each directory in lexical
/// order. Symlinks are reported but never followed. Failing to stat or list
/// an entry aborts the walk with [`Error::Filesystem`]; so does any error
/// returned by `visit`.
pub fn walk<F, V>(fs: &F, root: &Path, mut visit: V) -> Result<()>
where
    F: Filesystem + ?Sized,
    V: FnMut(&Path, EntryKind) -> Result<Visit>,
{
    let kind = fs
        .entry_kind(root)
        .map_err(|e| Error::filesystem(root, e))?;
    walk_entry(fs, root, kind, &mut visit)?;
    Ok(())
}

fn walk_entry<F, V>(fs: &F, path: &Path, kind: EntryKind, visit: &mut V) -> Result<ControlFlow<()>>
where
    F: Filesystem + ?Sized,
    V: FnMut(&Path, EntryKind) -> Result<Visit>,
{
    match visit(path, kind)? {
        Visit::Stop => return Ok(ControlFlow::Break(())),
        Visit::SkipDir => return Ok(ControlFlow::Continue(())),
        Visit::Continue => {}
    }
    if !kind.is_dir() {
        return Ok(ControlFlow::Continue(()));
    }

    let mut entries = fs
        .read_dir(path)
        .map_err(|e| Error::filesystem(path, e))?;
    entries.sort();

    for entry in entries {
        let kind = fs
            .entry_kind(&entry)
            .map_err(|e| Error::filesystem(&entry, e))?;
        if walk_entry(fs, &entry, kind, visit)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// True if the base name of `path` starts with a dot.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcheck_common::MemFs;
    use std::path::PathBuf;

    fn tree() -> MemFs {
        MemFs::new()
            .with_file("/r/b/z.yaml", "")
            .with_file("/r/a.yaml", "")
            .with_file("/r/.hidden/x.yaml", "")
            .with_file("/r/c.yaml", "")
    }

    #[test]
    fn test_walk_lexical_depth_first() {
        let fs = tree();
        let mut seen = Vec::new();
        walk(&fs, Path::new("/r"), |path, _| {
            seen.push(path.to_path_buf());
            Ok(Visit::Continue)
        })
        .unwrap();

        let expected: Vec<PathBuf> = [
            "/r",
            "/r/.hidden",
            "/r/.hidden/x.yaml",
            "/r/a.yaml",
            "/r/b",
            "/r/b/z.yaml",
            "/r/c.yaml",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_walk_skip_and_stop() {
        let fs = tree();
        let mut seen = Vec::new();
        walk(&fs, Path::new("/r"), |path, kind| {
            seen.push(path.to_path_buf());
            if kind.is_dir() && is_hidden(path) {
                return Ok(Visit::SkipDir);
            }
            if path.ends_with("b/z.yaml") {
                return Ok(Visit::Stop);
            }
            Ok(Visit::Continue)
        })
        .unwrap();

        assert!(!seen.contains(&PathBuf::from("/r/.hidden/x.yaml")));
        assert_eq!(seen.last(), Some(&PathBuf::from("/r/b/z.yaml")));
        assert!(!seen.contains(&PathBuf::from("/r/c.yaml")));
    }

    #[test]
    fn test_walk_propagates_listing_error() {
        let fs = tree().deny("/r/b");
        let err = walk(&fs, Path::new("/r"), |_, _| Ok(Visit::Continue)).unwrap_err();
        assert!(matches!(err, Error::Filesystem { ref path, .. } if path == Path::new("/r/b")));
    }

    #[test]
    fn test_walk_missing_root() {
        let fs = MemFs::new();
        let err = walk(&fs, Path::new("/nope"), |_, _| Ok(Visit::Continue)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/r/.annotations.yaml")));
        assert!(!is_hidden(Path::new("/r/.git/config")));
        assert!(!is_hidden(Path::new(".")));
    }
}
