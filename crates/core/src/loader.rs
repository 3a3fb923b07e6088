//! Bundle loading: metadata -> manifests directory -> media type -> bundle.

use crate::locator::{find_bundle_metadata, MetadataLocation};
use opcheck_bundle_schema::constants::MANIFESTS_DIR;
use opcheck_bundle_schema::labels::clean_relative;
use opcheck_bundle_schema::{Bundle, MediaType};
use opcheck_common::{Filesystem, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reads manifests out of a bundle's manifests directory.
pub trait ManifestReader {
    /// Classify the packaging convention used by `manifests_dir`.
    fn classify_media_type(&self, manifests_dir: &Path) -> anyhow::Result<MediaType>;

    /// Load the bundle stored in `manifests_dir`.
    fn load_bundle(&self, manifests_dir: &Path) -> anyhow::Result<Bundle>;
}

impl<R: ManifestReader + ?Sized> ManifestReader for &R {
    fn classify_media_type(&self, manifests_dir: &Path) -> anyhow::Result<MediaType> {
        (**self).classify_media_type(manifests_dir)
    }

    fn load_bundle(&self, manifests_dir: &Path) -> anyhow::Result<Bundle> {
        (**self).load_bundle(manifests_dir)
    }
}

/// A loaded bundle and what was learned on the way.
#[derive(Debug, Clone)]
pub struct LoadedBundle {
    pub bundle: Bundle,
    pub media_type: MediaType,
    pub metadata: MetadataLocation,
    pub manifests_dir: PathBuf,
}

/// Load the bundle rooted at `bundle_root`.
///
/// Reader failures are returned as [`opcheck_common::Error::Loader`] without
/// further interpretation.
pub fn load_bundle_from_dir<F, R>(fs: &F, reader: &R, bundle_root: &Path) -> Result<LoadedBundle>
where
    F: Filesystem + ?Sized,
    R: ManifestReader + ?Sized,
{
    let metadata = find_bundle_metadata(fs, bundle_root)?;

    let manifests_dir_name = metadata
        .labels
        .manifests_dir()
        .unwrap_or_else(|| clean_relative(Path::new(MANIFESTS_DIR)));
    let manifests_dir = bundle_root.join(manifests_dir_name);

    let media_type = reader.classify_media_type(&manifests_dir)?;
    info!(
        "Manifests directory {} has media type {} (package {})",
        manifests_dir.display(),
        media_type,
        metadata.labels.package().unwrap_or("<unset>")
    );
    if let Some(declared) = metadata.labels.media_type() {
        if declared != media_type.as_str() {
            warn!(
                "Bundle declares media type {} but its manifests look like {}",
                declared, media_type
            );
        }
    }

    let bundle = reader.load_bundle(&manifests_dir)?;

    Ok(LoadedBundle {
        bundle,
        media_type,
        metadata,
        manifests_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcheck_bundle_schema::Object;
    use opcheck_common::{Error, MemFs};
    use serde_json::json;
    use std::cell::RefCell;

    /// Records which directories it was asked about.
    #[derive(Default)]
    struct StubReader {
        calls: RefCell<Vec<(&'static str, PathBuf)>>,
        fail_classify: bool,
        fail_load: bool,
    }

    impl ManifestReader for StubReader {
        fn classify_media_type(&self, manifests_dir: &Path) -> anyhow::Result<MediaType> {
            self.calls
                .borrow_mut()
                .push(("classify", manifests_dir.to_path_buf()));
            if self.fail_classify {
                anyhow::bail!("The directory {} contains no yaml files", manifests_dir.display());
            }
            Ok(MediaType::RegistryV1)
        }

        fn load_bundle(&self, manifests_dir: &Path) -> anyhow::Result<Bundle> {
            self.calls
                .borrow_mut()
                .push(("load", manifests_dir.to_path_buf()));
            if self.fail_load {
                anyhow::bail!("unable to find a csv in bundle directory");
            }
            Ok(Bundle::from_objects(vec![Object::new(json!({
                "kind": "ClusterServiceVersion",
                "metadata": { "name": "etcd.v0.9.4" },
            }))])
            .expect("stub bundle has a csv"))
        }
    }

    #[test]
    fn test_default_manifests_dir() {
        let fs = MemFs::new().with_file("/b/metadata/annotations.yaml", "annotations: {a: b}");
        let reader = StubReader::default();

        let loaded = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap();

        assert_eq!(loaded.manifests_dir, PathBuf::from("/b/manifests"));
        assert_eq!(loaded.media_type, MediaType::RegistryV1);
        assert_eq!(loaded.bundle.name(), "etcd.v0.9.4");
        assert_eq!(
            *reader.calls.borrow(),
            vec![
                ("classify", PathBuf::from("/b/manifests")),
                ("load", PathBuf::from("/b/manifests")),
            ]
        );
    }

    #[test]
    fn test_labelled_manifests_dir_is_cleaned() {
        let fs = MemFs::new().with_file(
            "/b/metadata/annotations.yaml",
            "annotations:\n  operators.operatorframework.io.bundle.manifests.v1: ./deploy/olm/\n",
        );
        let reader = StubReader::default();

        let loaded = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap();
        assert_eq!(loaded.manifests_dir, PathBuf::from("/b/deploy/olm"));
    }

    #[test]
    fn test_declared_media_type_does_not_override_detection() {
        let fs = MemFs::new().with_file(
            "/b/metadata/annotations.yaml",
            "annotations:\n  operators.operatorframework.io.bundle.mediatype.v1: helm\n",
        );
        let reader = StubReader::default();

        let loaded = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap();
        assert_eq!(loaded.metadata.labels.media_type(), Some("helm"));
        assert_eq!(loaded.media_type, MediaType::RegistryV1);
    }

    #[test]
    fn test_absolute_label_stays_under_root() {
        let fs = MemFs::new().with_file(
            "/b/metadata/annotations.yaml",
            "annotations:\n  operators.operatorframework.io.bundle.manifests.v1: /etc/manifests\n",
        );
        let reader = StubReader::default();

        let loaded = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap();
        assert_eq!(loaded.manifests_dir, PathBuf::from("/b/etc/manifests"));
    }

    #[test]
    fn test_locator_failure_skips_reader() {
        let fs = MemFs::new().with_dir("/empty");
        let reader = StubReader::default();

        let err = load_bundle_from_dir(&fs, &reader, Path::new("/empty")).unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert!(reader.calls.borrow().is_empty());
    }

    #[test]
    fn test_reader_failures_are_verbatim() {
        let fs = MemFs::new().with_file("/b/metadata/annotations.yaml", "annotations: {a: b}");

        let reader = StubReader {
            fail_classify: true,
            ..Default::default()
        };
        let err = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap_err();
        assert_eq!(err.to_string(), "The directory /b/manifests contains no yaml files");
        assert_eq!(reader.calls.borrow().len(), 1);

        let reader = StubReader {
            fail_load: true,
            ..Default::default()
        };
        let err = load_bundle_from_dir(&fs, &reader, Path::new("/b")).unwrap_err();
        assert!(matches!(err, Error::Loader(_)));
        assert_eq!(err.to_string(), "unable to find a csv in bundle directory");
    }
}
