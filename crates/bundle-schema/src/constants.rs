//! Fixed names shared with bundle producers.

/// Default manifests directory, relative to the bundle root.
pub const MANIFESTS_DIR: &str = "manifests/";

/// Metadata directory, relative to the bundle root.
pub const METADATA_DIR: &str = "metadata/";

/// Annotations file inside [`METADATA_DIR`].
pub const ANNOTATIONS_FILE: &str = "annotations.yaml";

/// Label naming the manifests directory.
pub const MANIFESTS_LABEL: &str = "operators.operatorframework.io.bundle.manifests.v1";

/// Label carrying the bundle media type.
pub const MEDIATYPE_LABEL: &str = "operators.operatorframework.io.bundle.mediatype.v1";

pub const PACKAGE_LABEL: &str = "operators.operatorframework.io.bundle.package.v1";

/// Kind of the object describing an operator release.
pub const CSV_KIND: &str = "ClusterServiceVersion";

pub const CRD_KIND: &str = "CustomResourceDefinition";

/// Marker file of a helm chart directory.
pub const HELM_CHART_FILE: &str = "Chart.yaml";
