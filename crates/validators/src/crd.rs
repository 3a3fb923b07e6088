//! CustomResourceDefinition checks.

use opcheck_bundle_schema::{Finding, ManifestResult, Object};
use serde_json::Value;

pub fn validate_crd(crd: &Object) -> ManifestResult {
    let mut result = ManifestResult::new(crd.name().unwrap_or_default());

    if crd.name().map_or(true, str::is_empty) {
        result.add_error(Finding::required(
            "metadata.name",
            "CRD metadata.name not specified",
        ));
    }

    if crd
        .pointer("/spec/group")
        .and_then(Value::as_str)
        .map_or(true, str::is_empty)
    {
        result.add_error(Finding::required("spec.group", "CRD spec.group not specified"));
    }

    // v1 lists versions; v1beta1 may carry a single spec.version instead.
    let has_versions = crd
        .pointer("/spec/versions")
        .and_then(Value::as_array)
        .is_some_and(|v| !v.is_empty());
    let has_version = crd
        .pointer("/spec/version")
        .and_then(Value::as_str)
        .is_some_and(|v| !v.is_empty());
    if !has_versions && !has_version {
        result.add_error(Finding::required(
            "spec.versions",
            "CRD must define at least one version",
        ));
    }

    result
}
