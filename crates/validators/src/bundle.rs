//! Checks that need the whole bundle.

use opcheck_bundle_schema::{Bundle, Finding, ManifestResult};
use serde_json::Value;
use std::collections::BTreeSet;

/// Every CRD the CSV owns must ship in the bundle.
pub fn validate_owned_crds(bundle: &Bundle) -> ManifestResult {
    let mut result = ManifestResult::new(bundle.name());

    let owned: Vec<&str> = bundle
        .csv()
        .pointer("/spec/customresourcedefinitions/owned")
        .and_then(Value::as_array)
        .map(|owned| {
            owned
                .iter()
                .filter_map(|crd| crd.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    let present: BTreeSet<&str> = bundle.crds().filter_map(|crd| crd.name()).collect();

    for name in &owned {
        if !present.contains(name) {
            result.add_error(Finding::not_found(
                "spec.customresourcedefinitions.owned",
                Value::from(*name),
                format!("owned CRD \"{name}\" not found in bundle {:?}", bundle.name()),
            ));
        }
    }

    for name in present {
        if !owned.contains(&name) {
            result.add_warning(Finding::not_found(
                "spec.customresourcedefinitions.owned",
                Value::from(name),
                format!("CRD \"{name}\" is present in bundle {:?} but not owned by its CSV", bundle.name()),
            ));
        }
    }

    result
}
