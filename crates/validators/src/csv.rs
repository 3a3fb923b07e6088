//! ClusterServiceVersion checks.

use crate::patterns::{is_dns1123_subdomain, is_semver};
use opcheck_bundle_schema::{Finding, ManifestResult, Object};
use serde_json::Value;

/// Capability levels an operator may advertise.
pub const CAPABILITY_LEVELS: [&str; 5] = [
    "Basic Install",
    "Seamless Upgrades",
    "Full Lifecycle",
    "Deep Insights",
    "Auto Pilot",
];

/// Fields OperatorHub listings expect, as (JSON pointer, field name).
const RECOMMENDED: [(&str, &str); 5] = [
    ("/spec/displayName", "spec.displayName"),
    ("/spec/description", "spec.description"),
    ("/spec/provider/name", "spec.provider.name"),
    ("/spec/maintainers", "spec.maintainers"),
    ("/spec/icon", "spec.icon"),
];

pub fn validate_csv(csv: &Object) -> ManifestResult {
    let mut result = ManifestResult::new(csv.name().unwrap_or_default());

    match csv.name() {
        None | Some("") => result.add_error(Finding::required(
            "metadata.name",
            "csv.Metadata.Name not specified",
        )),
        Some(name) if !is_dns1123_subdomain(name) => result.add_error(Finding::invalid(
            "metadata.name",
            Value::from(name),
            "csv.Metadata.Name is not a valid DNS-1123 subdomain",
        )),
        Some(_) => {}
    }

    match csv.pointer("/spec/version") {
        None | Some(Value::Null) => result.add_error(Finding::required(
            "spec.version",
            "csv.Spec.Version not specified",
        )),
        Some(Value::String(version)) if is_semver(version) => {}
        Some(other) => result.add_error(Finding::invalid(
            "spec.version",
            other.clone(),
            "csv.Spec.Version is not a valid semantic version",
        )),
    }

    for (pointer, field) in RECOMMENDED {
        if is_empty(csv.pointer(pointer)) {
            result.add_warning(Finding::required(field, format!("{field} not specified")));
        }
    }

    if let Some(capabilities) = csv.pointer("/metadata/annotations/capabilities") {
        let valid = capabilities
            .as_str()
            .is_some_and(|c| CAPABILITY_LEVELS.contains(&c));
        if !valid {
            result.add_error(Finding::invalid(
                "metadata.annotations.capabilities",
                capabilities.clone(),
                format!("capabilities must be one of {}", CAPABILITY_LEVELS.join(", ")),
            ));
        }
    }

    result
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}
