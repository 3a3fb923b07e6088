//! OperatorHub-style checks for operator bundles.
//!
//! This crate provides the validator the `opcheck` binary runs. It produces
//! one [`ManifestResult`] per ClusterServiceVersion, CustomResourceDefinition
//! and bundle it is given; other kinds are ignored.

pub mod bundle;
pub mod crd;
pub mod csv;
pub mod patterns;

use opcheck_bundle_schema::constants::{CRD_KIND, CSV_KIND};
use opcheck_bundle_schema::{ManifestResult, Validatable};
use opcheck_core::Validator;
use tracing::debug;

/// Default validator for the `opcheck` CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorHubValidator;

impl Validator for OperatorHubValidator {
    type Report = ManifestResult;

    fn validate(&self, objects: &[Validatable<'_>]) -> Vec<ManifestResult> {
        objects
            .iter()
            .filter_map(|target| match target {
                Validatable::Manifest(obj) if obj.is_kind(CSV_KIND) => Some(csv::validate_csv(obj)),
                Validatable::Manifest(obj) if obj.is_kind(CRD_KIND) => Some(crd::validate_crd(obj)),
                Validatable::Manifest(obj) => {
                    debug!("No checks for kind {}", obj.kind().unwrap_or("<none>"));
                    None
                }
                Validatable::Bundle(b) => Some(bundle::validate_owned_crds(b)),
            })
            .collect()
    }
}
