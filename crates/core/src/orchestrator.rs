//! Validation of a loaded bundle and rendering of the results.

use crate::loader::{load_bundle_from_dir, ManifestReader};
use opcheck_bundle_schema::{Bundle, Validatable};
use opcheck_common::{Error, Filesystem, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Checks a set of bundle objects.
///
/// Called once per bundle with every object, so rules can look across
/// objects.
pub trait Validator {
    type Report: Serialize;

    fn validate(&self, objects: &[Validatable<'_>]) -> Vec<Self::Report>;
}

/// Run `validator` over the bundle.
///
/// The validator sees the bundle's objects to validate followed by every raw
/// manifest object, so the CSV and CRDs show up twice.
pub fn validate_bundle<V>(bundle: &Bundle, validator: &V) -> Vec<V::Report>
where
    V: Validator + ?Sized,
{
    let mut objs = bundle.objects_to_validate();
    objs.extend(bundle.objects().iter().map(Validatable::Manifest));
    debug!("Validating {} objects from bundle {}", objs.len(), bundle.name());
    validator.validate(&objs)
}

/// Write each result as 4-space indented JSON followed by a newline.
///
/// A result that cannot be serialized is replaced by a one-line diagnostic.
/// Returns the number of results rendered.
pub fn render_results<T, W>(results: &[T], out: &mut W) -> Result<usize>
where
    T: Serialize,
    W: Write + ?Sized,
{
    let mut rendered = 0;
    for result in results {
        match to_pretty_json(result) {
            Ok(json) => {
                out.write_all(&json)?;
                out.write_all(b"\n")?;
                rendered += 1;
            }
            Err(err) => {
                let err = Error::Render(err);
                warn!("{}", err);
                writeln!(out, "ERROR: {}", err)?;
            }
        }
    }
    Ok(rendered)
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Load the bundle at `bundle_root`, validate it and render the results.
pub fn check_bundle<F, R, V, W>(
    fs: &F,
    reader: &R,
    validator: &V,
    bundle_root: &Path,
    out: &mut W,
) -> Result<usize>
where
    F: Filesystem + ?Sized,
    R: ManifestReader + ?Sized,
    V: Validator + ?Sized,
    W: Write + ?Sized,
{
    let loaded = load_bundle_from_dir(fs, reader, bundle_root)?;
    let results = validate_bundle(&loaded.bundle, validator);
    render_results(&results, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcheck_bundle_schema::Object;
    use serde::ser::Error as _;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingValidator {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Validator for RecordingValidator {
        type Report = serde_json::Value;

        fn validate(&self, objects: &[Validatable<'_>]) -> Vec<Self::Report> {
            let kinds: Vec<String> = objects
                .iter()
                .map(|o| o.kind().unwrap_or("?").to_string())
                .collect();
            self.calls.borrow_mut().push(kinds.clone());
            kinds.into_iter().map(|k| json!({ "name": k })).collect()
        }
    }

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot render"))
        }
    }

    fn bundle() -> Bundle {
        Bundle::from_objects(vec![
            Object::new(json!({ "kind": "CustomResourceDefinition", "metadata": { "name": "a.b.c" } })),
            Object::new(json!({ "kind": "ClusterServiceVersion", "metadata": { "name": "op.v1" } })),
            Object::new(json!({ "kind": "Service", "metadata": { "name": "svc" } })),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_call_with_duplicates() {
        let validator = RecordingValidator::default();

        let results = validate_bundle(&bundle(), &validator);

        let calls = validator.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                "CustomResourceDefinition",
                "ClusterServiceVersion",
                "Bundle",
                "CustomResourceDefinition",
                "ClusterServiceVersion",
                "Service",
            ]
        );
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_render_four_space_indent() {
        let mut out = Vec::new();
        let rendered = render_results(&[json!({ "name": "x", "errors": [] })], &mut out).unwrap();

        assert_eq!(rendered, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\n    \"errors\": [],\n    \"name\": \"x\"\n}\n");
    }

    #[test]
    fn test_render_failure_is_inline() {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Report {
            Good { name: &'static str },
            Bad(Unrenderable),
        }

        let mut out = Vec::new();
        let results = [
            Report::Good { name: "first" },
            Report::Bad(Unrenderable),
            Report::Good { name: "last" },
        ];
        let rendered = render_results(&results, &mut out).unwrap();

        assert_eq!(rendered, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "{");
        assert_eq!(lines[1], "    \"name\": \"first\"");
        assert_eq!(lines[3], "ERROR: Render error: cannot render");
        assert_eq!(lines[5], "    \"name\": \"last\"");
    }
}
