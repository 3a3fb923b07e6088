//! In-memory representation of a loaded bundle.

use crate::constants::{CRD_KIND, CSV_KIND};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Packaging convention followed by a manifests directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "registry+v1")]
    RegistryV1,
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "helm")]
    Helm,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::RegistryV1 => "registry+v1",
            MediaType::Plain => "plain",
            MediaType::Helm => "helm",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object(Value);

impl Object {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(Value::as_str)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.0.get("apiVersion").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.pointer("/metadata/name").and_then(Value::as_str)
    }

    /// Look up a nested value with a JSON pointer such as `/spec/version`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind() == Some(kind)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A bundle: its manifest objects, anchored on one ClusterServiceVersion.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    name: String,
    objects: Vec<Object>,
    #[serde(skip)]
    csv_index: usize,
}

impl Bundle {
    /// Build a bundle from objects in load order. Returns `None` if no
    /// ClusterServiceVersion is among them; the first one wins otherwise.
    pub fn from_objects(objects: Vec<Object>) -> Option<Self> {
        let csv_index = objects.iter().position(|o| o.is_kind(CSV_KIND))?;
        let name = objects[csv_index].name().unwrap_or_default().to_string();
        Some(Self {
            name,
            objects,
            csv_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All raw manifest objects, in load order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn csv(&self) -> &Object {
        &self.objects[self.csv_index]
    }

    pub fn crds(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().filter(|o| o.is_kind(CRD_KIND))
    }

    /// The CRDs, then the CSV, then the bundle itself.
    pub fn objects_to_validate(&self) -> Vec<Validatable<'_>> {
        let mut objs: Vec<Validatable<'_>> = self.crds().map(Validatable::Manifest).collect();
        objs.push(Validatable::Manifest(self.csv()));
        objs.push(Validatable::Bundle(self));
        objs
    }
}

/// Something a validator can look at.
#[derive(Debug, Clone, Copy)]
pub enum Validatable<'a> {
    Manifest(&'a Object),
    Bundle(&'a Bundle),
}

impl Validatable<'_> {
    pub fn kind(&self) -> Option<&str> {
        match self {
            Validatable::Manifest(obj) => obj.kind(),
            Validatable::Bundle(_) => Some("Bundle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(kind: &str, name: &str) -> Object {
        Object::new(json!({
            "apiVersion": "v1",
            "kind": kind,
            "metadata": { "name": name },
        }))
    }

    #[test]
    fn test_bundle_requires_csv() {
        assert!(Bundle::from_objects(vec![obj("Service", "svc")]).is_none());
    }

    #[test]
    fn test_objects_to_validate_order() {
        let bundle = Bundle::from_objects(vec![
            obj("Service", "svc"),
            obj(CSV_KIND, "etcd.v0.9.4"),
            obj(CRD_KIND, "etcdclusters.etcd.database.coreos.com"),
        ])
        .unwrap();

        assert_eq!(bundle.name(), "etcd.v0.9.4");
        let kinds: Vec<_> = bundle
            .objects_to_validate()
            .iter()
            .map(|v| v.kind().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec![CRD_KIND, CSV_KIND, "Bundle"]);
    }

    #[test]
    fn test_object_accessors() {
        let o = obj(CSV_KIND, "x");
        assert_eq!(o.api_version(), Some("v1"));
        assert_eq!(o.name(), Some("x"));
        assert!(o.pointer("/spec/version").is_none());
    }

    #[test]
    fn test_media_type_display() {
        assert_eq!(MediaType::RegistryV1.to_string(), "registry+v1");
        assert_eq!(MediaType::Plain.to_string(), "plain");
        assert_eq!(MediaType::Helm.to_string(), "helm");
    }
}
