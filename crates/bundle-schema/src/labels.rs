//! Bundle labels and the annotations document that carries them.

use crate::constants::{MANIFESTS_LABEL, MEDIATYPE_LABEL, PACKAGE_LABEL};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Key/value labels attached to a bundle. Unknown keys are kept as-is.
///
/// Scalar values are read as their string form (`1` becomes `"1"`); a null
/// value becomes the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for Labels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(k, v)| (k, v.unwrap_or_default()))
            .collect())
    }
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Manifests directory named by the labels, cleaned and relative to the
    /// bundle root, or `None` when the label is absent.
    pub fn manifests_dir(&self) -> Option<PathBuf> {
        self.get(MANIFESTS_LABEL).map(|value| clean_relative(Path::new(value)))
    }

    /// Media type the bundle declares for itself.
    pub fn media_type(&self) -> Option<&str> {
        self.get(MEDIATYPE_LABEL)
    }

    pub fn package(&self) -> Option<&str> {
        self.get(PACKAGE_LABEL)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Labels(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Lexically clean `path` and drop any root so the result can be joined
/// below another directory. An empty result becomes `.`.
pub fn clean_relative(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// The annotations document (`metadata/annotations.yaml`).
///
/// Only the `annotations` field is read; other top-level fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationMetadata {
    #[serde(default)]
    pub annotations: Option<Labels>,
}

/// Parse an annotations document. A document without annotations, or with
/// no content at all, yields an empty label set.
///
/// Only the first YAML document of the stream is read; anything after a
/// `---` separator is ignored.
pub fn parse_annotations(content: &[u8]) -> Result<Labels, serde_yaml::Error> {
    if is_blank(content) {
        return Ok(Labels::default());
    }
    let Some(first) = serde_yaml::Deserializer::from_slice(content).next() else {
        return Ok(Labels::default());
    };
    let doc = Option::<AnnotationMetadata>::deserialize(first)?;
    Ok(doc.and_then(|d| d.annotations).unwrap_or_default())
}

fn is_blank(content: &[u8]) -> bool {
    String::from_utf8_lossy(content).lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
