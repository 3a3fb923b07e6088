//! Validation result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Error,
    Warning,
}

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    FieldValueRequired,
    FieldValueInvalid,
    FieldValueNotFound,
}

/// One problem found in an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub level: Level,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(rename = "badValue", default, skip_serializing_if = "Option::is_none")]
    pub bad_value: Option<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl Finding {
    pub fn required(field: &str, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::FieldValueRequired,
            level: Level::Error,
            field: field.to_string(),
            bad_value: None,
            detail: detail.into(),
        }
    }

    pub fn invalid(field: &str, bad_value: Value, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::FieldValueInvalid,
            level: Level::Error,
            field: field.to_string(),
            bad_value: Some(bad_value),
            detail: detail.into(),
        }
    }

    pub fn not_found(field: &str, bad_value: Value, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::FieldValueNotFound,
            level: Level::Error,
            field: field.to_string(),
            bad_value: Some(bad_value),
            detail: detail.into(),
        }
    }
}

/// Findings for one validated object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestResult {
    pub name: String,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ManifestResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, mut finding: Finding) {
        finding.level = Level::Error;
        self.errors.push(finding);
    }

    pub fn add_warning(&mut self, mut finding: Finding) {
        finding.level = Level::Warning;
        self.warnings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
