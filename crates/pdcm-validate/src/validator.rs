//! Contract for the per-schema record validator.

use pdcm_model::{Dictionary, Row};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One error as reported by a schema validator.
///
/// `index` is zero-based over the rows handed to the validator. Extra keys a
/// validator attaches are kept in `extra` and dropped at translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawValidationError {
    pub error_type: String,
    pub index: usize,
    pub field_name: String,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawValidationError {
    pub fn new(
        error_type: impl Into<String>,
        index: usize,
        field_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            index,
            field_name: field_name.into(),
            info: Map::new(),
            message: message.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_info(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.info.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawValidationResult {
    #[serde(default)]
    pub validation_errors: Vec<RawValidationError>,
}

/// The validator could not process the batch at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaValidatorError {
    pub message: String,
}

impl SchemaValidatorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validates one schema's rows as a single batch.
pub trait SchemaValidator: Send + Sync {
    fn validate(
        &self,
        dictionary: &Dictionary,
        schema_name: &str,
        rows: &[Row],
    ) -> Result<RawValidationResult, SchemaValidatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_error_accepts_unknown_keys() {
        let raw: RawValidationError = serde_json::from_value(json!({
            "errorType": "INVALID_BY_REGEX",
            "index": 3,
            "fieldName": "patient_id",
            "info": {"value": ["a b"]},
            "message": "bad",
            "ruleName": "regex"
        }))
        .expect("raw error");
        assert_eq!(raw.index, 3);
        assert_eq!(raw.extra.get("ruleName"), Some(&json!("regex")));
    }
}
