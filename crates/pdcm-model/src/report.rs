//! Validation report types returned to callers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Completeness percentage per model identifier.
pub type ModelScores = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    NotProcessed,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::NotProcessed => "not_processed",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public error shape (`PDCMSchemaValidationError`).
///
/// `index` is always in original file coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub error_type: String,
    pub index: usize,
    pub field_name: String,
    #[serde(default)]
    pub info: Map<String, Value>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetValidationResult {
    pub sheet_name: String,
    pub status: ValidationStatus,
    #[serde(default)]
    pub result: Vec<ValidationError>,
}

impl SheetValidationResult {
    /// Build a result whose status follows from the error list.
    pub fn from_errors(sheet_name: impl Into<String>, result: Vec<ValidationError>) -> Self {
        let status = if result.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        Self {
            sheet_name: sheet_name.into(),
            status,
            result,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn error_count(&self) -> usize {
        self.result.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub date: DateTime<Utc>,
    pub file_name: String,
    pub status: ValidationStatus,
    pub dictionary_name: String,
    pub dictionary_version: String,
    pub sheets_validation_results: Vec<SheetValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_score: Option<ModelScores>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn error_count(&self) -> usize {
        self.sheets_validation_results
            .iter()
            .map(SheetValidationResult::error_count)
            .sum()
    }

    pub fn invalid_sheets(&self) -> impl Iterator<Item = &SheetValidationResult> {
        self.sheets_validation_results
            .iter()
            .filter(|sheet| !sheet.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_error_list_is_valid() {
        let sheet = SheetValidationResult::from_errors("patient", Vec::new());
        assert_eq!(sheet.status, ValidationStatus::Valid);
        assert!(sheet.result.is_empty());
    }

    #[test]
    fn error_serializes_in_camel_case() {
        let error = ValidationError {
            error_type: "Missing required field".to_string(),
            index: 2,
            field_name: "patient_id".to_string(),
            info: Map::new(),
            message: "A required field is missing from the input data.".to_string(),
        };
        let value = serde_json::to_value(&error).expect("serialize error");
        assert_eq!(
            value,
            json!({
                "errorType": "Missing required field",
                "index": 2,
                "fieldName": "patient_id",
                "info": {},
                "message": "A required field is missing from the input data."
            })
        );
    }

    #[test]
    fn model_score_is_omitted_when_absent() {
        let report = ValidationReport {
            date: DateTime::<Utc>::from_timestamp(0, 0).expect("epoch"),
            file_name: "upload.xlsx".to_string(),
            status: ValidationStatus::Valid,
            dictionary_name: "pdcm".to_string(),
            dictionary_version: "1.0".to_string(),
            sheets_validation_results: Vec::new(),
            model_score: None,
        };
        let value = serde_json::to_value(&report).expect("serialize report");
        assert!(value.get("modelScore").is_none());
        assert_eq!(value["status"], "valid");
        assert_eq!(value["dictionaryVersion"], "1.0");
    }
}
