use pdcm_model::ServiceError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// Sheets with no schema of the same name; sorted.
    #[error("Sheets: [{}] not found in the dictionary", .sheets.join(", "))]
    SheetsWithoutSchema { sheets: Vec<String> },

    /// The schema validator failed outright on a sheet.
    #[error("{message}")]
    Validator { sheet: String, message: String },

    /// A raw error names a field the dictionary does not define.
    #[error("Field [{field}] not found in schema [{schema}] of the validation dictionary")]
    MissingFieldDefinition { schema: String, field: String },
}

impl From<ValidateError> for ServiceError {
    fn from(error: ValidateError) -> Self {
        match error {
            ValidateError::SheetsWithoutSchema { .. } | ValidateError::Validator { .. } => {
                ServiceError::bad_request(error.to_string())
            }
            ValidateError::MissingFieldDefinition { .. } => {
                ServiceError::configuration(error.to_string())
            }
        }
    }
}
