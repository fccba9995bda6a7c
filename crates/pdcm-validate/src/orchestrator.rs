//! Per-sheet validation and translation of raw validator errors.

use pdcm_dictionary::DictionaryLookup;
use pdcm_model::dictionary::META_FORMAT;
use pdcm_model::{Dictionary, ProcessedFile, SheetData, SheetValidationResult, ValidationError};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::error::ValidateError;
use crate::reconcile::reconcile_sheets;
use crate::remap::{UNRECOGNIZED_FIELD, default_message, error_category};
use crate::validator::{RawValidationError, SchemaValidator};

/// Runs a [`SchemaValidator`] over each sheet of a processed file.
pub struct SheetOrchestrator<'a> {
    lookup: DictionaryLookup<'a>,
    validator: &'a dyn SchemaValidator,
}

impl<'a> SheetOrchestrator<'a> {
    pub fn new(dictionary: &'a Dictionary, validator: &'a dyn SchemaValidator) -> Self {
        Self {
            lookup: DictionaryLookup::new(dictionary),
            validator,
        }
    }

    /// Reconcile sheets against schemas, then validate every sheet in file order.
    ///
    /// Fails on the first sheet whose validation cannot complete; no partial
    /// results are returned.
    pub fn validate_file(
        &self,
        file: &ProcessedFile,
    ) -> Result<Vec<SheetValidationResult>, ValidateError> {
        reconcile_sheets(&self.lookup.schema_names(), file.sheet_names())?;
        file.sheets()
            .map(|(sheet_name, sheet)| self.validate_sheet(sheet_name, sheet))
            .collect()
    }

    /// Validate one sheet against the schema of the same name.
    pub fn validate_sheet(
        &self,
        sheet_name: &str,
        sheet: &SheetData,
    ) -> Result<SheetValidationResult, ValidateError> {
        let span = info_span!("validate_sheet", sheet = sheet_name, rows = sheet.rows.len());
        let _guard = span.enter();

        let raw = self
            .validator
            .validate(self.lookup.dictionary(), sheet_name, &sheet.rows)
            .map_err(|error| {
                warn!(sheet = sheet_name, error = %error, "schema validator failed");
                ValidateError::Validator {
                    sheet: sheet_name.to_string(),
                    message: error.message,
                }
            })?;

        let errors = raw
            .validation_errors
            .into_iter()
            .map(|error| self.translate(sheet_name, sheet, error))
            .collect::<Result<Vec<_>, _>>()?;

        let result = SheetValidationResult::from_errors(sheet_name, errors);
        info!(
            sheet = sheet_name,
            status = %result.status,
            errors = result.error_count(),
            "sheet validated"
        );
        Ok(result)
    }

    /// Shift the index to file coordinates, remap type and message, and attach
    /// the declared field format.
    pub fn translate(
        &self,
        sheet_name: &str,
        sheet: &SheetData,
        raw: RawValidationError,
    ) -> Result<ValidationError, ValidateError> {
        let RawValidationError {
            error_type,
            index,
            field_name,
            mut info,
            message,
            ..
        } = raw;

        // Composite keys name several fields; unrecognized ones have no definition.
        if !field_name.contains(',') && error_type != UNRECOGNIZED_FIELD {
            let field = self.lookup.field(sheet_name, &field_name).ok_or_else(|| {
                ValidateError::MissingFieldDefinition {
                    schema: sheet_name.to_string(),
                    field: field_name.clone(),
                }
            })?;
            if let Some(format) = field.format() {
                info.insert(META_FORMAT.to_string(), Value::from(format));
            }
        }

        let translated = ValidationError {
            error_type: error_category(&error_type).to_string(),
            index: sheet.file_line(index),
            field_name,
            info,
            message: default_message(&error_type).map_or(message, str::to_string),
        };
        debug!(
            sheet = sheet_name,
            raw_type = %error_type,
            error_type = %translated.error_type,
            index = translated.index,
            "translated validation error"
        );
        Ok(translated)
    }
}

/// Validate every sheet of `file` with `validator`.
pub fn validate_sheets(
    dictionary: &Dictionary,
    file: &ProcessedFile,
    validator: &dyn SchemaValidator,
) -> Result<Vec<SheetValidationResult>, ValidateError> {
    SheetOrchestrator::new(dictionary, validator).validate_file(file)
}
