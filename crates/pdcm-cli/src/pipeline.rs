//! End-to-end validation of one submission.
//!
//! Stages run in order, each in its own span:
//! load → reconcile → validate → score → build.

use std::collections::BTreeSet;
use std::sync::Arc;

use pdcm_dictionary::DictionaryStore;
use pdcm_ingest::{Upload, load_workbook, validate_upload};
use pdcm_model::{
    Dictionary, ModelScores, ProcessedFile, ServiceError, SheetValidationResult, ValidationReport,
};
use pdcm_report::{build_report, overall_status};
use pdcm_validate::{
    RestrictionValidator, SchemaValidator, SheetOrchestrator, reconcile_sheets, score_models,
};
use serde_json::Value;
use tracing::{info, info_span, trace, warn};

use crate::logging::redact_value;

/// Per-request switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Compute model completeness for valid submissions.
    pub compute_scores: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            compute_scores: true,
        }
    }
}

/// Validates submissions against the store's current dictionary.
///
/// Cheap to share: each request reads the dictionary snapshot once and keeps
/// it for the whole request, so a concurrent reload never mixes versions.
#[derive(Clone)]
pub struct ValidationPipeline {
    store: Arc<DictionaryStore>,
    validator: Arc<dyn SchemaValidator>,
    options: ValidationOptions,
}

impl ValidationPipeline {
    pub fn new(store: Arc<DictionaryStore>, validator: Arc<dyn SchemaValidator>) -> Self {
        Self {
            store,
            validator,
            options: ValidationOptions::default(),
        }
    }

    /// Pipeline using the built-in [`RestrictionValidator`].
    pub fn with_restrictions(store: Arc<DictionaryStore>) -> Self {
        Self::new(store, Arc::new(RestrictionValidator::new()))
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Check the upload, then validate its workbook.
    pub fn validate_upload(&self, upload: Option<&Upload>) -> Result<ValidationReport, ServiceError> {
        let upload = validate_upload(upload).map_err(|error| {
            warn!(error = %error, "upload rejected");
            ServiceError::from(error)
        })?;
        self.validate_workbook(&upload.file_name, &upload.bytes)
    }

    /// Parse workbook bytes and validate every sheet.
    pub fn validate_workbook(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ValidationReport, ServiceError> {
        let span = info_span!("submission", file = file_name);
        let _guard = span.enter();

        let snapshot = self.store.current()?;
        let file = {
            let _load = info_span!("load").entered();
            load_workbook(file_name, bytes)?
        };
        self.validate_file(&snapshot.dictionary, &file)
    }

    /// Validate an already loaded file against `dictionary`.
    pub fn validate_file(
        &self,
        dictionary: &Dictionary,
        file: &ProcessedFile,
    ) -> Result<ValidationReport, ServiceError> {
        let orchestrator = SheetOrchestrator::new(dictionary, self.validator.as_ref());

        {
            let _reconcile = info_span!("reconcile").entered();
            let schema_names: BTreeSet<&str> = dictionary.schema_names().collect();
            reconcile_sheets(&schema_names, file.sheet_names())?;
        }

        let sheets = {
            let _validate = info_span!("validate", sheets = file.sheet_count()).entered();
            file.sheets()
                .map(|(sheet_name, sheet)| orchestrator.validate_sheet(sheet_name, sheet))
                .collect::<Result<Vec<_>, _>>()?
        };
        log_error_values(&sheets);

        let model_score = self.scores(dictionary, file, &sheets);

        let _build = info_span!("build").entered();
        let report = build_report(&file.file_name, dictionary, sheets, model_score);
        info!(
            file = %report.file_name,
            dictionary = %report.dictionary_name,
            version = %report.dictionary_version,
            status = %report.status,
            "submission validated"
        );
        Ok(report)
    }

    fn scores(
        &self,
        dictionary: &Dictionary,
        file: &ProcessedFile,
        sheets: &[SheetValidationResult],
    ) -> Option<ModelScores> {
        if !self.options.compute_scores || !overall_status(sheets).is_valid() {
            return None;
        }
        let _score = info_span!("score").entered();
        Some(score_models(dictionary, file))
    }
}

fn log_error_values(sheets: &[SheetValidationResult]) {
    for sheet in sheets {
        for error in &sheet.result {
            let value = match error.info.get("value") {
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
                None => continue,
            };
            trace!(
                sheet = %sheet.sheet_name,
                index = error.index,
                field = %error.field_name,
                value = redact_value(&value),
                "invalid value"
            );
        }
    }
}
