//! Validation of loaded submissions against a dictionary.
//!
//! The stages run in order: [`reconcile_sheets`] rejects sheets without a
//! schema, [`SheetOrchestrator`] runs a [`SchemaValidator`] per sheet and
//! translates its raw errors into the public shape, and [`score_models`]
//! computes completeness for valid submissions.

mod error;
mod orchestrator;
mod reconcile;
pub mod remap;
mod restrictions;
mod score;
mod validator;

pub use error::ValidateError;
pub use orchestrator::{SheetOrchestrator, validate_sheets};
pub use reconcile::{reconcile_sheets, sheets_without_schema};
pub use restrictions::RestrictionValidator;
pub use score::{
    INVITRO_MARKER, MODEL_ID_COLUMN, PATIENT_ID_COLUMN, PLACEHOLDER_VALUES, WeightTable,
    classify_model, is_informative, merge_model_records, round_percentage, score_models,
    score_record, weight_key,
};
pub use validator::{
    RawValidationError, RawValidationResult, SchemaValidator, SchemaValidatorError,
};
