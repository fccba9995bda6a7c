//! Data model shared by the PDCM submission validator.
//!
//! Dictionaries are read-only inputs, [`ProcessedFile`] is the loader's output,
//! and [`ValidationReport`] is what callers receive.

pub mod dictionary;
pub mod error;
pub mod report;
pub mod sheet;

pub use dictionary::{
    Dictionary, Field, FieldRestrictions, FieldWeight, ForeignKey, ForeignKeyMapping, ModelType,
    RangeRestriction, Schema, SchemaRestrictions, ValueType, WeightModelType,
};
pub use error::{ErrorPayload, ServiceError};
pub use report::{ModelScores, SheetValidationResult, ValidationError, ValidationReport, ValidationStatus};
pub use sheet::{ProcessedFile, Row, SheetData};
