//! Error types for spreadsheet ingestion.

use std::path::PathBuf;

use pdcm_model::ServiceError;
use thiserror::Error;

/// Errors that can occur while reading an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// No file was attached to the request.
    #[error("No file uploaded")]
    NoFileUploaded,

    /// The upload is not an Excel workbook.
    #[error("Please upload an Excel file. Expected: {expected}. Obtained: {obtained}.")]
    UnsupportedContentType { expected: String, obtained: String },

    // === Workbook Errors ===
    /// Failed to read the workbook from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a readable workbook.
    #[error("failed to open workbook {file_name}: {source}")]
    Workbook {
        file_name: String,
        #[source]
        source: calamine::Error,
    },

    /// A sheet listed in the workbook could not be read.
    #[error("failed to read sheet {sheet} in {file_name}: {source}")]
    Sheet {
        file_name: String,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl From<IngestError> for ServiceError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::NoFileUploaded | IngestError::UnsupportedContentType { .. } => {
                ServiceError::bad_request(error.to_string())
            }
            // A workbook that cannot be parsed is structural, not a validation finding.
            IngestError::FileRead { .. }
            | IngestError::Workbook { .. }
            | IngestError::Sheet { .. } => ServiceError::unexpected(error.to_string()),
        }
    }
}
