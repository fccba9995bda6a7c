//! Spreadsheet ingestion for PDCM submissions.
//!
//! Turns workbook bytes into a [`ProcessedFile`](pdcm_model::ProcessedFile):
//! one ordered row sequence per sheet, with comment rows removed and a
//! per-sheet line offset so validation indices map back to the original file.

pub mod comments;
pub mod error;
pub mod upload;
pub mod workbook;

pub use comments::{COMMENT_COLUMN, COMMENT_PREFIX, is_comment_row, line_number_offset, strip_comment_rows};
pub use error::{IngestError, Result};
pub use upload::{ACCEPTED_CONTENT_TYPES, Upload, content_type_for_path, validate_upload};
pub use workbook::{cell_to_string, load_workbook, read_workbook, sheet_rows};
