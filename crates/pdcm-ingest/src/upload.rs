//! Checks applied to an uploaded file before it is parsed.

use std::path::Path;

use crate::error::{IngestError, Result};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_CONTENT_TYPE: &str = "application/vnd.ms-excel";

/// Content types accepted for submissions.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &[XLSX_CONTENT_TYPE, XLS_CONTENT_TYPE];

/// An uploaded submission file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name as given by the submitter.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read an upload from disk, deriving its content type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            file_name,
            content_type: content_type_for_path(path).map(str::to_string),
            bytes,
        })
    }
}

/// Map a file extension to the content type a browser would send.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    if extension.eq_ignore_ascii_case("xlsx") {
        Some(XLSX_CONTENT_TYPE)
    } else if extension.eq_ignore_ascii_case("xls") {
        Some(XLS_CONTENT_TYPE)
    } else {
        None
    }
}

/// Ensure a file is present and is an Excel workbook.
pub fn validate_upload(upload: Option<&Upload>) -> Result<&Upload> {
    let upload = upload.ok_or(IngestError::NoFileUploaded)?;
    let content_type = upload.content_type.as_deref().unwrap_or("none");
    if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
        return Err(IngestError::UnsupportedContentType {
            expected: ACCEPTED_CONTENT_TYPES.join(","),
            obtained: content_type.to_string(),
        });
    }
    Ok(upload)
}
