//! Workbook loading via calamine.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use pdcm_model::{ProcessedFile, Row, SheetData};
use tracing::{debug, info};

use crate::comments::{line_number_offset, strip_comment_rows};
use crate::error::{IngestError, Result};

/// Header used for columns whose header cell is blank.
const EMPTY_HEADER: &str = "__EMPTY";

/// Read a workbook from disk; the file name in the result is the path's file name.
pub fn read_workbook(path: &Path) -> Result<ProcessedFile> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    load_workbook(file_name, &bytes)
}

/// Parse workbook bytes (xlsx, xlsm, xls, xlsb, ods) into per-sheet rows.
///
/// Sheets appear in workbook order. Within each sheet the first row is the
/// header, comment rows are removed, and fully blank rows are skipped.
pub fn load_workbook(file_name: &str, bytes: &[u8]) -> Result<ProcessedFile> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| IngestError::Workbook {
            file_name: file_name.to_string(),
            source,
        })?;

    let mut processed = ProcessedFile::new(file_name);
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|source| IngestError::Sheet {
                file_name: file_name.to_string(),
                sheet: sheet_name.clone(),
                source,
            })?;
        let (rows, comments_removed) = strip_comment_rows(sheet_rows(&range));
        let offset = line_number_offset(comments_removed);
        debug!(
            sheet = %sheet_name,
            rows = rows.len(),
            comments_removed,
            line_number_offset = offset,
            "sheet loaded"
        );
        processed.insert_sheet(sheet_name, SheetData::new(rows, offset));
    }

    info!(
        file = %file_name,
        sheet_count = processed.sheet_count(),
        row_count = processed.row_count(),
        "workbook loaded"
    );
    Ok(processed)
}

/// Convert a sheet range into row maps keyed by the header row.
pub fn sheet_rows(range: &Range<Data>) -> Vec<Row> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let headers = header_names(header);

    rows.filter_map(|cells| {
        let row: Row = headers
            .iter()
            .zip(cells)
            .filter_map(|(name, cell)| cell_to_string(cell).map(|value| (name.clone(), value)))
            .collect();
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    header
        .iter()
        .map(|cell| {
            let base = cell_to_string(cell)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| EMPTY_HEADER.to_string());
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Formatted text of a cell, or `None` for empty cells.
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) if value.is_empty() => None,
        Data::String(value) => Some(value.clone()),
        Data::Bool(value) => Some(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => Some(
            value
                .as_datetime()
                .map(|dt| {
                    if dt.time() == chrono::NaiveTime::MIN {
                        dt.format("%Y-%m-%d").to_string()
                    } else {
                        dt.format("%Y-%m-%d %H:%M:%S").to_string()
                    }
                })
                .unwrap_or_else(|| value.to_string()),
        ),
        other => Some(other.to_string()),
    }
}
