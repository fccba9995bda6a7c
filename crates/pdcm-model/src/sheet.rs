//! Row model produced by the spreadsheet loader.

use std::collections::BTreeMap;

/// One spreadsheet row: column header to formatted cell text.
///
/// Empty cells are absent from the map.
pub type Row = BTreeMap<String, String>;

/// Retained rows of one sheet plus the offset that maps a zero-based row
/// index back to a 1-based line in the original file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    pub rows: Vec<Row>,
    pub line_number_offset: usize,
}

impl SheetData {
    pub fn new(rows: Vec<Row>, line_number_offset: usize) -> Self {
        Self {
            rows,
            line_number_offset,
        }
    }

    /// Translate a retained-row index into original file coordinates.
    pub fn file_line(&self, index: usize) -> usize {
        index + self.line_number_offset
    }
}

/// A loaded workbook. Sheets keep workbook order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedFile {
    pub file_name: String,
    sheets: Vec<(String, SheetData)>,
}

impl ProcessedFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets: Vec::new(),
        }
    }

    /// Append a sheet, replacing the data of an existing sheet with the same
    /// name in place.
    pub fn insert_sheet(&mut self, name: impl Into<String>, data: SheetData) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = data,
            None => self.sheets.push((name, data)),
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, data: SheetData) -> Self {
        self.insert_sheet(name, data);
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetData> {
        self.sheets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, data)| data)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &SheetData)> {
        self.sheets.iter().map(|(name, data)| (name.as_str(), data))
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|(_, data)| data.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_keep_insertion_order() {
        let file = ProcessedFile::new("upload.xlsx")
            .with_sheet("patient", SheetData::default())
            .with_sheet("model", SheetData::default())
            .with_sheet("drug", SheetData::default());
        let names: Vec<&str> = file.sheet_names().collect();
        assert_eq!(names, vec!["patient", "model", "drug"]);
    }

    #[test]
    fn reinserting_a_sheet_keeps_its_position() {
        let mut file = ProcessedFile::new("upload.xlsx")
            .with_sheet("patient", SheetData::default())
            .with_sheet("model", SheetData::default());
        file.insert_sheet("patient", SheetData::new(Vec::new(), 5));
        let names: Vec<&str> = file.sheet_names().collect();
        assert_eq!(names, vec!["patient", "model"]);
        assert_eq!(file.sheet("patient").map(|s| s.line_number_offset), Some(5));
    }

    #[test]
    fn file_line_adds_offset() {
        let sheet = SheetData::new(Vec::new(), 4);
        assert_eq!(sheet.file_line(0), 4);
        assert_eq!(sheet.file_line(3), 7);
    }
}
