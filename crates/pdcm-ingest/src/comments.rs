//! Comment-row handling.
//!
//! Submission templates carry directive rows (descriptions, examples) under the
//! header. They are recognised by a `Field` column whose value starts with `#`.

use pdcm_model::Row;

/// Column that carries inline template directives.
pub const COMMENT_COLUMN: &str = "Field";
/// Prefix marking a directive row.
pub const COMMENT_PREFIX: char = '#';

/// Header line plus the shift from zero-based to one-based indexing.
const BASE_LINE_OFFSET: usize = 2;

pub fn is_comment_row(row: &Row) -> bool {
    row.get(COMMENT_COLUMN)
        .is_some_and(|value| value.starts_with(COMMENT_PREFIX))
}

/// Remove comment rows, returning retained rows (order preserved) and the
/// number of rows removed.
pub fn strip_comment_rows(rows: Vec<Row>) -> (Vec<Row>, usize) {
    let total = rows.len();
    let retained: Vec<Row> = rows.into_iter().filter(|row| !is_comment_row(row)).collect();
    let removed = total - retained.len();
    (retained, removed)
}

pub fn line_number_offset(comments_removed: usize) -> usize {
    BASE_LINE_OFFSET + comments_removed
}
