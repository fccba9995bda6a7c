//! Property tests for comment stripping and line offsets.

use pdcm_ingest::{line_number_offset, strip_comment_rows};
use pdcm_model::Row;
use proptest::prelude::*;

fn data_row(id: usize) -> Row {
    Row::from([("patient_id".to_string(), format!("p{id}"))])
}

fn comment_row(text: &str) -> Row {
    Row::from([("Field".to_string(), format!("#{text}"))])
}

proptest! {
    #[test]
    fn offset_is_two_plus_comments(layout in proptest::collection::vec(any::<bool>(), 0..64)) {
        let rows: Vec<Row> = layout
            .iter()
            .enumerate()
            .map(|(i, is_comment)| if *is_comment { comment_row("note") } else { data_row(i) })
            .collect();
        let comments = layout.iter().filter(|c| **c).count();

        let (retained, removed) = strip_comment_rows(rows);

        prop_assert_eq!(removed, comments);
        prop_assert_eq!(retained.len(), layout.len() - comments);
        prop_assert_eq!(line_number_offset(removed), 2 + comments);
    }

    #[test]
    fn retained_rows_keep_relative_order(layout in proptest::collection::vec(any::<bool>(), 0..64)) {
        let rows: Vec<Row> = layout
            .iter()
            .enumerate()
            .map(|(i, is_comment)| if *is_comment { comment_row("x") } else { data_row(i) })
            .collect();
        let expected: Vec<String> = layout
            .iter()
            .enumerate()
            .filter(|(_, c)| !**c)
            .map(|(i, _)| format!("p{i}"))
            .collect();

        let (retained, _) = strip_comment_rows(rows);
        let ids: Vec<String> = retained.iter().map(|r| r["patient_id"].clone()).collect();
        prop_assert_eq!(ids, expected);
    }
}
