//! Sheet/schema reconciliation.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::ValidateError;

/// Sheet names with no schema of the same name, sorted and de-duplicated.
///
/// Schemas without a sheet are fine: a submission may omit optional entities.
pub fn sheets_without_schema<'s>(
    schema_names: &BTreeSet<&str>,
    sheet_names: impl IntoIterator<Item = &'s str>,
) -> Vec<String> {
    sheet_names
        .into_iter()
        .filter(|sheet| !schema_names.contains(sheet))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Fail when any sheet lacks a schema.
pub fn reconcile_sheets<'s>(
    schema_names: &BTreeSet<&str>,
    sheet_names: impl IntoIterator<Item = &'s str>,
) -> Result<(), ValidateError> {
    let sheets = sheets_without_schema(schema_names, sheet_names);
    if sheets.is_empty() {
        return Ok(());
    }
    warn!(sheets = ?sheets, "sheets without a matching schema");
    Err(ValidateError::SheetsWithoutSchema { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_sheet_is_named() {
        let schemas = BTreeSet::from(["patient", "model", "drug"]);
        let error = reconcile_sheets(&schemas, ["patient", "extra_sheet"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Sheets: [extra_sheet] not found in the dictionary"
        );
    }

    #[test]
    fn missing_sheets_are_not_an_error() {
        let schemas = BTreeSet::from(["patient", "model", "drug"]);
        assert!(reconcile_sheets(&schemas, ["model"]).is_ok());
        assert!(reconcile_sheets(&schemas, []).is_ok());
    }

    #[test]
    fn offending_sheets_are_sorted() {
        let schemas = BTreeSet::from(["patient"]);
        assert_eq!(
            sheets_without_schema(&schemas, ["zeta", "patient", "alpha"]),
            vec!["alpha".to_string(), "zeta".to_string()]
        );
    }

    #[test]
    fn sheet_names_match_exactly() {
        let schemas = BTreeSet::from(["patient"]);
        assert_eq!(
            sheets_without_schema(&schemas, ["Patient"]),
            vec!["Patient".to_string()]
        );
    }
}
