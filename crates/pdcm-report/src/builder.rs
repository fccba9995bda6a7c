use chrono::{DateTime, Utc};
use pdcm_model::{
    Dictionary, ModelScores, SheetValidationResult, ValidationReport, ValidationStatus,
};
use tracing::info;

/// `Valid` when every sheet is valid, including when there are no sheets.
pub fn overall_status(sheets: &[SheetValidationResult]) -> ValidationStatus {
    if sheets.iter().all(SheetValidationResult::is_valid) {
        ValidationStatus::Valid
    } else {
        ValidationStatus::Invalid
    }
}

/// Assemble the report, stamped with the current time.
pub fn build_report(
    file_name: &str,
    dictionary: &Dictionary,
    sheets: Vec<SheetValidationResult>,
    model_score: Option<ModelScores>,
) -> ValidationReport {
    build_report_at(Utc::now(), file_name, dictionary, sheets, model_score)
}

/// Assemble the report with an explicit timestamp.
///
/// Scores are only carried by valid reports.
pub fn build_report_at(
    date: DateTime<Utc>,
    file_name: &str,
    dictionary: &Dictionary,
    sheets: Vec<SheetValidationResult>,
    model_score: Option<ModelScores>,
) -> ValidationReport {
    let status = overall_status(&sheets);
    let model_score = model_score.filter(|_| status.is_valid());
    let report = ValidationReport {
        date,
        file_name: file_name.to_string(),
        status,
        dictionary_name: dictionary.name.clone(),
        dictionary_version: dictionary.version.clone(),
        sheets_validation_results: sheets,
        model_score,
    };
    info!(
        file = file_name,
        status = %report.status,
        sheets = report.sheets_validation_results.len(),
        errors = report.error_count(),
        "validation report built"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdcm_model::ValidationError;
    use serde_json::Map;

    fn invalid_sheet() -> SheetValidationResult {
        SheetValidationResult::from_errors(
            "patient",
            vec![ValidationError {
                error_type: "Value error".to_string(),
                index: 3,
                field_name: "sex".to_string(),
                info: Map::new(),
                message: "The provided value/data does not match any of the allowed values."
                    .to_string(),
            }],
        )
    }

    #[test]
    fn no_sheets_is_valid() {
        assert_eq!(overall_status(&[]), ValidationStatus::Valid);
    }

    #[test]
    fn one_invalid_sheet_invalidates_the_report() {
        let sheets = vec![
            SheetValidationResult::from_errors("model", Vec::new()),
            invalid_sheet(),
        ];
        assert_eq!(overall_status(&sheets), ValidationStatus::Invalid);
    }

    #[test]
    fn scores_are_dropped_from_invalid_reports() {
        let dictionary = Dictionary {
            name: "pdcm".to_string(),
            version: "1.0".to_string(),
            schemas: Vec::new(),
        };
        let scores = ModelScores::from([("M1".to_string(), 50.0)]);
        let report = build_report("upload.xlsx", &dictionary, vec![invalid_sheet()], Some(scores));
        assert_eq!(report.status, ValidationStatus::Invalid);
        assert!(report.model_score.is_none());
    }
}
