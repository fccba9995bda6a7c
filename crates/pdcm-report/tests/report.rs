//! Report assembly and JSON output.

use chrono::{DateTime, Utc};
use insta::assert_json_snapshot;
use pdcm_model::{
    Dictionary, ModelScores, SheetValidationResult, ValidationError, ValidationReport,
};
use pdcm_report::{build_report_at, report_to_json, write_report_json};
use serde_json::{Map, json};

fn dictionary() -> Dictionary {
    Dictionary {
        name: "pdcm".to_string(),
        version: "1.0".to_string(),
        schemas: Vec::new(),
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).expect("timestamp")
}

fn valid_report() -> ValidationReport {
    build_report_at(
        epoch(),
        "upload.xlsx",
        &dictionary(),
        vec![
            SheetValidationResult::from_errors("patient", Vec::new()),
            SheetValidationResult::from_errors("model", Vec::new()),
        ],
        Some(ModelScores::from([("M1".to_string(), 100.0)])),
    )
}

#[test]
fn valid_report_shape() {
    let report = valid_report();
    assert_eq!(
        report.model_score,
        Some(ModelScores::from([("M1".to_string(), 100.0)]))
    );
    let without_score = ValidationReport {
        model_score: None,
        ..report
    };
    assert_json_snapshot!(without_score, @r###"
    {
      "date": "2023-11-14T22:13:20Z",
      "fileName": "upload.xlsx",
      "status": "valid",
      "dictionaryName": "pdcm",
      "dictionaryVersion": "1.0",
      "sheetsValidationResults": [
        {
          "sheetName": "patient",
          "status": "valid",
          "result": []
        },
        {
          "sheetName": "model",
          "status": "valid",
          "result": []
        }
      ]
    }
    "###);
}

#[test]
fn invalid_report_has_no_model_score() {
    let mut info = Map::new();
    info.insert("format".to_string(), json!("ALPHANUMERIC"));
    let report = build_report_at(
        epoch(),
        "upload.xlsx",
        &dictionary(),
        vec![SheetValidationResult::from_errors(
            "patient",
            vec![ValidationError {
                error_type: "Invalid format".to_string(),
                index: 4,
                field_name: "patient_id".to_string(),
                info,
                message: "The field's value does not comply with the defined regular expression pattern."
                    .to_string(),
            }],
        )],
        Some(ModelScores::from([("M1".to_string(), 100.0)])),
    );
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["status"], "invalid");
    assert!(value.get("modelScore").is_none());
    assert_eq!(value["sheetsValidationResults"][0]["result"][0]["index"], 4);
    assert_eq!(
        value["sheetsValidationResults"][0]["result"][0]["info"]["format"],
        "ALPHANUMERIC"
    );
}

#[test]
fn written_report_reads_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out").join("report.json");
    let report = valid_report();
    write_report_json(&report, &path).expect("write report");

    let text = std::fs::read_to_string(&path).expect("read report");
    assert!(text.ends_with('\n'));
    let parsed: ValidationReport = serde_json::from_str(&text).expect("parse report");
    assert_eq!(parsed, report);
    assert_eq!(text.trim_end(), report_to_json(&report).expect("json"));
}
