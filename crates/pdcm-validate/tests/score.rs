//! Completeness scoring over merged model records.

use pdcm_model::{Dictionary, ModelType, ProcessedFile, Row, SheetData};
use pdcm_validate::{WeightTable, merge_model_records, score_models};
use proptest::prelude::*;
use serde_json::json;

fn dictionary() -> Dictionary {
    serde_json::from_value(json!({
        "name": "pdcm",
        "version": "1.0",
        "schemas": [
            {"name": "patient", "fields": [
                {"name": "patient_id"},
                {"name": "sex", "meta": {"field_weight": 2, "weight_for_model_type": "both"}}
            ]},
            {"name": "model", "fields": [
                {"name": "model_id"},
                {"name": "patient_id"},
                {"name": "histology", "meta": {"field_weight": 3, "weight_for_model_type": "pdx"}},
                {"name": "sex", "meta": {"field_weight": 1, "weight_for_model_type": "both"}}
            ]},
            {"name": "cell_model", "fields": [
                {"name": "model_id"},
                {"name": "growth_properties", "meta": {"field_weight": 5, "weight_for_model_type": "invitro"}}
            ]}
        ]
    }))
    .expect("dictionary json")
}

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn sheet(rows: Vec<Row>) -> SheetData {
    SheetData::new(rows, 2)
}

#[test]
fn max_scores_follow_model_type() {
    let table = WeightTable::from_dictionary(&dictionary());
    assert_eq!(table.len(), 4);
    assert_eq!(table.max_score(ModelType::Pdx), 6.0);
    assert_eq!(table.max_score(ModelType::Invitro), 8.0);
}

#[test]
fn first_weight_definition_wins() {
    let mut dictionary = dictionary();
    let mut heavier = dictionary.schemas[0].fields[1].clone();
    heavier.meta.insert("field_weight".into(), json!(50));
    dictionary.schemas[0].fields.push(heavier);
    let table = WeightTable::from_dictionary(&dictionary);
    assert_eq!(table.get("patient.sex").map(|w| w.weight), Some(2.0));
}

#[test]
fn complete_pdx_model_scores_one_hundred() {
    let file = ProcessedFile::new("upload.xlsx")
        .with_sheet("patient", sheet(vec![row(&[("patient_id", "P1"), ("sex", "female")])]))
        .with_sheet(
            "model",
            sheet(vec![row(&[
                ("model_id", "M1"),
                ("patient_id", "P1"),
                ("histology", "adenocarcinoma"),
                ("sex", "female"),
            ])]),
        );
    let scores = score_models(&dictionary(), &file);
    assert_eq!(scores.get("M1"), Some(&100.0));
}

#[test]
fn placeholder_values_score_nothing() {
    let file = ProcessedFile::new("upload.xlsx").with_sheet(
        "model",
        sheet(vec![row(&[
            ("model_id", "M1"),
            ("histology", "Not Provided"),
            ("sex", "not collected"),
        ])]),
    );
    assert_eq!(score_models(&dictionary(), &file).get("M1"), Some(&0.0));
}

#[test]
fn invitro_model_uses_invitro_maximum() {
    let file = ProcessedFile::new("upload.xlsx").with_sheet(
        "cell_model",
        sheet(vec![row(&[("model_id", "C1"), ("growth_properties", "adherent")])]),
    );
    // 5 of a possible 8.
    assert_eq!(score_models(&dictionary(), &file).get("C1"), Some(&62.5));
}

#[test]
fn partial_pdx_model_is_rounded() {
    let file = ProcessedFile::new("upload.xlsx")
        .with_sheet("patient", sheet(vec![row(&[("patient_id", "P1"), ("sex", "male")])]))
        .with_sheet("model", sheet(vec![row(&[("model_id", "M1"), ("patient_id", "P1")])]));
    // patient.sex (2) of a possible 6.
    assert_eq!(score_models(&dictionary(), &file).get("M1"), Some(&33.33));
}

#[test]
fn model_columns_override_patient_columns() {
    let file = ProcessedFile::new("upload.xlsx")
        .with_sheet(
            "model",
            sheet(vec![
                row(&[("model_id", "M1"), ("patient_id", "P1"), ("histology", "adenocarcinoma")]),
                row(&[("model_id", "M2"), ("patient_id", "P1"), ("histology", "sarcoma")]),
            ]),
        )
        .with_sheet("patient", sheet(vec![row(&[("patient_id", "P1"), ("sex", "male")])]));
    let records = merge_model_records(&file);
    assert_eq!(
        records["M1"].get("model.histology").map(String::as_str),
        Some("adenocarcinoma")
    );
    assert_eq!(
        records["M2"].get("model.histology").map(String::as_str),
        Some("sarcoma")
    );
    assert_eq!(records["M1"].get("patient.sex").map(String::as_str), Some("male"));
}

#[test]
fn rows_without_identifiers_are_ignored() {
    let file = ProcessedFile::new("upload.xlsx")
        .with_sheet("model", sheet(vec![row(&[("histology", "adenocarcinoma")])]));
    assert!(score_models(&dictionary(), &file).is_empty());
}

#[test]
fn empty_dictionary_scores_zero() {
    let dictionary: Dictionary =
        serde_json::from_value(json!({"name": "pdcm", "version": "0"})).expect("dictionary");
    let file = ProcessedFile::new("upload.xlsx")
        .with_sheet("model", sheet(vec![row(&[("model_id", "M1")])]));
    assert_eq!(score_models(&dictionary, &file).get("M1"), Some(&0.0));
}

proptest! {
    #[test]
    fn scores_stay_within_bounds(values in proptest::collection::vec("[a-z ]{0,12}", 3)) {
        let file = ProcessedFile::new("upload.xlsx").with_sheet(
            "model",
            sheet(vec![row(&[
                ("model_id", "M1"),
                ("histology", values[0].as_str()),
                ("sex", values[1].as_str()),
                ("patient_id", values[2].as_str()),
            ])]),
        );
        let scores = score_models(&dictionary(), &file);
        let score = scores["M1"];
        prop_assert!((0.0..=100.0).contains(&score));
    }
}
