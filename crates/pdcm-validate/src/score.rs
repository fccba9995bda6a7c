//! Model completeness scoring.
//!
//! Rows from every sheet are joined per model (directly through `model_id`,
//! and through the model's `patient_id`) into one flat record keyed
//! `sheet.column`. Each record scores the sum of the weights of its
//! informative weighted fields, as a percentage of the maximum achievable
//! for its model type.

use std::collections::BTreeMap;

use pdcm_model::{Dictionary, FieldWeight, ModelScores, ModelType, ProcessedFile, Row};
use tracing::{debug, info};

pub const MODEL_ID_COLUMN: &str = "model_id";
pub const PATIENT_ID_COLUMN: &str = "patient_id";
/// A record holding any key containing this marker is an in-vitro model.
pub const INVITRO_MARKER: &str = "cell_model";
/// Values that count as absent, compared case-insensitively.
pub const PLACEHOLDER_VALUES: [&str; 2] = ["not provided", "not collected"];

/// Key of a weighted field in a merged record.
pub fn weight_key(schema: &str, field: &str) -> String {
    format!("{schema}.{field}")
}

/// Field weights keyed `schema.field`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, FieldWeight>,
}

impl WeightTable {
    /// Collect every weighted field; the first definition of a key wins.
    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        let mut weights = BTreeMap::new();
        for schema in &dictionary.schemas {
            for field in &schema.fields {
                if let Some(weight) = field.weight() {
                    weights
                        .entry(weight_key(&schema.name, &field.name))
                        .or_insert(weight);
                }
            }
        }
        Self { weights }
    }

    pub fn get(&self, key: &str) -> Option<&FieldWeight> {
        self.weights.get(key)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Highest score a record of `model_type` can reach.
    pub fn max_score(&self, model_type: ModelType) -> f64 {
        self.weights
            .values()
            .filter(|weight| weight.model_type.applies_to(model_type))
            .map(|weight| weight.weight)
            .sum()
    }
}

/// Whether a value counts towards completeness.
pub fn is_informative(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !PLACEHOLDER_VALUES
            .iter()
            .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
}

pub fn classify_model(record: &Row) -> ModelType {
    if record.keys().any(|key| key.contains(INVITRO_MARKER)) {
        ModelType::Invitro
    } else {
        ModelType::Pdx
    }
}

/// Sum of the weights of every weighted, informative field in `record`.
pub fn score_record(record: &Row, table: &WeightTable) -> f64 {
    record
        .iter()
        .filter(|(_, value)| is_informative(value))
        .filter_map(|(key, _)| table.get(key))
        .map(|weight| weight.weight)
        .sum()
}

/// Percentage rounded to two decimals; zero when nothing is achievable.
pub fn round_percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    (score / max_score * 100.0 * 100.0).round() / 100.0
}

/// One merged record per distinct `model_id`.
///
/// Patient-level columns are reached through the `patient_id` found on rows
/// that carry both identifiers. Model-level columns override patient-level
/// columns of the same key.
pub fn merge_model_records(file: &ProcessedFile) -> BTreeMap<String, Row> {
    let mut models: BTreeMap<String, Row> = BTreeMap::new();
    let mut patients: BTreeMap<String, Row> = BTreeMap::new();
    let mut model_patient: BTreeMap<String, String> = BTreeMap::new();

    for (sheet_name, sheet) in file.sheets() {
        for row in &sheet.rows {
            let model_id = identifier(row, MODEL_ID_COLUMN);
            let patient_id = identifier(row, PATIENT_ID_COLUMN);
            if model_id.is_none() && patient_id.is_none() {
                continue;
            }
            let prefixed: Vec<(String, String)> = row
                .iter()
                .map(|(column, value)| (weight_key(sheet_name, column), value.clone()))
                .collect();
            if let Some(model_id) = model_id {
                models
                    .entry(model_id.to_string())
                    .or_default()
                    .extend(prefixed.iter().cloned());
            }
            if let Some(patient_id) = patient_id {
                patients
                    .entry(patient_id.to_string())
                    .or_default()
                    .extend(prefixed);
            }
            if let (Some(model_id), Some(patient_id)) = (model_id, patient_id) {
                model_patient.insert(model_id.to_string(), patient_id.to_string());
            }
        }
    }

    models
        .into_iter()
        .map(|(model_id, fields)| {
            let mut record = model_patient
                .get(&model_id)
                .and_then(|patient_id| patients.get(patient_id))
                .cloned()
                .unwrap_or_default();
            record.extend(fields);
            (model_id, record)
        })
        .collect()
}

/// Completeness percentage for every model in `file`.
pub fn score_models(dictionary: &Dictionary, file: &ProcessedFile) -> ModelScores {
    let table = WeightTable::from_dictionary(dictionary);
    let pdx_max = table.max_score(ModelType::Pdx);
    let invitro_max = table.max_score(ModelType::Invitro);
    debug!(
        weighted_fields = table.len(),
        pdx_max, invitro_max, "weight table built"
    );

    let scores: ModelScores = merge_model_records(file)
        .into_iter()
        .map(|(model_id, record)| {
            let model_type = classify_model(&record);
            let max_score = match model_type {
                ModelType::Pdx => pdx_max,
                ModelType::Invitro => invitro_max,
            };
            let score = score_record(&record, &table);
            let percentage = round_percentage(score, max_score);
            debug!(model = %model_id, %model_type, score, percentage, "model scored");
            (model_id, percentage)
        })
        .collect();

    info!(models = scores.len(), "model completeness computed");
    scores
}

fn identifier<'r>(row: &'r Row, column: &str) -> Option<&'r str> {
    row.get(column)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
