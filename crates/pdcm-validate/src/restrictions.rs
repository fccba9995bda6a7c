//! Built-in validator covering the dictionary's field and schema restrictions.
//!
//! Foreign-key checks need the other sheets of the submission and are left
//! to external validators plugged in through [`SchemaValidator`].

use std::collections::BTreeMap;

use pdcm_model::{Dictionary, Field, RangeRestriction, Row, Schema, ValueType};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::remap::{
    INVALID_BY_RANGE, INVALID_BY_REGEX, INVALID_BY_UNIQUE, INVALID_BY_UNIQUE_KEY,
    INVALID_ENUM_VALUE, INVALID_FIELD_VALUE_TYPE, MISSING_REQUIRED_FIELD, UNRECOGNIZED_FIELD,
};
use crate::validator::{
    RawValidationError, RawValidationResult, SchemaValidator, SchemaValidatorError,
};

/// Checks rows against the restrictions declared in the dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictionValidator;

impl RestrictionValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for RestrictionValidator {
    fn validate(
        &self,
        dictionary: &Dictionary,
        schema_name: &str,
        rows: &[Row],
    ) -> Result<RawValidationResult, SchemaValidatorError> {
        let schema = dictionary.schema(schema_name).ok_or_else(|| {
            SchemaValidatorError::new(format!(
                "Schema {schema_name} not found in dictionary {}",
                dictionary.name
            ))
        })?;
        let checks = schema
            .fields
            .iter()
            .map(FieldCheck::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let mut errors = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            unrecognized_fields(schema, index, row, &mut errors);
            for check in &checks {
                check.apply(index, row, &mut errors);
            }
        }
        errors.extend(unique_field_errors(schema, rows));
        errors.extend(unique_key_errors(schema, rows));

        debug!(
            schema = schema_name,
            rows = rows.len(),
            errors = errors.len(),
            "restriction checks finished"
        );
        Ok(RawValidationResult {
            validation_errors: errors,
        })
    }
}

/// Compiled per-field restrictions.
struct FieldCheck<'a> {
    field: &'a Field,
    regex: Option<Regex>,
    code_list: Option<Vec<String>>,
}

impl<'a> FieldCheck<'a> {
    fn compile(field: &'a Field) -> Result<Self, SchemaValidatorError> {
        let regex = field
            .restrictions
            .regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|error| {
                    SchemaValidatorError::new(format!(
                        "Invalid regular expression for field {}: {error}",
                        field.name
                    ))
                })
            })
            .transpose()?;
        let code_list = field
            .restrictions
            .code_list
            .as_ref()
            .map(|codes| codes.iter().filter_map(code_text).collect());
        Ok(Self {
            field,
            regex,
            code_list,
        })
    }

    fn apply(&self, index: usize, row: &Row, errors: &mut Vec<RawValidationError>) {
        let name = self.field.name.as_str();
        let value = row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());
        let Some(value) = value else {
            if self.field.is_required() {
                errors.push(RawValidationError::new(
                    MISSING_REQUIRED_FIELD,
                    index,
                    name,
                    format!("{name} is a required field."),
                ));
            }
            return;
        };

        let value_type = self.field.value_type;
        if !matches_value_type(value_type, value) {
            errors.push(
                RawValidationError::new(
                    INVALID_FIELD_VALUE_TYPE,
                    index,
                    name,
                    format!(
                        "The value is not permissible for this field, it must be of type {value_type}."
                    ),
                )
                .with_info("value", value),
            );
            return;
        }

        if let Some(codes) = &self.code_list
            && !codes.iter().any(|code| code == value)
        {
            errors.push(
                RawValidationError::new(
                    INVALID_ENUM_VALUE,
                    index,
                    name,
                    "The value is not permissible for this field.",
                )
                .with_info("value", value)
                .with_info("codeList", codes.clone()),
            );
        }

        if let Some(regex) = &self.regex
            && !regex.is_match(value)
        {
            errors.push(
                RawValidationError::new(
                    INVALID_BY_REGEX,
                    index,
                    name,
                    format!(
                        "The value is not a permissible for this field, it must meet the regular expression: \"{}\".",
                        regex.as_str()
                    ),
                )
                .with_info("value", value)
                .with_info("regex", regex.as_str()),
            );
        }

        if let Some(range) = &self.field.restrictions.range
            && let Ok(number) = value.parse::<f64>()
            && !range.contains(number)
        {
            errors.push(
                RawValidationError::new(
                    INVALID_BY_RANGE,
                    index,
                    name,
                    format!(
                        "Value is out of permissible range, it must be {}.",
                        describe_range(range)
                    ),
                )
                .with_info("value", value)
                .with_info("range", range_info(range)),
            );
        }
    }
}

fn unrecognized_fields(
    schema: &Schema,
    index: usize,
    row: &Row,
    errors: &mut Vec<RawValidationError>,
) {
    for column in row.keys() {
        if schema.field(column).is_none() {
            errors.push(RawValidationError::new(
                UNRECOGNIZED_FIELD,
                index,
                column.as_str(),
                format!("{column} is not an allowed field for this schema."),
            ));
        }
    }
}

/// Every row holding a value that another row of the sheet also holds.
fn unique_field_errors(schema: &Schema, rows: &[Row]) -> Vec<RawValidationError> {
    let mut errors = Vec::new();
    for field in schema.fields.iter().filter(|field| field.is_unique()) {
        let name = field.name.as_str();
        let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (index, row) in rows.iter().enumerate() {
            if let Some(value) = row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                seen.entry(value).or_default().push(index);
            }
        }
        for (value, indexes) in seen.into_iter().filter(|(_, idx)| idx.len() > 1) {
            for index in indexes {
                errors.push(
                    RawValidationError::new(
                        INVALID_BY_UNIQUE,
                        index,
                        name,
                        format!("Value for {name} must be unique."),
                    )
                    .with_info("value", value),
                );
            }
        }
    }
    errors.sort_by_key(|error| error.index);
    errors
}

/// Rows whose combined key fields repeat; rows with every key field empty are skipped.
fn unique_key_errors(schema: &Schema, rows: &[Row]) -> Vec<RawValidationError> {
    let key = &schema.restrictions.unique_key;
    if key.is_empty() {
        return Vec::new();
    }
    let mut seen: BTreeMap<Vec<&str>, Vec<usize>> = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        let values: Vec<&str> = key
            .iter()
            .map(|field| row.get(field).map_or("", |v| v.trim()))
            .collect();
        if values.iter().all(|value| value.is_empty()) {
            continue;
        }
        seen.entry(values).or_default().push(index);
    }

    let field_name = key.join(",");
    let mut errors = Vec::new();
    for (values, indexes) in seen.into_iter().filter(|(_, idx)| idx.len() > 1) {
        let described = key
            .iter()
            .zip(&values)
            .map(|(field, value)| format!("{field}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        let value_info: Vec<Value> = values.iter().map(|v| Value::from(*v)).collect();
        for index in indexes {
            errors.push(
                RawValidationError::new(
                    INVALID_BY_UNIQUE_KEY,
                    index,
                    field_name.as_str(),
                    format!("Key {described} must be unique."),
                )
                .with_info("uniqueKeyFields", key.clone())
                .with_info("value", value_info.clone()),
            );
        }
    }
    errors.sort_by_key(|error| error.index);
    errors
}

fn matches_value_type(value_type: ValueType, value: &str) -> bool {
    match value_type {
        ValueType::String => true,
        ValueType::Integer => {
            value.parse::<i64>().is_ok()
                || value
                    .parse::<f64>()
                    .is_ok_and(|number| number.is_finite() && number.fract() == 0.0)
        }
        ValueType::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
        ValueType::Boolean => {
            value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
        }
    }
}

fn code_text(code: &Value) -> Option<String> {
    match code {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn range_info(range: &RangeRestriction) -> Value {
    let bounds = [
        ("min", range.min),
        ("max", range.max),
        ("exclusiveMin", range.exclusive_min),
        ("exclusiveMax", range.exclusive_max),
    ];
    Value::Object(
        bounds
            .into_iter()
            .filter_map(|(key, bound)| bound.map(|b| (key.to_string(), Value::from(b))))
            .collect(),
    )
}

fn describe_range(range: &RangeRestriction) -> String {
    let mut bounds = Vec::new();
    if let Some(min) = range.min {
        bounds.push(format!(">= {min}"));
    }
    if let Some(min) = range.exclusive_min {
        bounds.push(format!("> {min}"));
    }
    if let Some(max) = range.max {
        bounds.push(format!("<= {max}"));
    }
    if let Some(max) = range.exclusive_max {
        bounds.push(format!("< {max}"));
    }
    bounds.join(" and ")
}
