//! Dictionary definitions as published by the dictionary service.
//!
//! The JSON shape follows the Lectern layout: a named, versioned list of
//! schemas, each holding field definitions with optional `meta` and
//! `restrictions` blocks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key in a field's `meta` block holding the declared display format.
pub const META_FORMAT: &str = "format";
/// Key in a field's `meta` block holding the completeness weight.
pub const META_FIELD_WEIGHT: &str = "field_weight";
/// Key in a field's `meta` block naming the model type the weight counts for.
pub const META_WEIGHT_FOR_MODEL_TYPE: &str = "weight_for_model_type";
/// Key in a field's `meta` block flagging per-field uniqueness.
pub const META_UNIQUE: &str = "unique";

/// A named, versioned collection of schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

impl Dictionary {
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.name == name)
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|schema| schema.name.as_str())
    }

    /// Resolve a field definition by schema and field name.
    pub fn field(&self, schema_name: &str, field_name: &str) -> Option<&Field> {
        self.schema(schema_name)
            .and_then(|schema| schema.field(field_name))
    }
}

/// One schema; matched 1:1 against a spreadsheet sheet name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub restrictions: SchemaRestrictions,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// Schema-level restrictions spanning more than one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRestrictions {
    #[serde(default, rename = "uniqueKey", skip_serializing_if = "Vec::is_empty")]
    pub unique_key: Vec<String>,
    #[serde(default, rename = "foreignKey", skip_serializing_if = "Vec::is_empty")]
    pub foreign_key: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub schema: String,
    #[serde(default)]
    pub mappings: Vec<ForeignKeyMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyMapping {
    pub local: String,
    pub foreign: String,
}

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, rename = "valueType")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form metadata; carries `format` and the scoring weights.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub restrictions: FieldRestrictions,
}

impl Field {
    /// Declared format used to enrich error details (e.g. `ALPHANUMERIC`).
    pub fn format(&self) -> Option<&str> {
        self.meta.get(META_FORMAT).and_then(Value::as_str)
    }

    /// Completeness weight, present only when both a positive numeric
    /// `field_weight` and a known `weight_for_model_type` are declared.
    pub fn weight(&self) -> Option<FieldWeight> {
        let weight = self.meta.get(META_FIELD_WEIGHT)?.as_f64()?;
        if weight <= 0.0 {
            return None;
        }
        let model_type = self
            .meta
            .get(META_WEIGHT_FOR_MODEL_TYPE)?
            .as_str()?
            .parse()
            .ok()?;
        Some(FieldWeight { weight, model_type })
    }

    pub fn is_required(&self) -> bool {
        self.restrictions.required
    }

    pub fn is_unique(&self) -> bool {
        self.restrictions.unique
            || self
                .meta
                .get(META_UNIQUE)
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }
}

/// Per-field restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRestrictions {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, rename = "codeList", skip_serializing_if = "Option::is_none")]
    pub code_list: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeRestriction>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeRestriction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, rename = "exclusiveMin", skip_serializing_if = "Option::is_none")]
    pub exclusive_min: Option<f64>,
    #[serde(default, rename = "exclusiveMax", skip_serializing_if = "Option::is_none")]
    pub exclusive_max: Option<f64>,
}

impl RangeRestriction {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min)
            && self.max.is_none_or(|max| value <= max)
            && self.exclusive_min.is_none_or(|min| value > min)
            && self.exclusive_max.is_none_or(|max| value < max)
    }
}

/// Kind of model a joined record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Pdx,
    Invitro,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Pdx => "pdx",
            ModelType::Invitro => "invitro",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of `weight_for_model_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightModelType {
    Pdx,
    Invitro,
    Both,
}

impl WeightModelType {
    pub fn applies_to(&self, model_type: ModelType) -> bool {
        match self {
            WeightModelType::Both => true,
            WeightModelType::Pdx => model_type == ModelType::Pdx,
            WeightModelType::Invitro => model_type == ModelType::Invitro,
        }
    }
}

impl FromStr for WeightModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdx" => Ok(WeightModelType::Pdx),
            "invitro" => Ok(WeightModelType::Invitro),
            "both" => Ok(WeightModelType::Both),
            other => Err(format!("unknown weight_for_model_type: {other}")),
        }
    }
}

/// Scoring metadata of a weighted field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub weight: f64,
    pub model_type: WeightModelType,
}
