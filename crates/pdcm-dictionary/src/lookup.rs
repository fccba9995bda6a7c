#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use pdcm_model::{Dictionary, Field, FieldWeight, Schema};

/// Indexed view over a dictionary for repeated schema/field lookups.
#[derive(Debug, Clone)]
pub struct DictionaryLookup<'a> {
    dictionary: &'a Dictionary,
    schemas: BTreeMap<&'a str, &'a Schema>,
    fields: BTreeMap<&'a str, BTreeMap<&'a str, &'a Field>>,
}

impl<'a> DictionaryLookup<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        let mut schemas = BTreeMap::new();
        let mut fields: BTreeMap<&'a str, BTreeMap<&'a str, &'a Field>> = BTreeMap::new();
        for schema in &dictionary.schemas {
            schemas.entry(schema.name.as_str()).or_insert(schema);
            let by_name = fields.entry(schema.name.as_str()).or_default();
            for field in &schema.fields {
                by_name.entry(field.name.as_str()).or_insert(field);
            }
        }
        Self {
            dictionary,
            schemas,
            fields,
        }
    }

    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    pub fn schema(&self, name: &str) -> Option<&'a Schema> {
        self.schemas.get(name).copied()
    }

    pub fn schema_names(&self) -> BTreeSet<&'a str> {
        self.schemas.keys().copied().collect()
    }

    pub fn field(&self, schema: &str, field: &str) -> Option<&'a Field> {
        self.fields
            .get(schema)
            .and_then(|by_name| by_name.get(field))
            .copied()
    }

    /// Every weighted field, in dictionary order, as `(schema, field, weight)`.
    pub fn weighted_fields(&self) -> impl Iterator<Item = (&'a str, &'a str, FieldWeight)> + '_ {
        self.dictionary.schemas.iter().flat_map(|schema| {
            schema.fields.iter().filter_map(move |field| {
                field
                    .weight()
                    .map(|weight| (schema.name.as_str(), field.name.as_str(), weight))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dictionary() -> Dictionary {
        serde_json::from_value(json!({
            "name": "pdcm",
            "version": "1.0",
            "schemas": [
                {"name": "patient", "fields": [
                    {"name": "patient_id", "meta": {"format": "ALPHANUMERIC", "field_weight": 2, "weight_for_model_type": "both"}},
                    {"name": "sex"}
                ]},
                {"name": "cell_model", "fields": [
                    {"name": "model_id", "meta": {"field_weight": 3, "weight_for_model_type": "invitro"}}
                ]}
            ]
        }))
        .expect("dictionary")
    }

    #[test]
    fn resolves_fields_by_schema() {
        let dict = dictionary();
        let lookup = DictionaryLookup::new(&dict);
        assert_eq!(
            lookup.field("patient", "patient_id").and_then(Field::format),
            Some("ALPHANUMERIC")
        );
        assert!(lookup.field("cell_model", "patient_id").is_none());
        assert!(lookup.schema("drug").is_none());
        assert_eq!(
            lookup.schema_names().into_iter().collect::<Vec<_>>(),
            vec!["cell_model", "patient"]
        );
    }

    #[test]
    fn weighted_fields_in_dictionary_order() {
        let dict = dictionary();
        let lookup = DictionaryLookup::new(&dict);
        let weighted: Vec<(&str, &str, f64)> = lookup
            .weighted_fields()
            .map(|(schema, field, weight)| (schema, field, weight.weight))
            .collect();
        assert_eq!(
            weighted,
            vec![("patient", "patient_id", 2.0), ("cell_model", "model_id", 3.0)]
        );
    }
}
