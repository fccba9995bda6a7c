//! Translation of validator error tags into presentation categories.

pub const MISSING_REQUIRED_FIELD: &str = "MISSING_REQUIRED_FIELD";
pub const INVALID_BY_REGEX: &str = "INVALID_BY_REGEX";
pub const INVALID_ENUM_VALUE: &str = "INVALID_ENUM_VALUE";
pub const UNRECOGNIZED_FIELD: &str = "UNRECOGNIZED_FIELD";
pub const INVALID_BY_FOREIGN_KEY: &str = "INVALID_BY_FOREIGN_KEY";
pub const INVALID_BY_UNIQUE_KEY: &str = "INVALID_BY_UNIQUE_KEY";
pub const INVALID_BY_UNIQUE: &str = "INVALID_BY_UNIQUE";
pub const INVALID_FIELD_VALUE_TYPE: &str = "INVALID_FIELD_VALUE_TYPE";
pub const INVALID_BY_RANGE: &str = "INVALID_BY_RANGE";

const ERROR_CATEGORIES: &[(&str, &str)] = &[
    (MISSING_REQUIRED_FIELD, "Missing required field"),
    (INVALID_BY_REGEX, "Invalid format"),
    (INVALID_ENUM_VALUE, "Value error"),
    (UNRECOGNIZED_FIELD, "Unrecognized field"),
    (INVALID_BY_FOREIGN_KEY, "Foreign key violation"),
    (INVALID_BY_UNIQUE_KEY, "Unique key violation"),
    (INVALID_BY_UNIQUE, "Value must be unique"),
];

const ERROR_MESSAGES: &[(&str, &str)] = &[
    (
        MISSING_REQUIRED_FIELD,
        "A required field is missing from the input data.",
    ),
    (
        INVALID_BY_REGEX,
        "The field's value does not comply with the defined regular expression pattern.",
    ),
    (
        INVALID_ENUM_VALUE,
        "The provided value/data does not match any of the allowed values.",
    ),
    (
        UNRECOGNIZED_FIELD,
        "The submitted data has a field which is not in the schema.",
    ),
];

/// Category for a raw error type; unknown types pass through unchanged.
pub fn error_category(error_type: &str) -> &str {
    ERROR_CATEGORIES
        .iter()
        .find(|(raw, _)| *raw == error_type)
        .map_or(error_type, |(_, category)| category)
}

/// Override message for a raw error type, if one is defined.
pub fn default_message(error_type: &str) -> Option<&'static str> {
    ERROR_MESSAGES
        .iter()
        .find(|(raw, _)| *raw == error_type)
        .map(|(_, message)| *message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_categories() {
        assert_eq!(error_category(MISSING_REQUIRED_FIELD), "Missing required field");
        assert_eq!(error_category(INVALID_BY_REGEX), "Invalid format");
        assert_eq!(error_category(INVALID_ENUM_VALUE), "Value error");
        assert_eq!(error_category(UNRECOGNIZED_FIELD), "Unrecognized field");
        assert_eq!(error_category(INVALID_BY_FOREIGN_KEY), "Foreign key violation");
        assert_eq!(error_category(INVALID_BY_UNIQUE_KEY), "Unique key violation");
        assert_eq!(error_category(INVALID_BY_UNIQUE), "Value must be unique");
    }

    #[test]
    fn unknown_types_pass_through() {
        assert_eq!(error_category(INVALID_BY_RANGE), INVALID_BY_RANGE);
        assert_eq!(error_category("SOMETHING_NEW"), "SOMETHING_NEW");
    }

    #[test]
    fn key_violations_keep_raw_message() {
        assert_eq!(default_message(INVALID_BY_FOREIGN_KEY), None);
        assert_eq!(default_message(INVALID_BY_UNIQUE_KEY), None);
        assert_eq!(default_message(INVALID_BY_UNIQUE), None);
        assert_eq!(
            default_message(MISSING_REQUIRED_FIELD),
            Some("A required field is missing from the input data.")
        );
    }
}
