#![deny(unsafe_code)]

use std::path::PathBuf;

use pdcm_model::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error(
        "Could not fetch dictionary from {location}. Check that a dictionary named [{name}] with version {version} exists."
    )]
    Unavailable {
        location: String,
        name: String,
        version: String,
        #[source]
        source: LoadError,
    },

    #[error("Validator Service not initialized, you should call create first")]
    NotInitialized,
}

/// Underlying cause of an unavailable dictionary.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no dictionary file found (tried {})", display_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dictionary JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary identity mismatch: requested {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    #[error("duplicate schema in dictionary: {schema}")]
    DuplicateSchema { schema: String },

    #[error("duplicate field {field} in schema {schema}")]
    DuplicateField { schema: String, field: String },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<DictionaryError> for ServiceError {
    fn from(error: DictionaryError) -> Self {
        ServiceError::configuration(error.to_string())
    }
}
