#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pdcm_model::Dictionary;
use tracing::{debug, info};

use crate::error::{DictionaryError, LoadError};

pub const DICTIONARY_DIR_ENV_VAR: &str = "PDCM_DICTIONARY_DIR";

/// Source of dictionary definitions.
pub trait DictionaryProvider: Send + Sync {
    /// Human-readable location used in error messages (URL, directory, ...).
    fn location(&self) -> String;

    fn load_dictionary(&self, name: &str, version: &str) -> Result<Dictionary, DictionaryError>;
}

/// Loads dictionaries exported as JSON files under a root directory.
///
/// Looks for `<root>/<name>/<version>.json`, then `<root>/<name>-<version>.json`.
#[derive(Debug, Clone)]
pub struct FileDictionaryProvider {
    root: PathBuf,
}

impl FileDictionaryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Provider rooted at `PDCM_DICTIONARY_DIR`, or `./dictionaries`.
    pub fn from_env() -> Self {
        Self::new(default_dictionary_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn candidate_paths(&self, name: &str, version: &str) -> Vec<PathBuf> {
        vec![
            self.root.join(name).join(format!("{version}.json")),
            self.root.join(format!("{name}-{version}.json")),
        ]
    }

    fn read(&self, name: &str, version: &str) -> Result<Dictionary, LoadError> {
        let tried = self.candidate_paths(name, version);
        let Some(path) = tried.iter().find(|path| path.is_file()) else {
            return Err(LoadError::NotFound { tried });
        };
        debug!(path = %path.display(), "reading dictionary file");
        let bytes = std::fs::read(path).map_err(|source| LoadError::io(path, source))?;
        let dictionary: Dictionary =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
                path: path.clone(),
                source,
            })?;
        if dictionary.name != name || dictionary.version != version {
            return Err(LoadError::Mismatch {
                expected: format!("{name}@{version}"),
                found: format!("{}@{}", dictionary.name, dictionary.version),
            });
        }
        check_integrity(&dictionary)?;
        Ok(dictionary)
    }
}

impl DictionaryProvider for FileDictionaryProvider {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn load_dictionary(&self, name: &str, version: &str) -> Result<Dictionary, DictionaryError> {
        info!(dictionary = name, version, root = %self.root.display(), "fetching validation dictionary");
        let dictionary = self
            .read(name, version)
            .map_err(|source| DictionaryError::Unavailable {
                location: self.location(),
                name: name.to_string(),
                version: version.to_string(),
                source,
            })?;
        info!(
            dictionary = name,
            version,
            schema_count = dictionary.schemas.len(),
            "dictionary fetched successfully"
        );
        Ok(dictionary)
    }
}

/// Serves dictionaries held in memory; for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDictionaryProvider {
    dictionaries: Vec<Dictionary>,
}

impl StaticDictionaryProvider {
    pub fn new(dictionaries: Vec<Dictionary>) -> Self {
        Self { dictionaries }
    }
}

impl DictionaryProvider for StaticDictionaryProvider {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load_dictionary(&self, name: &str, version: &str) -> Result<Dictionary, DictionaryError> {
        let unavailable = |source| DictionaryError::Unavailable {
            location: self.location(),
            name: name.to_string(),
            version: version.to_string(),
            source,
        };
        let dictionary = self
            .dictionaries
            .iter()
            .find(|d| d.name == name && d.version == version)
            .cloned()
            .ok_or_else(|| unavailable(LoadError::NotFound { tried: Vec::new() }))?;
        check_integrity(&dictionary).map_err(unavailable)?;
        Ok(dictionary)
    }
}

/// Schema names must be unique, and field names unique within a schema.
pub fn check_integrity(dictionary: &Dictionary) -> Result<(), LoadError> {
    let mut schemas = BTreeSet::new();
    for schema in &dictionary.schemas {
        if !schemas.insert(schema.name.as_str()) {
            return Err(LoadError::DuplicateSchema {
                schema: schema.name.clone(),
            });
        }
        let mut fields = BTreeSet::new();
        for field in &schema.fields {
            if !fields.insert(field.name.as_str()) {
                return Err(LoadError::DuplicateField {
                    schema: schema.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn default_dictionary_root() -> PathBuf {
    if let Ok(root) = std::env::var(DICTIONARY_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("dictionaries")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(json: &str) -> Dictionary {
        serde_json::from_str(json).expect("dictionary json")
    }

    #[test]
    fn duplicate_schema_is_rejected() {
        let dict = dictionary(
            r#"{"name":"d","version":"1","schemas":[{"name":"patient"},{"name":"patient"}]}"#,
        );
        assert!(matches!(
            check_integrity(&dict),
            Err(LoadError::DuplicateSchema { .. })
        ));
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let dict = dictionary(
            r#"{"name":"d","version":"1","schemas":[{"name":"patient","fields":[{"name":"a"},{"name":"a"}]}]}"#,
        );
        assert!(matches!(
            check_integrity(&dict),
            Err(LoadError::DuplicateField { .. })
        ));
    }

    #[test]
    fn static_provider_misses_unknown_version() {
        let provider =
            StaticDictionaryProvider::new(vec![dictionary(r#"{"name":"d","version":"1"}"#)]);
        assert!(provider.load_dictionary("d", "1").is_ok());
        let error = provider.load_dictionary("d", "2").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Could not fetch dictionary from memory. Check that a dictionary named [d] with version 2 exists."
        );
    }
}
