#![deny(unsafe_code)]

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use pdcm_model::Dictionary;
use tracing::info;

use crate::error::DictionaryError;
use crate::hash::sha256_hex;
use crate::provider::DictionaryProvider;

/// An immutable, published dictionary.
#[derive(Debug, Clone)]
pub struct DictionarySnapshot {
    pub dictionary: Dictionary,
    /// sha256 of the dictionary's canonical JSON form.
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl DictionarySnapshot {
    pub fn new(dictionary: Dictionary) -> Self {
        let canonical = serde_json::to_vec(&dictionary).unwrap_or_default();
        Self {
            fingerprint: sha256_hex(&canonical),
            dictionary,
            loaded_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.dictionary.name
    }

    pub fn version(&self) -> &str {
        &self.dictionary.version
    }
}

/// Holds the dictionary used for validation.
///
/// Publishing replaces the whole snapshot; readers holding an older `Arc`
/// keep using it until they drop it.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    current: RwLock<Option<Arc<DictionarySnapshot>>>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        let store = Self::new();
        store.publish(dictionary);
        store
    }

    /// Fetch `name`/`version` from the provider and publish it.
    ///
    /// On failure the previously published snapshot stays in place.
    pub fn reload(
        &self,
        provider: &dyn DictionaryProvider,
        name: &str,
        version: &str,
    ) -> Result<Arc<DictionarySnapshot>, DictionaryError> {
        let dictionary = provider.load_dictionary(name, version)?;
        Ok(self.publish(dictionary))
    }

    pub fn publish(&self, dictionary: Dictionary) -> Arc<DictionarySnapshot> {
        let snapshot = Arc::new(DictionarySnapshot::new(dictionary));
        info!(
            dictionary = snapshot.name(),
            version = snapshot.version(),
            fingerprint = %snapshot.fingerprint,
            "dictionary published"
        );
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// The snapshot to validate against.
    pub fn current(&self) -> Result<Arc<DictionarySnapshot>, DictionaryError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(DictionaryError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
