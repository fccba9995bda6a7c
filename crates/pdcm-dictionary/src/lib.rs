#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod lookup;
pub mod provider;
pub mod store;

pub use crate::error::{DictionaryError, LoadError};
pub use crate::lookup::DictionaryLookup;
pub use crate::provider::{
    DICTIONARY_DIR_ENV_VAR, DictionaryProvider, FileDictionaryProvider, StaticDictionaryProvider,
    check_integrity,
};
pub use crate::store::{DictionarySnapshot, DictionaryStore};
