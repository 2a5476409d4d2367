//! Saved-configuration persistence over an opaque key-value store.

mod file_store;
mod gateway;
mod memory_store;
mod record;
mod sqlite_store;

pub use crate::shared::errors::StoreError;
pub use file_store::FileStore;
pub use gateway::ConfigurationGateway;
pub use memory_store::MemoryStore;
pub use record::{
    decode_configurations, encode_configurations, Configuration, ConfigurationRef, DecodeError,
    ProjectAssignment, SCHEMA_VERSION,
};
pub use sqlite_store::SqliteStore;

use crate::config::{StatePaths, StoreBackend};

pub const DEFAULT_STORE_KEY: &str = "orgmap.configurations";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
    /// Returns whether an entry existed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        (**self).list()
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        (**self).delete(key)
    }
}

/// Keys double as file names for [`FileStore`], so they are restricted to a
/// portable character set.
pub fn validate_store_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("must be non-empty".to_string());
    }
    if key.starts_with('.') {
        return Err("must not start with '.'".to_string());
    }
    if key
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_'))
    {
        return Ok(());
    }
    Err("must use only ASCII letters, digits, '.', '-' or '_'".to_string())
}

pub(crate) fn check_store_key(key: &str) -> Result<(), StoreError> {
    validate_store_key(key).map_err(|reason| StoreError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

pub fn open_store(
    backend: StoreBackend,
    paths: &StatePaths,
) -> Result<Box<dyn KeyValueStore>, StoreError> {
    Ok(match backend {
        StoreBackend::File => Box::new(FileStore::open(paths.store_dir())?),
        StoreBackend::Sqlite => Box::new(SqliteStore::open(&paths.sqlite_path())?),
        StoreBackend::Memory => Box::new(MemoryStore::new()),
    })
}
