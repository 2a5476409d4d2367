use super::record::{decode_configurations, encode_configurations};
use super::{check_store_key, Configuration, ConfigurationRef, KeyValueStore, StoreError};
use crate::shared::logging::EventLog;

/// Reads and writes the ordered list of saved configurations stored as one
/// value under a fixed key.
pub struct ConfigurationGateway<S> {
    store: S,
    key: String,
    log: EventLog,
}

impl<S: KeyValueStore> ConfigurationGateway<S> {
    pub fn new(store: S, key: &str, log: EventLog) -> Result<Self, StoreError> {
        check_store_key(key)?;
        Ok(Self {
            store,
            key: key.to_string(),
            log,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Saved configurations in append order. An absent key or a stored value
    /// that cannot be decoded yields an empty list; the decode failure is logged.
    pub fn load(&self) -> Result<Vec<Configuration>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match decode_configurations(&raw) {
            Ok(configs) => Ok(configs),
            Err(err) => {
                self.log.warn(
                    "store.load_failed",
                    &format!("ignoring unreadable value under `{}`: {err}", self.key),
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn save_all(&mut self, configs: &[Configuration]) -> Result<(), StoreError> {
        let body = encode_configurations(configs).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &body)
    }

    /// Appends `config` and returns the new list length.
    pub fn append(&mut self, config: Configuration) -> Result<usize, StoreError> {
        let mut configs = self.load()?;
        let id = config.id.clone();
        configs.push(config);
        self.save_all(&configs)?;
        self.log.info(
            "store.appended",
            &format!("saved configuration {id} under `{}`", self.key),
        );
        Ok(configs.len())
    }

    /// Removes every record matching `target` and returns how many were dropped.
    /// Nothing is written when no record matches.
    pub fn remove(&mut self, target: &ConfigurationRef) -> Result<usize, StoreError> {
        let configs = self.load()?;
        let before = configs.len();
        let kept: Vec<Configuration> = configs
            .into_iter()
            .filter(|config| !config.matches(target))
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Ok(0);
        }
        self.save_all(&kept)?;
        self.log.info(
            "store.removed",
            &format!("removed {removed} configuration(s) matching {target}"),
        );
        Ok(removed)
    }

    pub fn find(&self, target: &ConfigurationRef) -> Result<Option<Configuration>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|config| config.matches(target)))
    }
}
