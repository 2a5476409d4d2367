use crate::catalog::{load_catalog, Catalog};
use crate::config::{
    bootstrap_state_root, default_state_root_path, load_settings_from, ConfigError, Settings,
    StatePaths,
};
use crate::persistence::{open_store, ConfigurationGateway, KeyValueStore};
use crate::shared::logging::EventLog;

pub type BoxedGateway = ConfigurationGateway<Box<dyn KeyValueStore>>;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn ensure_state_root() -> Result<StatePaths, String> {
    let root = default_state_root_path().map_err(map_config_err)?;
    let paths = StatePaths::new(root);
    bootstrap_state_root(&paths).map_err(map_config_err)?;
    Ok(paths)
}

/// Everything a command needs after the state root is in place.
pub struct CommandContext {
    pub paths: StatePaths,
    pub settings: Settings,
    pub log: EventLog,
}

impl CommandContext {
    pub fn load() -> Result<Self, String> {
        let paths = ensure_state_root()?;
        let settings = load_settings_from(&paths.settings_file()).map_err(map_config_err)?;
        let log = EventLog::new(paths.log_path());
        Ok(Self {
            paths,
            settings,
            log,
        })
    }

    pub fn catalog(&self) -> Result<Catalog, String> {
        match &self.settings.catalog_path {
            Some(path) => load_catalog(path).map_err(|e| e.to_string()),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn catalog_source(&self) -> String {
        self.settings
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string())
    }

    pub fn gateway(&self) -> Result<BoxedGateway, String> {
        let store =
            open_store(self.settings.store.backend, &self.paths).map_err(|e| e.to_string())?;
        ConfigurationGateway::new(store, &self.settings.store.key, self.log.clone())
            .map_err(|e| e.to_string())
    }
}

/// Splits `--flag value` pairs out of `args`. Returns the remaining positional
/// arguments and the value of each requested flag.
pub fn split_flags(
    args: &[String],
    flags: &[&str],
) -> Result<(Vec<String>, Vec<Option<String>>), String> {
    let mut positional = Vec::new();
    let mut values = vec![None; flags.len()];
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(idx) = flags.iter().position(|flag| *flag == arg) {
            let value = iter
                .next()
                .ok_or_else(|| format!("missing value for {arg}"))?;
            values[idx] = Some(value.clone());
        } else if arg.starts_with("--") {
            return Err(format!("unknown option `{arg}`"));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, values))
}
