mod error;
mod load;
mod paths;
mod save;
mod settings;

pub use error::ConfigError;
pub use load::{load_global_settings, load_settings_from};
pub use paths::{
    bootstrap_state_root, default_global_config_path, default_state_root_path, StatePaths,
    GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR, LOG_FILE_NAME, SQLITE_FILE_NAME,
};
pub use save::{save_global_settings, save_settings_to};
pub use settings::{Settings, StoreBackend, StoreSettings};
