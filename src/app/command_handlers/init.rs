use crate::app::command_support::{ensure_state_root, map_config_err, split_flags};
use crate::config::{load_settings_from, save_settings_to, StoreBackend};
use crate::shared::fs_atomic::canonicalize_existing;
use crate::shared::logging::EventLog;
use crate::wizard::WizardLayout;
use std::path::PathBuf;

pub fn cmd_init(args: &[String]) -> Result<String, String> {
    let (positional, values) = split_flags(args, &["--layout", "--backend", "--catalog"])?;
    if let Some(extra) = positional.first() {
        return Err(format!(
            "unexpected argument `{extra}`\nusage: init [--layout <l>] [--backend <b>] [--catalog <path>]"
        ));
    }

    let paths = ensure_state_root()?;
    let settings_path = paths.settings_file();
    let existed = settings_path.exists();
    let mut settings = load_settings_from(&settings_path).map_err(map_config_err)?;
    if let Some(layout) = &values[0] {
        settings.layout = WizardLayout::parse(layout)?;
    }
    if let Some(backend) = &values[1] {
        settings.store.backend = StoreBackend::parse(backend)?;
    }
    if let Some(catalog) = &values[2] {
        let path = canonicalize_existing(&PathBuf::from(catalog))
            .map_err(|e| format!("failed to resolve catalog {catalog}: {e}"))?;
        settings.catalog_path = Some(path);
    }
    save_settings_to(&settings_path, &settings).map_err(map_config_err)?;
    EventLog::new(paths.log_path()).info(
        "config.saved",
        &format!("wrote {}", settings_path.display()),
    );

    Ok(format!(
        "{}\nconfig={}\nstate_root={}\nlayout={}\nstore_backend={}\nstore_key={}\ncatalog={}",
        if existed { "config updated" } else { "init complete" },
        settings_path.display(),
        paths.root.display(),
        settings.layout.as_str(),
        settings.store.backend.as_str(),
        settings.store.key,
        settings
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string())
    ))
}
