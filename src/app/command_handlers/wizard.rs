use crate::app::command_support::{split_flags, CommandContext};
use crate::tui::{
    is_interactive_terminal, load_scripted_keys, run_wizard_scripted, run_wizard_tui,
    WizardSession, SCRIPT_KEYS_ENV,
};
use crate::wizard::{WizardController, WizardLayout};

pub fn cmd_wizard(args: &[String]) -> Result<String, String> {
    let (positional, values) = split_flags(args, &["--layout"])?;
    if let Some(extra) = positional.first() {
        return Err(format!(
            "unexpected argument `{extra}`\nusage: wizard [--layout full|compact|minimal]"
        ));
    }
    let context = CommandContext::load()?;
    let layout = match &values[0] {
        Some(raw) => WizardLayout::parse(raw)?,
        None => context.settings.layout,
    };
    let catalog = context.catalog()?;
    let gateway = context.gateway()?;
    let mut session = WizardSession::new(WizardController::new(layout, catalog), gateway);

    context.log.info(
        "wizard.started",
        &format!(
            "layout={} catalog={}",
            layout.as_str(),
            context.catalog_source()
        ),
    );
    if let Some(keys) = load_scripted_keys()? {
        run_wizard_scripted(&mut session, keys)?;
    } else if is_interactive_terminal() {
        run_wizard_tui(&mut session)?;
    } else {
        return Err(format!(
            "wizard needs an interactive terminal; set {SCRIPT_KEYS_ENV} for headless runs"
        ));
    }

    let saved = session.saved_count();
    let gateway = session.into_gateway();
    let total = gateway.load().map_err(|e| e.to_string())?.len();
    context.log.info(
        "wizard.finished",
        &format!("saved_this_session={saved} total_configurations={total}"),
    );
    Ok(format!(
        "wizard finished\nlayout={}\nsaved_this_session={saved}\nstore_backend={}\nstore_key={}\ntotal_configurations={total}",
        layout.as_str(),
        context.settings.store.backend.as_str(),
        gateway.key(),
    ))
}
