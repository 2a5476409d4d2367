//! Terminal front end for the wizard.

pub mod keys;
pub mod session;
pub mod view;
pub mod wizard;

pub use keys::{
    load_scripted_keys, parse_scripted_keys, wizard_action_from_key, InputMode, WizardAction,
    SCRIPT_KEYS_ENV,
};
pub use session::{clamp_selection, facets_for, Facet, SessionEffect, WizardSession};
pub use view::{ItemView, PaneView, WizardViewModel};
pub use wizard::{draw_wizard_ui, is_interactive_terminal, run_wizard_scripted, run_wizard_tui};
