use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "ORGMAP_WIZARD_SCRIPT_KEYS";

/// What keystrokes mean right now: list navigation, typing into the search
/// box, or typing into the new-organization dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    MovePrev,
    MoveNext,
    Toggle,
    Next,
    Back,
    PrevTab,
    NextTab,
    NextPane,
    CycleTeam,
    SelectAll,
    AddOrganization,
    StartSearch,
    Reset,
    Quit,
    Input(char),
    Erase,
    Submit,
    Dismiss,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::MovePrev => "move_prev",
            WizardAction::MoveNext => "move_next",
            WizardAction::Toggle => "toggle",
            WizardAction::Next => "next",
            WizardAction::Back => "back",
            WizardAction::PrevTab => "prev_tab",
            WizardAction::NextTab => "next_tab",
            WizardAction::NextPane => "next_pane",
            WizardAction::CycleTeam => "cycle_team",
            WizardAction::SelectAll => "select_all",
            WizardAction::AddOrganization => "add_organization",
            WizardAction::StartSearch => "start_search",
            WizardAction::Reset => "reset",
            WizardAction::Quit => "quit",
            WizardAction::Input(_) => "input",
            WizardAction::Erase => "erase",
            WizardAction::Submit => "submit",
            WizardAction::Dismiss => "dismiss",
        }
    }
}

pub fn wizard_action_from_key(mode: InputMode, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(WizardAction::Quit);
    }
    match mode {
        InputMode::Browse => browse_action(key),
        InputMode::Search => match key.code {
            KeyCode::Up => Some(WizardAction::MovePrev),
            KeyCode::Down => Some(WizardAction::MoveNext),
            _ => text_entry_action(key),
        },
        InputMode::Dialog => text_entry_action(key),
    }
}

fn browse_action(key: KeyEvent) -> Option<WizardAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(WizardAction::MovePrev),
        KeyCode::Down | KeyCode::Char('j') => Some(WizardAction::MoveNext),
        KeyCode::Left => Some(WizardAction::PrevTab),
        KeyCode::Right => Some(WizardAction::NextTab),
        KeyCode::Char(' ') => Some(WizardAction::Toggle),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(WizardAction::Next),
        KeyCode::Esc | KeyCode::Backspace => Some(WizardAction::Back),
        KeyCode::Tab => Some(WizardAction::NextPane),
        KeyCode::Char('t') => Some(WizardAction::CycleTeam),
        KeyCode::Char('A') => Some(WizardAction::SelectAll),
        KeyCode::Char('a') => Some(WizardAction::AddOrganization),
        KeyCode::Char('/') => Some(WizardAction::StartSearch),
        KeyCode::Char('r') => Some(WizardAction::Reset),
        KeyCode::Char('q') => Some(WizardAction::Quit),
        _ => None,
    }
}

fn text_entry_action(key: KeyEvent) -> Option<WizardAction> {
    match key.code {
        KeyCode::Esc => Some(WizardAction::Dismiss),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(WizardAction::Submit),
        KeyCode::Backspace => Some(WizardAction::Erase),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(WizardAction::Input(ch))
        }
        _ => None,
    }
}

/// Parses a comma-separated key script. Named keys are case-insensitive,
/// any other single character is sent as typed, and `text:<chars>` sends each
/// character in turn.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        if let Some(text) = token.trim_start().strip_prefix("text:") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let key = match token.to_ascii_lowercase().as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "space" => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE),
                    _ => {
                        return Err(format!(
                            "invalid {SCRIPT_KEYS_ENV} token `{token}`; valid tokens: up,down,left,right,enter,esc,space,tab,backspace,ctrl-c, a single character, or text:<chars>"
                        ))
                    }
                }
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

/// Keys from [`SCRIPT_KEYS_ENV`], or `None` when the variable is unset.
pub fn load_scripted_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}
