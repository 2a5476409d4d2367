use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use orgmap::tui::{parse_scripted_keys, wizard_action_from_key, InputMode, WizardAction};

#[test]
fn tui_keys_parse_named_tokens_characters_and_text() {
    let keys = parse_scripted_keys("down, Space,enter,A,text:Ab c,ctrl-c").expect("parse");
    assert_eq!(
        keys,
        vec![
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ]
    );
}

#[test]
fn tui_keys_reject_unknown_tokens() {
    let err = parse_scripted_keys("down,jump").expect_err("unknown token");
    assert!(err.contains("`jump`"), "{err}");
    assert!(parse_scripted_keys(" , ,").expect("blank").is_empty());
}

#[test]
fn tui_keys_map_script_to_browse_actions() {
    let keys = parse_scripted_keys("up,down,left,right,space,enter,esc,tab,t,A,a,/,r,q")
        .expect("parse");
    let actions: Vec<_> = keys
        .into_iter()
        .map(|key| wizard_action_from_key(InputMode::Browse, key))
        .collect();
    assert_eq!(
        actions,
        vec![
            Some(WizardAction::MovePrev),
            Some(WizardAction::MoveNext),
            Some(WizardAction::PrevTab),
            Some(WizardAction::NextTab),
            Some(WizardAction::Toggle),
            Some(WizardAction::Next),
            Some(WizardAction::Back),
            Some(WizardAction::NextPane),
            Some(WizardAction::CycleTeam),
            Some(WizardAction::SelectAll),
            Some(WizardAction::AddOrganization),
            Some(WizardAction::StartSearch),
            Some(WizardAction::Reset),
            Some(WizardAction::Quit),
        ]
    );
}

#[test]
fn tui_keys_search_mode_keeps_arrow_navigation() {
    let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(
        wizard_action_from_key(InputMode::Search, up),
        Some(WizardAction::MovePrev)
    );
    assert_eq!(wizard_action_from_key(InputMode::Dialog, up), None);
    assert_eq!(
        wizard_action_from_key(
            InputMode::Search,
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
        ),
        Some(WizardAction::Erase)
    );
}
