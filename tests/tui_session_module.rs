use orgmap::catalog::Catalog;
use orgmap::persistence::{ConfigurationGateway, MemoryStore, DEFAULT_STORE_KEY};
use orgmap::shared::logging::EventLog;
use orgmap::tui::{
    parse_scripted_keys, run_wizard_scripted, Facet, InputMode, SessionEffect, WizardAction,
    WizardSession,
};
use orgmap::wizard::{Severity, WizardController, WizardLayout, WizardStep};

fn session(layout: WizardLayout) -> WizardSession<MemoryStore> {
    let gateway =
        ConfigurationGateway::new(MemoryStore::new(), DEFAULT_STORE_KEY, EventLog::disabled())
            .expect("gateway");
    WizardSession::new(WizardController::new(layout, Catalog::builtin()), gateway)
}

fn apply_all(session: &mut WizardSession<MemoryStore>, actions: &[WizardAction]) {
    for action in actions {
        assert_eq!(session.apply(*action), SessionEffect::Continue);
    }
}

#[test]
fn tui_session_full_layout_script_saves_one_configuration() {
    let mut session = session(WizardLayout::Full);
    let keys = parse_scripted_keys("space,enter,space,enter,space,enter,space,enter,enter,q")
        .expect("keys");
    run_wizard_scripted(&mut session, keys).expect("scripted run");

    assert_eq!(session.saved_count(), 1);
    assert_eq!(session.controller().active_step(), 0);
    assert_eq!(
        session.status().map(|n| n.message.as_str()),
        Some("Configuration saved successfully!")
    );
    let saved = session.gateway().load().expect("load");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].organization, "Acme");
    let project = saved[0].projects.get("PROJ1").expect("PROJ1");
    assert_eq!(project.teams, vec!["Platform"]);
    assert_eq!(
        project.members.get("Platform"),
        Some(&vec!["Alice (NYC)".to_string()])
    );
}

#[test]
fn tui_session_script_without_quit_is_an_error() {
    let mut session = session(WizardLayout::Full);
    let keys = parse_scripted_keys("space,enter").expect("keys");
    let err = run_wizard_scripted(&mut session, keys).expect_err("no quit");
    assert!(err.contains("did not terminate"), "{err}");
}

#[test]
fn tui_session_rejected_next_surfaces_warning() {
    let mut session = session(WizardLayout::Full);
    apply_all(&mut session, &[WizardAction::Next]);
    assert_eq!(session.controller().active_step(), 0);
    let status = session.status().expect("status");
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.message, "Please select an organization");
}

#[test]
fn tui_session_search_filters_focused_list() {
    let mut session = session(WizardLayout::Full);
    apply_all(
        &mut session,
        &[
            WizardAction::StartSearch,
            WizardAction::Input('g'),
            WizardAction::Input('l'),
            WizardAction::Submit,
        ],
    );
    assert_eq!(session.mode(), InputMode::Browse);
    let view = session.view_model();
    let labels: Vec<_> = view.panes[0].items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Globex"]);
    assert_eq!(view.search.as_deref(), Some("gl"));

    apply_all(&mut session, &[WizardAction::Toggle, WizardAction::Next]);
    assert_eq!(session.controller().selection().organization(), Some("Globex"));
    assert_eq!(session.controller().current_step(), WizardStep::Projects);
    assert_eq!(session.search(), "");
}

#[test]
fn tui_session_dialog_adds_organization() {
    let mut session = session(WizardLayout::Full);
    apply_all(
        &mut session,
        &[WizardAction::AddOrganization, WizardAction::Submit],
    );
    assert_eq!(session.mode(), InputMode::Dialog);
    assert!(session.view_model().dialog.is_some());

    let mut actions = vec![];
    actions.extend("Umbrella".chars().map(WizardAction::Input));
    actions.push(WizardAction::Submit);
    apply_all(&mut session, &actions);

    assert_eq!(session.mode(), InputMode::Browse);
    assert_eq!(
        session.controller().selection().organization(),
        Some("Umbrella")
    );
    assert_eq!(session.status().map(|n| n.severity), Some(Severity::Success));
    assert!(session.view_model().dialog.is_none());
}

#[test]
fn tui_session_compact_layout_uses_two_panes_and_select_all() {
    let mut session = session(WizardLayout::Compact);
    apply_all(
        &mut session,
        &[
            WizardAction::Toggle,
            WizardAction::Next,
            WizardAction::Toggle,
            WizardAction::Next,
        ],
    );
    assert_eq!(
        session.controller().current_step(),
        WizardStep::TeamsAndMembers
    );
    assert_eq!(session.focused_facet(), Facet::Teams);

    apply_all(&mut session, &[WizardAction::Toggle, WizardAction::SelectAll]);
    assert_eq!(session.controller().active_team(), Some("Platform"));
    let view = session.view_model();
    assert_eq!(view.panes.len(), 2);
    assert_eq!(view.panes[1].title, "Members of Platform [all selected]");
    assert!(view.panes[1].items.iter().all(|i| i.checked == Some(true)));
    assert_eq!(view.tabs, vec!["PROJ1 (Payments Platform)"]);

    apply_all(&mut session, &[WizardAction::NextPane, WizardAction::Toggle]);
    assert_eq!(session.focused_facet(), Facet::Members);
    assert!(!session
        .controller()
        .is_all_selected("Platform", "PROJ1"));
}

#[test]
fn tui_session_review_lists_selection_status() {
    let mut session = session(WizardLayout::Minimal);
    apply_all(
        &mut session,
        &[
            WizardAction::Toggle,
            WizardAction::Next,
            WizardAction::Toggle,
            WizardAction::NextPane,
            WizardAction::Toggle,
            WizardAction::NextPane,
            WizardAction::Toggle,
            WizardAction::Next,
        ],
    );
    assert_eq!(session.controller().current_step(), WizardStep::Review);
    let view = session.view_model();
    let lines: Vec<String> = view.panes[0].items.iter().map(|i| i.render()).collect();
    assert_eq!(lines[0], "Organization: Acme");
    assert_eq!(lines[1], "PROJ1 (Payments Platform) [complete]");
    assert_eq!(lines[2], "  + Platform: Alice (NYC)");
    assert_eq!(view.title, "Step 3 of 3: Review");
}

#[test]
fn tui_session_quit_and_reset() {
    let mut session = session(WizardLayout::Full);
    apply_all(&mut session, &[WizardAction::Toggle, WizardAction::Next]);
    apply_all(&mut session, &[WizardAction::Reset]);
    assert_eq!(session.controller().active_step(), 0);
    assert!(session.controller().selection().is_empty());
    assert_eq!(session.status().map(|n| n.message.as_str()), Some("Wizard reset"));
    assert_eq!(session.apply(WizardAction::Quit), SessionEffect::Quit);
}
