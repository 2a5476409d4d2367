use super::keys::{InputMode, WizardAction};
use super::view::{ItemView, PaneView, WizardViewModel};
use crate::catalog::filter;
use crate::persistence::{ConfigurationGateway, KeyValueStore};
use crate::wizard::{NextOutcome, Notice, Severity, WizardController, WizardStep};

/// One list shown on a wizard page. Combined steps show several side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Organizations,
    Projects,
    Teams,
    Members,
    Review,
}

pub fn facets_for(step: WizardStep) -> &'static [Facet] {
    match step {
        WizardStep::Organization => &[Facet::Organizations],
        WizardStep::Projects => &[Facet::Projects],
        WizardStep::Teams => &[Facet::Teams],
        WizardStep::Members => &[Facet::Members],
        WizardStep::TeamsAndMembers => &[Facet::Teams, Facet::Members],
        WizardStep::ProjectsAndTeams => &[Facet::Projects, Facet::Teams, Facet::Members],
        WizardStep::Review => &[Facet::Review],
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Organization(String),
    Project(String),
    Team(String),
    Member(String),
    Info,
}

/// Headless wizard: applies [`WizardAction`]s to the controller and keeps the
/// view state (mode, focused pane, cursor, search text) the renderer draws.
pub struct WizardSession<S> {
    controller: WizardController,
    gateway: ConfigurationGateway<S>,
    mode: InputMode,
    pane: usize,
    cursor: usize,
    search: String,
    dialog_input: String,
    status: Option<Notice>,
    saved: usize,
}

impl<S: KeyValueStore> WizardSession<S> {
    pub fn new(controller: WizardController, gateway: ConfigurationGateway<S>) -> Self {
        Self {
            controller,
            gateway,
            mode: InputMode::Browse,
            pane: 0,
            cursor: 0,
            search: String::new(),
            dialog_input: String::new(),
            status: None,
            saved: 0,
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn gateway(&self) -> &ConfigurationGateway<S> {
        &self.gateway
    }

    pub fn into_gateway(self) -> ConfigurationGateway<S> {
        self.gateway
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    /// Configurations saved since the session started.
    pub fn saved_count(&self) -> usize {
        self.saved
    }

    fn facets(&self) -> &'static [Facet] {
        facets_for(self.controller.current_step())
    }

    pub fn focused_facet(&self) -> Facet {
        let facets = self.facets();
        facets[clamp_selection(self.pane, facets.len())]
    }

    fn shows(&self, facet: Facet) -> bool {
        self.facets().contains(&facet)
    }

    pub fn apply(&mut self, action: WizardAction) -> SessionEffect {
        if action == WizardAction::Quit {
            return SessionEffect::Quit;
        }
        let step_before = self.controller.active_step();
        match self.mode {
            InputMode::Dialog => self.apply_dialog(action),
            InputMode::Search => self.apply_search(action),
            InputMode::Browse => self.apply_browse(action),
        }
        if self.controller.active_step() != step_before {
            self.reset_view();
            if action != WizardAction::Reset {
                self.status = None;
            }
        }
        self.reconcile();
        SessionEffect::Continue
    }

    fn apply_dialog(&mut self, action: WizardAction) {
        match action {
            WizardAction::Input(ch) => self.dialog_input.push(ch),
            WizardAction::Erase => {
                self.dialog_input.pop();
            }
            WizardAction::Submit => {
                if self.controller.submit_organization(&self.dialog_input) {
                    self.dialog_input.clear();
                    self.mode = InputMode::Browse;
                }
            }
            WizardAction::Dismiss => {
                self.controller.close_organization_dialog();
                self.dialog_input.clear();
                self.mode = InputMode::Browse;
            }
            _ => {}
        }
    }

    fn apply_search(&mut self, action: WizardAction) {
        match action {
            WizardAction::Input(ch) => {
                self.search.push(ch);
                self.cursor = 0;
            }
            WizardAction::Erase => {
                self.search.pop();
                self.cursor = 0;
            }
            WizardAction::MovePrev => self.cursor = self.cursor.saturating_sub(1),
            WizardAction::MoveNext => self.cursor += 1,
            WizardAction::Submit => self.mode = InputMode::Browse,
            WizardAction::Dismiss => {
                self.search.clear();
                self.cursor = 0;
                self.mode = InputMode::Browse;
            }
            _ => {}
        }
    }

    fn apply_browse(&mut self, action: WizardAction) {
        match action {
            WizardAction::MovePrev => self.cursor = self.cursor.saturating_sub(1),
            WizardAction::MoveNext => self.cursor += 1,
            WizardAction::Toggle => self.toggle_under_cursor(),
            WizardAction::Next => {
                if let NextOutcome::Saved(_) = self.controller.next(&mut self.gateway) {
                    self.saved += 1;
                }
            }
            WizardAction::Back => {
                self.controller.back();
            }
            WizardAction::PrevTab => {
                if self.controller.prev_project_tab() {
                    self.reset_cursor_on_tab_change();
                }
            }
            WizardAction::NextTab => {
                if self.controller.next_project_tab() {
                    self.reset_cursor_on_tab_change();
                }
            }
            WizardAction::NextPane => {
                self.pane = (self.pane + 1) % self.facets().len();
                self.cursor = 0;
                self.search.clear();
            }
            WizardAction::CycleTeam => {
                if self.shows(Facet::Members) && self.controller.cycle_active_team() {
                    self.reset_cursor_for(Facet::Members);
                }
            }
            WizardAction::SelectAll => self.select_all(),
            WizardAction::AddOrganization => {
                if self.focused_facet() == Facet::Organizations {
                    self.controller.open_organization_dialog();
                    self.dialog_input.clear();
                    self.mode = InputMode::Dialog;
                }
            }
            WizardAction::StartSearch => {
                if self.focused_facet() != Facet::Review {
                    self.mode = InputMode::Search;
                }
            }
            WizardAction::Reset => {
                self.controller.reset();
                self.reset_view();
                self.status = Some(Notice::new(Severity::Info, "Wizard reset"));
            }
            WizardAction::Quit
            | WizardAction::Input(_)
            | WizardAction::Erase
            | WizardAction::Submit
            | WizardAction::Dismiss => {}
        }
    }

    fn reset_cursor_on_tab_change(&mut self) {
        if matches!(self.focused_facet(), Facet::Teams | Facet::Members) {
            self.cursor = 0;
        }
    }

    fn reset_cursor_for(&mut self, facet: Facet) {
        if self.focused_facet() == facet {
            self.cursor = 0;
        }
    }

    fn select_all(&mut self) {
        if !self.shows(Facet::Members) {
            return;
        }
        let (Some(project), Some(team)) = (
            self.controller.current_project().map(str::to_string),
            self.controller.active_team().map(str::to_string),
        ) else {
            return;
        };
        if let Err(err) = self.controller.toggle_select_all(&team, &project) {
            self.status = Some(Notice::error(err.to_string()));
        }
    }

    fn toggle_under_cursor(&mut self) {
        let rows = self.rows(self.focused_facet());
        let Some((row, _)) = rows.into_iter().nth(self.cursor) else {
            return;
        };
        let project = self.controller.current_project().map(str::to_string);
        let active_team = self.controller.active_team().map(str::to_string);
        let result = match (row, project) {
            (Row::Organization(name), _) => {
                self.controller.select_organization(&name);
                Ok(())
            }
            (Row::Project(key), _) => {
                self.controller.toggle_project(&key);
                Ok(())
            }
            (Row::Team(team), Some(project)) => {
                self.controller.toggle_team(&team, &project).map(|_| ())
            }
            (Row::Member(member), Some(project)) => match active_team {
                Some(team) => self
                    .controller
                    .toggle_member(&member, &team, &project)
                    .map(|_| ()),
                None => Ok(()),
            },
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.status = Some(Notice::error(err.to_string()));
        }
    }

    fn reset_view(&mut self) {
        self.mode = InputMode::Browse;
        self.pane = 0;
        self.cursor = 0;
        self.search.clear();
        self.dialog_input.clear();
    }

    /// Runs after every action: picks an active team where a member list is
    /// shown, clamps the cursor, and moves a fresh controller notice into the
    /// status line.
    fn reconcile(&mut self) {
        self.controller.reconcile_focus();
        if self.shows(Facet::Members) && self.controller.active_team().is_none() {
            self.controller.cycle_active_team();
        }
        self.pane = clamp_selection(self.pane, self.facets().len());
        let len = self.rows(self.focused_facet()).len();
        self.cursor = clamp_selection(self.cursor, len);
        if self.mode == InputMode::Dialog && !self.controller.is_organization_dialog_open() {
            self.mode = InputMode::Browse;
        }
        if let Some(notice) = self.controller.take_notice() {
            self.status = Some(notice);
        }
    }

    fn needle(&self, facet: Facet) -> &str {
        if facet == self.focused_facet() {
            &self.search
        } else {
            ""
        }
    }

    fn rows(&self, facet: Facet) -> Vec<(Row, ItemView)> {
        let catalog = self.controller.catalog();
        let selection = self.controller.selection();
        let needle = self.needle(facet);
        match facet {
            Facet::Organizations => filter(&catalog.list_organizations(), needle)
                .into_iter()
                .map(|org| {
                    let checked = selection.organization() == Some(org.as_str());
                    let view = ItemView::toggle(org.clone(), checked);
                    (Row::Organization(org), view)
                })
                .collect(),
            Facet::Projects => {
                let keys = catalog.list_projects();
                let labels: Vec<String> = keys.iter().map(|k| catalog.project_label(k)).collect();
                let shown = filter(&labels, needle);
                keys.into_iter()
                    .zip(labels)
                    .filter(|(_, label)| shown.contains(label))
                    .map(|(key, label)| {
                        let view = ItemView::toggle(label, selection.contains_project(&key));
                        (Row::Project(key), view)
                    })
                    .collect()
            }
            Facet::Teams => {
                let Some(project) = self.controller.current_project() else {
                    return Vec::new();
                };
                filter(&catalog.list_teams(), needle)
                    .into_iter()
                    .map(|team| {
                        let checked = selection.contains_team(&team, project);
                        let mut view = ItemView::toggle(team.clone(), checked);
                        if checked {
                            let count = selection.members_of(project, &team).len();
                            let active = self.controller.active_team() == Some(team.as_str());
                            view = view.with_detail(if active {
                                format!("({count} selected, active)")
                            } else {
                                format!("({count} selected)")
                            });
                        }
                        (Row::Team(team), view)
                    })
                    .collect()
            }
            Facet::Members => {
                let (Some(project), Some(team)) =
                    (self.controller.current_project(), self.controller.active_team())
                else {
                    return Vec::new();
                };
                let members = selection.members_of(project, team);
                filter(&catalog.roster_of(team), needle)
                    .into_iter()
                    .map(|member| {
                        let view = ItemView::toggle(member.clone(), members.contains(&member));
                        (Row::Member(member), view)
                    })
                    .collect()
            }
            Facet::Review => self.review_lines(),
        }
    }

    fn review_lines(&self) -> Vec<(Row, ItemView)> {
        let catalog = self.controller.catalog();
        let selection = self.controller.selection();
        let mut lines = vec![ItemView::info(format!(
            "Organization: {}",
            selection.organization().unwrap_or("(none)")
        ))];
        for project in selection.projects() {
            let status = if self.controller.is_project_complete(project.key()) {
                "complete"
            } else {
                "incomplete"
            };
            lines.push(
                ItemView::info(catalog.project_label(project.key()))
                    .with_detail(format!("[{status}]")),
            );
            for team in project.teams() {
                let members = if team.members().is_empty() {
                    "(no members)".to_string()
                } else {
                    team.members().join(", ")
                };
                let mark = if self.controller.is_team_complete(project.key(), team.name()) {
                    "+"
                } else {
                    "!"
                };
                lines.push(ItemView::info(format!(
                    "  {mark} {}: {members}",
                    team.name()
                )));
            }
        }
        lines.into_iter().map(|view| (Row::Info, view)).collect()
    }

    fn pane_title(&self, facet: Facet) -> String {
        let project = self
            .controller
            .current_project()
            .map(|key| self.controller.catalog().project_label(key));
        match facet {
            Facet::Organizations => "Select Organization".to_string(),
            Facet::Projects => "Select Projects".to_string(),
            Facet::Teams => match project {
                Some(label) => format!("Teams for {label}"),
                None => "Teams".to_string(),
            },
            Facet::Members => match (self.controller.current_project(), self.controller.active_team()) {
                (Some(project), Some(team)) => {
                    if self.controller.is_all_selected(team, project) {
                        format!("Members of {team} [all selected]")
                    } else {
                        format!("Members of {team}")
                    }
                }
                _ => "Members".to_string(),
            },
            Facet::Review => "Review".to_string(),
        }
    }

    fn placeholder(&self, facet: Facet) -> Option<String> {
        let text = match facet {
            Facet::Organizations => "No organizations match",
            Facet::Projects => "No projects match",
            Facet::Teams if self.controller.current_project().is_none() => {
                "Select a project first"
            }
            Facet::Teams => "No teams match",
            Facet::Members if self.controller.active_team().is_none() => "Select a team first",
            Facet::Members => "No members listed for this team",
            Facet::Review => "Nothing selected",
        };
        Some(text.to_string())
    }

    fn hint(&self) -> String {
        match self.mode {
            InputMode::Search => "Type to filter | Up/Down move | Enter keep | Esc clear".to_string(),
            InputMode::Dialog => "Type a name | Enter add | Esc cancel".to_string(),
            InputMode::Browse => {
                let mut parts = vec!["Up/Down move", "Space toggle", "Enter next", "Esc back"];
                if self.facets().len() > 1 {
                    parts.push("Tab pane");
                }
                match self.focused_facet() {
                    Facet::Organizations => parts.push("a add organization"),
                    Facet::Review => parts.push("Enter saves"),
                    _ => {}
                }
                if self.shows(Facet::Teams) || self.shows(Facet::Members) {
                    parts.push("Left/Right project");
                }
                if self.shows(Facet::Members) {
                    parts.push("t next team");
                    parts.push("A select all");
                }
                parts.extend(["/ search", "r reset", "q quit"]);
                parts.join(" | ")
            }
        }
    }

    fn chips(&self) -> Vec<String> {
        let catalog = self.controller.catalog();
        let selection = self.controller.selection();
        let mut chips = Vec::new();
        if let Some(org) = selection.organization() {
            chips.push(format!("Organization: {org}"));
        }
        let projects = selection.selected_projects();
        if !projects.is_empty() {
            chips.push(format!("Projects: {}", projects.join(", ")));
        }
        if let Some(project) = self.controller.current_project() {
            let teams = selection.teams_of(project);
            if !teams.is_empty() {
                chips.push(format!("Teams ({project}): {}", teams.join(", ")));
            }
            if let Some(team) = self.controller.active_team() {
                chips.push(format!(
                    "Active team: {team} ({}/{})",
                    selection.members_of(project, team).len(),
                    catalog.roster_of(team).len()
                ));
            }
        }
        chips
    }

    pub fn view_model(&self) -> WizardViewModel {
        let steps = self.controller.steps();
        let active = self.controller.active_step();
        let step = self.controller.current_step();
        let step_line = steps
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                if idx == active {
                    format!("[{}]", s.title())
                } else if idx < active {
                    format!("{} +", s.title())
                } else {
                    s.title().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" > ");

        let (tabs, active_tab) = if self.shows(Facet::Teams) || self.shows(Facet::Members) {
            let tabs: Vec<String> = self
                .controller
                .selection()
                .projects()
                .iter()
                .map(|p| self.controller.catalog().project_label(p.key()))
                .collect();
            let active_tab = (!tabs.is_empty()).then(|| self.controller.project_tab());
            (tabs, active_tab)
        } else {
            (Vec::new(), None)
        };

        let focused = self.focused_facet();
        let panes = self
            .facets()
            .iter()
            .map(|facet| {
                let is_focused = *facet == focused;
                PaneView {
                    title: self.pane_title(*facet),
                    items: self.rows(*facet).into_iter().map(|(_, view)| view).collect(),
                    cursor: if is_focused { self.cursor } else { 0 },
                    focused: is_focused,
                    placeholder: self.placeholder(*facet),
                }
            })
            .collect();

        WizardViewModel {
            title: format!(
                "Step {} of {}: {}",
                active + 1,
                steps.len(),
                step.title()
            ),
            step_line,
            tabs,
            active_tab,
            chips: self.chips(),
            panes,
            search: (self.mode == InputMode::Search || !self.search.is_empty())
                .then(|| self.search.clone()),
            dialog: self
                .controller
                .is_organization_dialog_open()
                .then(|| self.dialog_input.clone()),
            status: self.status.clone(),
            hint: self.hint(),
        }
    }
}
