use super::validation::step_issue;
use super::{Notice, ValidationIssue, WizardLayout, WizardStep};
use crate::catalog::Catalog;
use crate::persistence::{Configuration, ConfigurationGateway, KeyValueStore};
use crate::selection::{Selection, SelectionError, Toggle};
use crate::shared::clock::now_millis;
use crate::shared::ids::ConfigurationId;

const SAVED_MESSAGE: &str = "Configuration saved successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(WizardStep),
    Rejected(ValidationIssue),
    Saved(Configuration),
    SaveFailed(String),
}

/// Owns the step index, the selection being edited, UI focus (project tab and
/// active team) and the pending notice.
#[derive(Debug, Clone)]
pub struct WizardController {
    layout: WizardLayout,
    active_step: usize,
    catalog: Catalog,
    selection: Selection,
    project_tab: usize,
    active_team: Option<String>,
    organization_dialog_open: bool,
    notice: Option<Notice>,
}

impl WizardController {
    pub fn new(layout: WizardLayout, catalog: Catalog) -> Self {
        Self {
            layout,
            active_step: 0,
            catalog,
            selection: Selection::new(),
            project_tab: 0,
            active_team: None,
            organization_dialog_open: false,
            notice: None,
        }
    }

    pub fn layout(&self) -> WizardLayout {
        self.layout
    }

    pub fn steps(&self) -> &'static [WizardStep] {
        self.layout.steps()
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps()[self.active_step]
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step + 1 == self.layout.step_count()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn step_issue(&self, step: usize) -> Option<ValidationIssue> {
        let kind = self.steps().get(step)?;
        step_issue(*kind, &self.selection)
    }

    /// Out-of-range steps are never valid.
    pub fn is_step_valid(&self, step: usize) -> bool {
        step < self.layout.step_count() && self.step_issue(step).is_none()
    }

    fn first_blocking_issue(&self) -> Option<ValidationIssue> {
        (0..self.layout.step_count()).find_map(|step| self.step_issue(step))
    }

    /// Advances one step, or saves on the last step. A step that is not valid
    /// leaves the index unchanged and raises a warning notice.
    pub fn next<S: KeyValueStore>(&mut self, gateway: &mut ConfigurationGateway<S>) -> NextOutcome {
        if let Some(issue) = self.step_issue(self.active_step) {
            self.notice = Some(Notice::warning(issue.to_string()));
            return NextOutcome::Rejected(issue);
        }
        if !self.is_last_step() {
            self.active_step += 1;
            self.notice = None;
            return NextOutcome::Advanced(self.current_step());
        }
        self.save(gateway)
    }

    fn save<S: KeyValueStore>(&mut self, gateway: &mut ConfigurationGateway<S>) -> NextOutcome {
        if let Some(issue) = self.first_blocking_issue() {
            self.notice = Some(Notice::warning(issue.to_string()));
            return NextOutcome::Rejected(issue);
        }
        let timestamp = now_millis();
        let id = match ConfigurationId::generate(timestamp) {
            Ok(id) => id,
            Err(err) => {
                self.notice = Some(Notice::error(format!(
                    "Failed to save configuration: {err}"
                )));
                return NextOutcome::SaveFailed(err);
            }
        };
        let Some(config) = Configuration::from_selection(&self.selection, id, timestamp) else {
            self.notice = Some(Notice::warning(
                ValidationIssue::MissingOrganization.to_string(),
            ));
            return NextOutcome::Rejected(ValidationIssue::MissingOrganization);
        };
        match gateway.append(config.clone()) {
            Ok(_) => {
                self.reset();
                self.notice = Some(Notice::success(SAVED_MESSAGE));
                NextOutcome::Saved(config)
            }
            Err(err) => {
                self.notice = Some(Notice::error(format!(
                    "Failed to save configuration: {err}"
                )));
                NextOutcome::SaveFailed(err.to_string())
            }
        }
    }

    /// Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        if self.active_step == 0 {
            return false;
        }
        self.active_step -= 1;
        self.notice = None;
        true
    }

    pub fn reset(&mut self) {
        self.active_step = 0;
        self.selection.clear();
        self.project_tab = 0;
        self.active_team = None;
        self.organization_dialog_open = false;
        self.notice = None;
    }

    pub fn select_organization(&mut self, name: &str) -> bool {
        let changed = self.selection.select_organization(name);
        if changed {
            self.project_tab = 0;
            self.active_team = None;
        }
        changed
    }

    pub fn toggle_project(&mut self, key: &str) -> Toggle {
        let toggle = self.selection.toggle_project(key);
        self.reconcile_focus();
        toggle
    }

    /// Adding a team makes it the active team and moves the project tab to
    /// its project. Removing the active team clears the focus.
    pub fn toggle_team(&mut self, team: &str, project: &str) -> Result<Toggle, SelectionError> {
        let toggle = self.selection.toggle_team(team, project)?;
        match toggle {
            Toggle::Added => {
                if let Some(idx) = self
                    .selection
                    .projects()
                    .iter()
                    .position(|node| node.key() == project)
                {
                    self.project_tab = idx;
                }
                self.active_team = Some(team.to_string());
            }
            Toggle::Removed => self.reconcile_focus(),
        }
        Ok(toggle)
    }

    pub fn toggle_member(
        &mut self,
        member: &str,
        team: &str,
        project: &str,
    ) -> Result<Toggle, SelectionError> {
        self.selection.toggle_member(member, team, project)
    }

    pub fn toggle_select_all(&mut self, team: &str, project: &str) -> Result<Toggle, SelectionError> {
        let roster = self.catalog.roster_of(team);
        self.selection.toggle_select_all(team, project, &roster)
    }

    pub fn is_all_selected(&self, team: &str, project: &str) -> bool {
        self.selection
            .is_all_selected(team, project, &self.catalog.roster_of(team))
    }

    pub fn is_project_complete(&self, project: &str) -> bool {
        self.selection.project(project).is_some_and(|node| {
            !node.teams().is_empty() && node.teams().iter().all(|t| !t.members().is_empty())
        })
    }

    pub fn is_team_complete(&self, project: &str, team: &str) -> bool {
        !self.selection.members_of(project, team).is_empty()
    }

    pub fn project_tab(&self) -> usize {
        self.project_tab
    }

    pub fn current_project(&self) -> Option<&str> {
        self.selection
            .projects()
            .get(self.project_tab)
            .map(|node| node.key())
    }

    pub fn select_project_tab(&mut self, idx: usize) -> bool {
        if idx >= self.selection.projects().len() {
            return false;
        }
        if idx != self.project_tab {
            self.project_tab = idx;
            self.active_team = None;
        }
        true
    }

    pub fn next_project_tab(&mut self) -> bool {
        let len = self.selection.projects().len();
        if len == 0 {
            return false;
        }
        self.select_project_tab((self.project_tab + 1) % len)
    }

    pub fn prev_project_tab(&mut self) -> bool {
        let len = self.selection.projects().len();
        if len == 0 {
            return false;
        }
        self.select_project_tab((self.project_tab + len - 1) % len)
    }

    pub fn active_team(&self) -> Option<&str> {
        self.active_team.as_deref()
    }

    /// Makes `team` active under the current project, selecting it first when
    /// needed.
    pub fn focus_team(&mut self, team: &str) -> Result<(), SelectionError> {
        let Some(project) = self.current_project().map(str::to_string) else {
            return Err(SelectionError::ProjectNotSelected {
                project: String::new(),
            });
        };
        if self.selection.contains_team(team, &project) {
            self.active_team = Some(team.to_string());
        } else {
            self.toggle_team(team, &project)?;
        }
        Ok(())
    }

    /// Moves the active team to the next selected team of the current project.
    pub fn cycle_active_team(&mut self) -> bool {
        let Some(project) = self.current_project() else {
            return false;
        };
        let teams = self.selection.teams_of(project);
        if teams.is_empty() {
            return false;
        }
        let next = match self
            .active_team
            .as_deref()
            .and_then(|active| teams.iter().position(|team| *team == active))
        {
            Some(idx) => teams[(idx + 1) % teams.len()],
            None => teams[0],
        };
        self.active_team = Some(next.to_string());
        true
    }

    /// Keeps the project tab in range and drops an active team that is no
    /// longer selected under the current project.
    pub fn reconcile_focus(&mut self) {
        if self.project_tab >= self.selection.projects().len() {
            self.project_tab = 0;
        }
        let still_selected = match (self.current_project(), self.active_team.as_deref()) {
            (Some(project), Some(team)) => self.selection.contains_team(team, project),
            _ => false,
        };
        if !still_selected {
            self.active_team = None;
        }
    }

    pub fn open_organization_dialog(&mut self) {
        self.organization_dialog_open = true;
    }

    pub fn close_organization_dialog(&mut self) {
        self.organization_dialog_open = false;
    }

    pub fn is_organization_dialog_open(&self) -> bool {
        self.organization_dialog_open
    }

    /// Adds `name` to the catalog snapshot and selects it. A blank name is a
    /// no-op that leaves the dialog open.
    pub fn submit_organization(&mut self, name: &str) -> bool {
        let Ok(catalog) = self.catalog.with_organization(name) else {
            return false;
        };
        let name = name.trim();
        self.catalog = catalog;
        self.select_organization(name);
        self.organization_dialog_open = false;
        self.notice = Some(Notice::success(format!(
            "Organization \"{name}\" has been added successfully"
        )));
        true
    }
}
