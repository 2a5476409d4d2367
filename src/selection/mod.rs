//! Hierarchical wizard selection: organization → projects → teams → members.
//!
//! The selection is stored as a tree, so removing a node drops its whole
//! subtree in one step and no (project, team) or member entry can outlive its
//! parent.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("project `{project}` is not selected")]
    ProjectNotSelected { project: String },
    #[error("team `{team}` is not selected for project `{project}`")]
    TeamNotSelected { project: String, team: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamNode {
    name: String,
    members: Vec<String>,
}

impl TeamNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    key: String,
    teams: Vec<TeamNode>,
}

impl ProjectNode {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            teams: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn teams(&self) -> &[TeamNode] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&TeamNode> {
        self.teams.iter().find(|team| team.name == name)
    }

    fn team_mut(&mut self, name: &str) -> Option<&mut TeamNode> {
        self.teams.iter_mut().find(|team| team.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    organization: Option<String>,
    projects: Vec<ProjectNode>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.organization.is_none() && self.projects.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Replaces the organization and drops every project beneath it.
    /// Returns `false` when `name` is already the selected organization.
    pub fn select_organization(&mut self, name: &str) -> bool {
        if self.organization.as_deref() == Some(name) {
            return false;
        }
        self.organization = Some(name.to_string());
        self.projects.clear();
        true
    }

    pub fn clear_organization(&mut self) {
        self.clear();
    }

    pub fn projects(&self) -> &[ProjectNode] {
        &self.projects
    }

    pub fn project(&self, key: &str) -> Option<&ProjectNode> {
        self.projects.iter().find(|project| project.key == key)
    }

    fn project_mut(&mut self, key: &str) -> Option<&mut ProjectNode> {
        self.projects.iter_mut().find(|project| project.key == key)
    }

    pub fn selected_projects(&self) -> Vec<&str> {
        self.projects.iter().map(ProjectNode::key).collect()
    }

    pub fn contains_project(&self, key: &str) -> bool {
        self.project(key).is_some()
    }

    pub fn toggle_project(&mut self, key: &str) -> Toggle {
        if let Some(idx) = self.projects.iter().position(|project| project.key == key) {
            self.projects.remove(idx);
            Toggle::Removed
        } else {
            self.projects.push(ProjectNode::new(key));
            Toggle::Added
        }
    }

    pub fn teams_of(&self, project: &str) -> Vec<&str> {
        self.project(project)
            .map(|node| node.teams.iter().map(TeamNode::name).collect())
            .unwrap_or_default()
    }

    pub fn contains_team(&self, team: &str, project: &str) -> bool {
        self.project(project)
            .and_then(|node| node.team(team))
            .is_some()
    }

    pub fn toggle_team(&mut self, team: &str, project: &str) -> Result<Toggle, SelectionError> {
        let node = self
            .project_mut(project)
            .ok_or_else(|| SelectionError::ProjectNotSelected {
                project: project.to_string(),
            })?;
        if let Some(idx) = node.teams.iter().position(|t| t.name == team) {
            node.teams.remove(idx);
            Ok(Toggle::Removed)
        } else {
            node.teams.push(TeamNode::new(team));
            Ok(Toggle::Added)
        }
    }

    pub fn members_of(&self, project: &str, team: &str) -> &[String] {
        self.project(project)
            .and_then(|node| node.team(team))
            .map(TeamNode::members)
            .unwrap_or(&[])
    }

    fn team_node_mut(&mut self, team: &str, project: &str) -> Result<&mut TeamNode, SelectionError> {
        let node = self
            .project_mut(project)
            .ok_or_else(|| SelectionError::ProjectNotSelected {
                project: project.to_string(),
            })?;
        node.team_mut(team)
            .ok_or_else(|| SelectionError::TeamNotSelected {
                project: project.to_string(),
                team: team.to_string(),
            })
    }

    pub fn toggle_member(
        &mut self,
        member: &str,
        team: &str,
        project: &str,
    ) -> Result<Toggle, SelectionError> {
        let node = self.team_node_mut(team, project)?;
        if let Some(idx) = node.members.iter().position(|m| m == member) {
            node.members.remove(idx);
            Ok(Toggle::Removed)
        } else {
            node.members.push(member.to_string());
            Ok(Toggle::Added)
        }
    }

    /// True when every roster entry is selected. Derived from membership on
    /// each call, so manual edits can never leave it stale. An empty roster is
    /// never "all selected".
    pub fn is_all_selected(&self, team: &str, project: &str, roster: &[String]) -> bool {
        let members = self.members_of(project, team);
        !roster.is_empty() && roster.iter().all(|entry| members.contains(entry))
    }

    /// Selects the full roster, or clears the member list when the roster is
    /// already fully selected. `Added` means the roster is now selected.
    pub fn toggle_select_all(
        &mut self,
        team: &str,
        project: &str,
        roster: &[String],
    ) -> Result<Toggle, SelectionError> {
        let all_selected = self.is_all_selected(team, project, roster);
        let node = self.team_node_mut(team, project)?;
        if all_selected {
            node.members.clear();
            Ok(Toggle::Removed)
        } else {
            node.members = roster.to_vec();
            Ok(Toggle::Added)
        }
    }

    /// Flat `project → teams` view, keyed by project.
    pub fn project_teams(&self) -> BTreeMap<String, Vec<String>> {
        self.projects
            .iter()
            .map(|project| {
                (
                    project.key.clone(),
                    project.teams.iter().map(|t| t.name.clone()).collect(),
                )
            })
            .collect()
    }

    /// Flat `(project, team) → members` view.
    pub fn member_map(&self) -> BTreeMap<(String, String), Vec<String>> {
        let mut map = BTreeMap::new();
        for project in &self.projects {
            for team in &project.teams {
                map.insert(
                    (project.key.clone(), team.name.clone()),
                    team.members.clone(),
                );
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        vec!["Alice (NYC)".to_string(), "Bob".to_string()]
    }

    #[test]
    fn toggle_team_requires_selected_project() {
        let mut selection = Selection::new();
        assert_eq!(
            selection.toggle_team("Platform", "PROJ1"),
            Err(SelectionError::ProjectNotSelected {
                project: "PROJ1".to_string()
            })
        );
    }

    #[test]
    fn select_all_indicator_tracks_manual_edits() {
        let mut selection = Selection::new();
        selection.toggle_project("PROJ1");
        selection.toggle_team("Platform", "PROJ1").expect("team");
        selection
            .toggle_select_all("Platform", "PROJ1", &roster())
            .expect("select all");
        assert!(selection.is_all_selected("Platform", "PROJ1", &roster()));

        selection
            .toggle_member("Bob", "Platform", "PROJ1")
            .expect("member");
        assert!(!selection.is_all_selected("Platform", "PROJ1", &roster()));

        assert_eq!(
            selection.toggle_select_all("Platform", "PROJ1", &roster()),
            Ok(Toggle::Added)
        );
        assert_eq!(selection.members_of("PROJ1", "Platform"), roster().as_slice());
    }

    #[test]
    fn reselecting_same_organization_keeps_projects() {
        let mut selection = Selection::new();
        selection.select_organization("Acme");
        selection.toggle_project("PROJ1");
        assert!(!selection.select_organization("Acme"));
        assert_eq!(selection.selected_projects(), vec!["PROJ1"]);
        assert!(selection.select_organization("Globex"));
        assert!(selection.selected_projects().is_empty());
    }
}
