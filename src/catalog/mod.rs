//! Read-only reference data: organizations, projects, and teams with their
//! member rosters.
//!
//! A [`Catalog`] is an immutable snapshot. Adding an organization through the
//! wizard produces a new snapshot via [`Catalog::with_organization`]; nothing is
//! written back to the source dataset.

mod builtin;
mod load;

pub use load::{load_catalog, parse_catalog, CatalogFormat};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {message}")]
    Parse { path: String, message: String },
    #[error("unsupported catalog format for {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: String },
    #[error("catalog validation failed: {0}")]
    Invalid(String),
    #[error("organization name must not be blank")]
    BlankOrganization,
}

/// One roster line in the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Loc", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RosterEntry {
    pub fn new(name: &str, location: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            location: location.map(str::to_string),
        }
    }

    /// `"Name (Location)"`, or just `"Name"` when the location is absent or empty.
    pub fn display(&self) -> String {
        match self.location.as_deref().filter(|loc| !loc.is_empty()) {
            Some(location) => format!("{} ({location})", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ProjectRecord {
    pub fn new(key: &str, name: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            name: name.map(str::to_string),
        }
    }

    pub fn label(&self) -> String {
        match self.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => format!("{} ({name})", self.key),
            None => self.key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "Team Name")]
    pub name: String,
    #[serde(rename = "Members", default)]
    pub members: Vec<RosterEntry>,
}

impl TeamRecord {
    pub fn new(name: &str, members: Vec<RosterEntry>) -> Self {
        Self {
            name: name.to_string(),
            members,
        }
    }

    pub fn roster(&self) -> Vec<String> {
        self.members.iter().map(RosterEntry::display).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "OrgList", default)]
    organizations: Vec<String>,
    #[serde(rename = "ProjectList", default)]
    projects: Vec<ProjectRecord>,
    #[serde(rename = "TeamList", default)]
    teams: Vec<TeamRecord>,
}

impl Catalog {
    pub fn new(
        organizations: Vec<String>,
        projects: Vec<ProjectRecord>,
        teams: Vec<TeamRecord>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            organizations,
            projects,
            teams,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn builtin() -> Self {
        builtin::builtin_catalog()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique(
            "organization",
            self.organizations.iter().map(String::as_str),
        )?;
        ensure_unique("project key", self.projects.iter().map(|p| p.key.as_str()))?;
        ensure_unique("team name", self.teams.iter().map(|t| t.name.as_str()))?;
        Ok(())
    }

    pub fn list_organizations(&self) -> Vec<String> {
        self.organizations.clone()
    }

    pub fn list_projects(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.key.clone()).collect()
    }

    pub fn list_teams(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    pub fn has_organization(&self, name: &str) -> bool {
        self.organizations.iter().any(|org| org == name)
    }

    pub fn project(&self, key: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.key == key)
    }

    /// Label for a project key; keys missing from the catalog render as-is.
    pub fn project_label(&self, key: &str) -> String {
        self.project(key)
            .map(ProjectRecord::label)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn team(&self, name: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Formatted member strings for `team`; unknown teams have an empty roster.
    pub fn roster_of(&self, team: &str) -> Vec<String> {
        self.team(team).map(TeamRecord::roster).unwrap_or_default()
    }

    /// Returns a new snapshot with `name` (trimmed) appended. A name already in
    /// the list leaves the snapshot unchanged.
    pub fn with_organization(&self, name: &str) -> Result<Self, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::BlankOrganization);
        }
        let mut next = self.clone();
        if !next.has_organization(name) {
            next.organizations.push(name.to_string());
        }
        Ok(next)
    }
}

/// Case-insensitive substring filter shared by every search box. An empty
/// needle keeps everything.
pub fn filter(items: &[String], needle: &str) -> Vec<String> {
    let needle = needle.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn ensure_unique<'a>(kind: &str, values: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(CatalogError::Invalid(format!("{kind} must not be blank")));
        }
        if !seen.insert(value) {
            return Err(CatalogError::Invalid(format!("duplicate {kind} `{value}`")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_entry_display_omits_empty_location() {
        assert_eq!(RosterEntry::new("Alice", Some("NYC")).display(), "Alice (NYC)");
        assert_eq!(RosterEntry::new("Bob", None).display(), "Bob");
        assert_eq!(RosterEntry::new("Cy", Some("")).display(), "Cy");
    }

    #[test]
    fn project_label_includes_optional_name() {
        assert_eq!(
            ProjectRecord::new("PROJ1", Some("Payments")).label(),
            "PROJ1 (Payments)"
        );
        assert_eq!(ProjectRecord::new("PROJ2", None).label(), "PROJ2");
    }

    #[test]
    fn new_rejects_duplicate_team_names() {
        let err = Catalog::new(
            vec!["Acme".to_string()],
            Vec::new(),
            vec![
                TeamRecord::new("Platform", Vec::new()),
                TeamRecord::new("Platform", Vec::new()),
            ],
        )
        .expect_err("duplicate team");
        assert!(err.to_string().contains("duplicate team name `Platform`"));
    }
}
