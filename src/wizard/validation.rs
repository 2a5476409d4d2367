use super::WizardStep;
use crate::selection::Selection;

/// Why the current step cannot be left yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Please select an organization")]
    MissingOrganization,
    #[error("Please select at least one project")]
    MissingProject,
    #[error("Project `{project}` needs at least one team")]
    ProjectWithoutTeam { project: String },
    #[error("Team `{team}` in project `{project}` needs at least one member")]
    TeamWithoutMembers { project: String, team: String },
}

impl ValidationIssue {
    pub fn missing_piece(&self) -> &'static str {
        match self {
            ValidationIssue::MissingOrganization => "organization",
            ValidationIssue::MissingProject => "project",
            ValidationIssue::ProjectWithoutTeam { .. } => "team",
            ValidationIssue::TeamWithoutMembers { .. } => "member",
        }
    }
}

pub fn organization_issue(selection: &Selection) -> Option<ValidationIssue> {
    match selection.organization() {
        Some(org) if !org.is_empty() => None,
        _ => Some(ValidationIssue::MissingOrganization),
    }
}

pub fn projects_issue(selection: &Selection) -> Option<ValidationIssue> {
    if selection.projects().is_empty() {
        Some(ValidationIssue::MissingProject)
    } else {
        None
    }
}

pub fn teams_issue(selection: &Selection) -> Option<ValidationIssue> {
    selection
        .projects()
        .iter()
        .find(|project| project.teams().is_empty())
        .map(|project| ValidationIssue::ProjectWithoutTeam {
            project: project.key().to_string(),
        })
}

pub fn members_issue(selection: &Selection) -> Option<ValidationIssue> {
    selection.projects().iter().find_map(|project| {
        project
            .teams()
            .iter()
            .find(|team| team.members().is_empty())
            .map(|team| ValidationIssue::TeamWithoutMembers {
                project: project.key().to_string(),
                team: team.name().to_string(),
            })
    })
}

/// First unmet condition for `step`, if any. Review never blocks.
pub fn step_issue(step: WizardStep, selection: &Selection) -> Option<ValidationIssue> {
    match step {
        WizardStep::Organization => organization_issue(selection),
        WizardStep::Projects => projects_issue(selection),
        WizardStep::Teams => teams_issue(selection),
        WizardStep::Members => members_issue(selection),
        WizardStep::TeamsAndMembers => {
            teams_issue(selection).or_else(|| members_issue(selection))
        }
        WizardStep::ProjectsAndTeams => projects_issue(selection)
            .or_else(|| teams_issue(selection))
            .or_else(|| members_issue(selection)),
        WizardStep::Review => None,
    }
}
