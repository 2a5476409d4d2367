use serde::{Deserialize, Serialize};

/// What a wizard page collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Organization,
    Projects,
    Teams,
    Members,
    TeamsAndMembers,
    ProjectsAndTeams,
    Review,
}

impl WizardStep {
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Organization => "Organization",
            WizardStep::Projects => "Projects",
            WizardStep::Teams => "Teams",
            WizardStep::Members => "Members",
            WizardStep::TeamsAndMembers => "Teams & Members",
            WizardStep::ProjectsAndTeams => "Projects & Teams",
            WizardStep::Review => "Review",
        }
    }
}

const FULL_STEPS: [WizardStep; 5] = [
    WizardStep::Organization,
    WizardStep::Projects,
    WizardStep::Teams,
    WizardStep::Members,
    WizardStep::Review,
];

const COMPACT_STEPS: [WizardStep; 4] = [
    WizardStep::Organization,
    WizardStep::Projects,
    WizardStep::TeamsAndMembers,
    WizardStep::Review,
];

const MINIMAL_STEPS: [WizardStep; 3] = [
    WizardStep::Organization,
    WizardStep::ProjectsAndTeams,
    WizardStep::Review,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardLayout {
    #[default]
    Full,
    Compact,
    Minimal,
}

impl WizardLayout {
    pub fn steps(self) -> &'static [WizardStep] {
        match self {
            WizardLayout::Full => &FULL_STEPS,
            WizardLayout::Compact => &COMPACT_STEPS,
            WizardLayout::Minimal => &MINIMAL_STEPS,
        }
    }

    pub fn step_count(self) -> usize {
        self.steps().len()
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(WizardLayout::Full),
            "compact" => Ok(WizardLayout::Compact),
            "minimal" => Ok(WizardLayout::Minimal),
            other => Err(format!(
                "unknown layout `{other}`; expected full, compact or minimal"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardLayout::Full => "full",
            WizardLayout::Compact => "compact",
            WizardLayout::Minimal => "minimal",
        }
    }
}
