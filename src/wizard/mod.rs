//! Step-by-step wizard over a [`Selection`](crate::selection::Selection).

mod controller;
mod notice;
mod steps;
mod validation;

pub use controller::{NextOutcome, WizardController};
pub use notice::{Notice, Severity};
pub use steps::{WizardLayout, WizardStep};
pub use validation::{
    members_issue, organization_issue, projects_issue, step_issue, teams_issue, ValidationIssue,
};
