use crate::selection::Selection;
use crate::shared::ids::ConfigurationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the stored envelope. Values written under any other version are
/// treated as unreadable rather than migrated.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectAssignment {
    pub teams: Vec<String>,
    #[serde(default)]
    pub members: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub id: ConfigurationId,
    pub organization: String,
    pub projects: BTreeMap<String, ProjectAssignment>,
    pub timestamp: i64,
}

impl Configuration {
    /// Snapshot of `selection`; `None` when no organization is selected.
    pub fn from_selection(
        selection: &Selection,
        id: ConfigurationId,
        timestamp: i64,
    ) -> Option<Self> {
        let organization = selection.organization()?.to_string();
        let projects = selection
            .projects()
            .iter()
            .map(|project| {
                let teams = project
                    .teams()
                    .iter()
                    .map(|team| team.name().to_string())
                    .collect();
                let members = project
                    .teams()
                    .iter()
                    .map(|team| (team.name().to_string(), team.members().to_vec()))
                    .collect();
                (project.key().to_string(), ProjectAssignment { teams, members })
            })
            .collect();
        Some(Self {
            id,
            organization,
            projects,
            timestamp,
        })
    }

    pub fn matches(&self, target: &ConfigurationRef) -> bool {
        match target {
            ConfigurationRef::Id(id) => &self.id == id,
            ConfigurationRef::Timestamp(ts) => {
                self.timestamp == *ts || self.id.as_str() == ts.to_string()
            }
        }
    }

    pub fn team_count(&self) -> usize {
        self.projects.values().map(|p| p.teams.len()).sum()
    }

    pub fn member_count(&self) -> usize {
        self.projects
            .values()
            .flat_map(|p| p.members.values())
            .map(Vec::len)
            .sum()
    }
}

/// Addresses one saved record, by id or by its save timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationRef {
    Id(ConfigurationId),
    Timestamp(i64),
}

impl ConfigurationRef {
    /// All-digit input is read as a timestamp; anything else must be a valid id.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if !raw.is_empty() && raw.chars().all(|ch| ch.is_ascii_digit()) {
            let ts = raw
                .parse::<i64>()
                .map_err(|err| format!("invalid timestamp `{raw}`: {err}"))?;
            return Ok(Self::Timestamp(ts));
        }
        ConfigurationId::parse(raw).map(Self::Id)
    }
}

impl std::fmt::Display for ConfigurationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationRef::Id(id) => write!(f, "id={id}"),
            ConfigurationRef::Timestamp(ts) => write!(f, "timestamp={ts}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("stored value is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value has no schema_version")]
    MissingVersion,
    #[error("unsupported schema_version {found}; expected {}", SCHEMA_VERSION)]
    UnsupportedVersion { found: u64 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    schema_version: u32,
    configurations: &'a [Configuration],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[allow(dead_code)]
    schema_version: u32,
    configurations: Vec<Configuration>,
}

pub fn encode_configurations(configs: &[Configuration]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        configurations: configs,
    })
}

pub fn decode_configurations(raw: &str) -> Result<Vec<Configuration>, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let version = value
        .get("schema_version")
        .ok_or(DecodeError::MissingVersion)?
        .as_u64()
        .ok_or(DecodeError::MissingVersion)?;
    if version != u64::from(SCHEMA_VERSION) {
        return Err(DecodeError::UnsupportedVersion { found: version });
    }
    let envelope: Envelope = serde_json::from_value(value)?;
    Ok(envelope.configurations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ref_distinguishes_timestamps_from_ids() {
        assert_eq!(
            ConfigurationRef::parse("1700000000000"),
            Ok(ConfigurationRef::Timestamp(1_700_000_000_000))
        );
        assert_eq!(
            ConfigurationRef::parse("cfg-abc-0001"),
            Ok(ConfigurationRef::Id(
                ConfigurationId::parse("cfg-abc-0001").expect("id")
            ))
        );
        assert!(ConfigurationRef::parse("not an id").is_err());
    }

    #[test]
    fn decode_rejects_bare_legacy_arrays() {
        let err = decode_configurations("[]").expect_err("legacy array");
        assert!(matches!(err, DecodeError::MissingVersion));
    }

    #[test]
    fn decode_rejects_future_versions() {
        let err = decode_configurations(r#"{"schema_version": 2, "configurations": []}"#)
            .expect_err("future version");
        assert!(matches!(err, DecodeError::UnsupportedVersion { found: 2 }));
    }
}
