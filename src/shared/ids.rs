use super::serde_ext::parse_via_string;
use getrandom::getrandom;
use serde::{Deserialize, Deserializer, Serialize};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_WIDTH: usize = 4;
const ID_SUFFIX_SPACE: u32 = 36 * 36 * 36 * 36;

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConfigurationId(String);

impl ConfigurationId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("configuration id", raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Allocates `cfg-<base36 millis>-<4 random base36 chars>`.
    pub fn generate(now_millis: i64) -> Result<Self, String> {
        let timestamp = u64::try_from(now_millis)
            .map_err(|_| "configuration id requires a non-negative timestamp".to_string())?;
        let mut bytes = [0_u8; 4];
        getrandom(&mut bytes)
            .map_err(|err| format!("failed to generate configuration id randomness: {err}"))?;
        let sample = u32::from_le_bytes(bytes) % ID_SUFFIX_SPACE;
        Ok(Self(format!(
            "cfg-{}-{}",
            base36_encode_u64(timestamp),
            base36_encode_fixed_u32(sample, ID_SUFFIX_WIDTH)
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::borrow::Borrow<str> for ConfigurationId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for ConfigurationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for ConfigurationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "configuration id", Self::parse)
    }
}

fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    chars.iter().rev().collect()
}

fn base36_encode_fixed_u32(mut value: u32, width: usize) -> String {
    let mut chars = vec!['0'; width];
    for idx in (0..width).rev() {
        chars[idx] = BASE36_ALPHABET[(value % 36) as usize] as char;
        value /= 36;
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_helpers_encode_expected_digits() {
        assert_eq!(base36_encode_u64(0), "0");
        assert_eq!(base36_encode_u64(35), "z");
        assert_eq!(base36_encode_u64(36), "10");
        assert_eq!(base36_encode_fixed_u32(1, 4), "0001");
    }

    #[test]
    fn generated_ids_pass_parse_validation() {
        let id = ConfigurationId::generate(1_700_000_000_000).expect("generate");
        assert!(id.as_str().starts_with("cfg-"));
        assert_eq!(ConfigurationId::parse(id.as_str()).expect("parse"), id);
    }

    #[test]
    fn negative_timestamps_are_rejected() {
        assert!(ConfigurationId::generate(-1).is_err());
    }
}
