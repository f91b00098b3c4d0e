use serde::{Deserialize, Serialize};

use crate::error::MatchError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    pub name: String,
    #[serde(default = "default_criteria")]
    pub criteria: Vec<Criterion>,
    pub employees: InputSource,
    pub owners: InputSource,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_criteria() -> Vec<Criterion> {
    Criterion::ALL.to_vec()
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Pesel,
    Name,
    Phonetic,
    Address,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Pesel,
        Criterion::Name,
        Criterion::Phonetic,
        Criterion::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pesel => "pesel",
            Self::Name => "name",
            Self::Phonetic => "phonetic",
            Self::Address => "address",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Criterion {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pesel" => Ok(Self::Pesel),
            "name" => Ok(Self::Name),
            "phonetic" => Ok(Self::Phonetic),
            "address" => Ok(Self::Address),
            other => Err(MatchError::ConfigValidation(format!(
                "unknown criterion '{other}' (expected pesel, name, phonetic or address)"
            ))),
        }
    }
}

/// The active subset of matching criteria.
///
/// `name` and `phonetic` share one name-matcher call; enabling either runs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Criteria {
    pub pesel: bool,
    pub name: bool,
    pub phonetic: bool,
    pub address: bool,
}

impl Criteria {
    pub fn all() -> Self {
        Self::from_list(&Criterion::ALL)
    }

    pub fn from_list(list: &[Criterion]) -> Self {
        let mut criteria = Self::default();
        for c in list {
            match c {
                Criterion::Pesel => criteria.pesel = true,
                Criterion::Name => criteria.name = true,
                Criterion::Phonetic => criteria.phonetic = true,
                Criterion::Address => criteria.address = true,
            }
        }
        criteria
    }

    /// Parse a comma-separated list such as `"pesel,name"`.
    pub fn parse_list(input: &str) -> Result<Self, MatchError> {
        let list = input
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Criterion>, _>>()?;
        if list.is_empty() {
            return Err(MatchError::ConfigValidation(
                "at least one criterion is required".into(),
            ));
        }
        Ok(Self::from_list(&list))
    }

    pub fn name_or_phonetic(&self) -> bool {
        self.name || self.phonetic
    }

    pub fn is_empty(&self) -> bool {
        !(self.pesel || self.name || self.phonetic || self.address)
    }

    /// Enabled criteria in canonical order.
    pub fn enabled(&self) -> Vec<Criterion> {
        Criterion::ALL
            .into_iter()
            .filter(|c| match c {
                Criterion::Pesel => self.pesel,
                Criterion::Name => self.name,
                Criterion::Phonetic => self.phonetic,
                Criterion::Address => self.address,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Fixed decision thresholds (0–100 scale). Not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Tier 1: plain fuzzy match.
    pub tier1_fuzzy: u8,
    /// Tier 2: same surname and first initial.
    pub tier2_fuzzy: u8,
    /// Tier 3: same surname only.
    pub tier3_fuzzy: u8,
    /// Tier 4: minimum phonetic-code similarity.
    pub phonetic_threshold: u8,
    /// Tier 4: minimum fuzzy score alongside the phonetic signal.
    pub phonetic_min_fuzzy: u8,
    pub address_threshold: u8,
}

pub const THRESHOLDS: Thresholds = Thresholds {
    tier1_fuzzy: 85,
    tier2_fuzzy: 60,
    tier3_fuzzy: 80,
    phonetic_threshold: 50,
    phonetic_min_fuzzy: 60,
    address_threshold: 80,
};

// ---------------------------------------------------------------------------
// Inputs + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSource {
    pub file: String,
    /// Worksheet name for spreadsheet inputs; first sheet when omitted.
    #[serde(default)]
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub xlsx: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.criteria.is_empty() {
            return Err(MatchError::ConfigValidation(
                "at least one criterion is required".into(),
            ));
        }

        if self.employees.file.trim().is_empty() {
            return Err(MatchError::ConfigValidation(
                "employees.file must not be empty".into(),
            ));
        }
        if self.owners.file.trim().is_empty() {
            return Err(MatchError::ConfigValidation(
                "owners.file must not be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn criteria(&self) -> Criteria {
        Criteria::from_list(&self.criteria)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
