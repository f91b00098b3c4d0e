use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Criteria;
use crate::normalize::{build_full_address, normalize_address, normalize_text};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One employee row. `None` means the cell was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub pesel: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
    pub city: Option<String>,
}

/// One company-owner row. `None` means the cell was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRecord {
    pub company_name: Option<String>,
    pub owner_name: Option<String>,
    pub pesel: Option<String>,
    pub address: Option<String>,
}

/// Pre-loaded records for both sides.
#[derive(Debug, Clone, Default)]
pub struct MatchInput {
    pub employees: Vec<EmployeeRecord>,
    pub owners: Vec<OwnerRecord>,
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// An employee with its normalized fields, computed once before matching.
#[derive(Debug, Clone)]
pub struct PreparedEmployee {
    pub record: EmployeeRecord,
    pub full_address: String,
    pub address_clean: String,
    pub name_clean: Option<String>,
    pub surname_clean: Option<String>,
    /// `name_clean + " " + surname_clean`; absent if either half is.
    pub full_name_clean: Option<String>,
}

impl PreparedEmployee {
    pub fn new(record: EmployeeRecord) -> Self {
        let full_address = build_full_address(
            record.street.as_deref(),
            record.building_number.as_deref(),
            record.apartment_number.as_deref(),
            record.city.as_deref(),
        );
        let address_clean = normalize_address(&full_address);
        let name_clean = record.name.as_deref().map(normalize_text);
        let surname_clean = record.surname.as_deref().map(normalize_text);
        let full_name_clean = match (&name_clean, &surname_clean) {
            (Some(name), Some(surname)) => Some(format!("{name} {surname}")),
            _ => None,
        };

        Self {
            record,
            full_address,
            address_clean,
            name_clean,
            surname_clean,
            full_name_clean,
        }
    }
}

/// An owner with its normalized fields, computed once before matching.
#[derive(Debug, Clone)]
pub struct PreparedOwner {
    pub record: OwnerRecord,
    pub owner_name_clean: Option<String>,
    pub address_clean: Option<String>,
}

impl PreparedOwner {
    pub fn new(record: OwnerRecord) -> Self {
        let owner_name_clean = record.owner_name.as_deref().map(normalize_text);
        let address_clean = record.address.as_deref().map(normalize_address);
        Self {
            record,
            owner_name_clean,
            address_clean,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-pair verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MatchReason {
    #[serde(rename = "pesel")]
    Pesel,
    #[serde(rename = "fuzz")]
    Fuzz,
    #[serde(rename = "surname+initial")]
    SurnameInitial,
    #[serde(rename = "surname_only")]
    SurnameOnly,
    #[serde(rename = "phonetic")]
    Phonetic,
    #[serde(rename = "address")]
    Address,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pesel => "pesel",
            Self::Fuzz => "fuzz",
            Self::SurnameInitial => "surname+initial",
            Self::SurnameOnly => "surname_only",
            Self::Phonetic => "phonetic",
            Self::Address => "address",
        }
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated outcome of every enabled matcher for one employee/owner pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub is_match: bool,
    /// In evaluation order: pesel, then name/phonetic, then address.
    pub reasons: Vec<MatchReason>,
    pub fuzz_ratio: u8,
    pub phonetic_ratio: u8,
    pub address_ratio: u8,
}

impl MatchResult {
    /// Comma-joined reason tags, or `no_match`.
    pub fn reason_label(&self) -> String {
        if self.reasons.is_empty() {
            return "no_match".to_string();
        }
        self.reasons
            .iter()
            .map(MatchReason::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeselColumns {
    #[serde(rename = "company_owner_PESEL")]
    pub company_owner_pesel: Option<String>,
    #[serde(rename = "employee_PESEL")]
    pub employee_pesel: Option<String>,
    #[serde(rename = "matching_PESEL_flag")]
    pub matching_pesel_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressColumns {
    pub company_address: Option<String>,
    pub employee_address: String,
    pub matching_address_ratio: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NameColumns {
    pub matching_name_ratio: u8,
    pub phonetic_match_ratio: u8,
}

/// One matched pair as it is exported. Column groups are present only for
/// the criteria that were enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub company_name: Option<String>,
    pub company_owner_name: Option<String>,
    pub employee_name: Option<String>,
    pub employee_surname: Option<String>,
    pub match_reason: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub pesel: Option<PeselColumns>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressColumns>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameColumns>,
    /// Employee national identifier, kept for deduplication even when the
    /// pesel columns are not exported.
    #[serde(skip)]
    pub employee_key: Option<String>,
}

impl OutputRecord {
    /// Name fuzzy ratio used for ranking; 0 when name matching was disabled.
    pub fn name_ratio(&self) -> u8 {
        self.name.map(|n| n.matching_name_ratio).unwrap_or(0)
    }

    /// Cells in [`output_columns`] order.
    pub fn cells(&self) -> Vec<CellValue> {
        let mut cells = vec![
            CellValue::text(&self.company_name),
            CellValue::text(&self.company_owner_name),
            CellValue::text(&self.employee_name),
            CellValue::text(&self.employee_surname),
            CellValue::Text(self.match_reason.clone()),
        ];

        if let Some(ref p) = self.pesel {
            cells.push(CellValue::text(&p.company_owner_pesel));
            cells.push(CellValue::text(&p.employee_pesel));
            cells.push(CellValue::Flag(p.matching_pesel_flag));
        }

        if let Some(ref a) = self.address {
            cells.push(CellValue::text(&a.company_address));
            cells.push(CellValue::Text(a.employee_address.clone()));
            cells.push(CellValue::Ratio(a.matching_address_ratio));
        }

        if let Some(n) = self.name {
            cells.push(CellValue::Ratio(n.matching_name_ratio));
            cells.push(CellValue::Ratio(n.phonetic_match_ratio));
        }

        cells
    }
}

/// Header row for the enabled criteria.
pub fn output_columns(criteria: &Criteria) -> Vec<&'static str> {
    let mut columns = vec![
        "company_name",
        "company_owner_name",
        "employee_name",
        "employee_surname",
        "match_reason",
    ];
    if criteria.pesel {
        columns.extend(["company_owner_PESEL", "employee_PESEL", "matching_PESEL_flag"]);
    }
    if criteria.address {
        columns.extend(["company_address", "employee_address", "matching_address_ratio"]);
    }
    if criteria.name_or_phonetic() {
        columns.extend(["matching_name_ratio", "phonetic_match_ratio"]);
    }
    columns
}

/// A typed export cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Text(String),
    Flag(bool),
    Ratio(u8),
}

impl CellValue {
    fn text(value: &Option<String>) -> Self {
        match value {
            Some(s) => Self::Text(s.clone()),
            None => Self::Empty,
        }
    }

    /// Display form used in CSV output and column sizing.
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Flag(true) => "True".to_string(),
            Self::Flag(false) => "False".to_string(),
            Self::Ratio(r) => r.to_string(),
        }
    }

    /// Falsy cells (empty text, `False`, `0`) are written but do not widen
    /// their column.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Flag(b) => !b,
            Self::Ratio(r) => *r == 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub employees: usize,
    pub owners: usize,
    pub pairs_evaluated: usize,
    pub matched_pairs: usize,
    pub rows: usize,
    pub duplicates_dropped: usize,
    pub reason_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub criteria: Vec<String>,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub meta: RunMeta,
    pub summary: MatchSummary,
    pub rows: Vec<OutputRecord>,
    #[serde(skip)]
    pub criteria: Criteria,
}

impl MatchRun {
    pub fn columns(&self) -> Vec<&'static str> {
        output_columns(&self.criteria)
    }
}
