//! Individual matchers: national identifier, name (tiered), address.

use crate::alphabet::{detect_alphabet, Alphabet};
use crate::config::Thresholds;
use crate::model::MatchReason;
use crate::normalize::{normalize_address, normalize_text};
use crate::phonetic::double_metaphone_similarity;
use crate::similarity::token_sort_ratio;
use crate::surname::extract_likely_surname;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Exact equality of two identifiers. Absent values never match.
pub fn match_pesel(a: Option<&str>, b: Option<&str>) -> Option<MatchReason> {
    match (a, b) {
        (Some(a), Some(b)) if a == b => Some(MatchReason::Pesel),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMatch {
    pub reason: Option<MatchReason>,
    pub ratio: u8,
}

impl AddressMatch {
    pub fn matched(&self) -> bool {
        self.reason.is_some()
    }
}

pub fn match_address(a: &str, b: &str, thresholds: &Thresholds) -> AddressMatch {
    let ratio = token_sort_ratio(&normalize_address(a), &normalize_address(b));
    let reason = (ratio >= thresholds.address_threshold).then_some(MatchReason::Address);
    AddressMatch { reason, ratio }
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// Which tier decided a name comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTier {
    Fuzz,
    SurnameInitial,
    SurnameOnly,
    Phonetic,
    NoMatch,
}

impl NameTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuzz => "fuzz",
            Self::SurnameInitial => "surname+initial",
            Self::SurnameOnly => "surname_only",
            Self::Phonetic => "phonetic",
            Self::NoMatch => "no_match",
        }
    }

    pub fn reason(&self) -> Option<MatchReason> {
        match self {
            Self::Fuzz => Some(MatchReason::Fuzz),
            Self::SurnameInitial => Some(MatchReason::SurnameInitial),
            Self::SurnameOnly => Some(MatchReason::SurnameOnly),
            Self::Phonetic => Some(MatchReason::Phonetic),
            Self::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch {
    pub tier: NameTier,
    pub fuzz_ratio: u8,
    /// 0 unless the phonetic tier was reached with two Latin-script names.
    pub phonetic_ratio: u8,
}

impl NameMatch {
    pub fn matched(&self) -> bool {
        self.tier != NameTier::NoMatch
    }
}

/// Tiered name comparison; the first tier that holds decides.
///
/// 1. fuzzy ratio ≥ `tier1_fuzzy`
/// 2. both names have two or more tokens, same first initial, same likely
///    surname, fuzzy ratio ≥ `tier2_fuzzy`
/// 3. same likely surname, fuzzy ratio ≥ `tier3_fuzzy`
/// 4. both Latin script, phonetic ratio ≥ `phonetic_threshold` and fuzzy
///    ratio ≥ `phonetic_min_fuzzy`
pub fn match_name(a: &str, b: &str, thresholds: &Thresholds) -> NameMatch {
    let a = normalize_text(a);
    let b = normalize_text(b);
    let fuzz_ratio = token_sort_ratio(&a, &b);

    let decided = |tier| NameMatch {
        tier,
        fuzz_ratio,
        phonetic_ratio: 0,
    };

    if fuzz_ratio >= thresholds.tier1_fuzzy {
        return decided(NameTier::Fuzz);
    }

    let parts_a: Vec<&str> = a.split_whitespace().collect();
    let parts_b: Vec<&str> = b.split_whitespace().collect();
    let same_surname = extract_likely_surname(&a) == extract_likely_surname(&b);

    if parts_a.len() >= 2 && parts_b.len() >= 2 {
        let same_initial = parts_a[0].chars().next() == parts_b[0].chars().next();
        if same_surname && same_initial && fuzz_ratio >= thresholds.tier2_fuzzy {
            return decided(NameTier::SurnameInitial);
        }
    }

    if same_surname && fuzz_ratio >= thresholds.tier3_fuzzy {
        return decided(NameTier::SurnameOnly);
    }

    let phonetic_ratio =
        if detect_alphabet(&a) == Alphabet::Latin && detect_alphabet(&b) == Alphabet::Latin {
            double_metaphone_similarity(&a, &b)
        } else {
            0
        };

    let tier = if phonetic_ratio >= thresholds.phonetic_threshold
        && fuzz_ratio >= thresholds.phonetic_min_fuzzy
    {
        NameTier::Phonetic
    } else {
        NameTier::NoMatch
    };

    NameMatch {
        tier,
        fuzz_ratio,
        phonetic_ratio,
    }
}
