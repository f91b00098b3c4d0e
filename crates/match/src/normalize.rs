//! Text and address normalization.
//!
//! Every function here is total and pure. Output is lowercase with single
//! spaces; scripts are folded to ASCII where a folding exists (Latin
//! diacritics, Russian Cyrillic) and left untouched otherwise.

use std::sync::LazyLock;

use regex::Regex;

use crate::alphabet::{detect_alphabet, Alphabet};

/// Title tokens that carry no identity signal.
pub const HONORIFICS: [&str; 9] = ["pani", "pan", "mr", "ms", "mrs", "mgr", "dr", "miss", "sir"];

static STREET_ABBREV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bul\.?\b").expect("valid street pattern"));
static APARTMENT_ABBREV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bapt\.?\b").expect("valid apartment pattern"));

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Canonical form of a person name (or any free text).
///
/// The text is lowercased first, honorifics are dropped, the remainder is
/// folded by script and whitespace-collapsed.
///
/// Lowercasing precedes script detection: some non-ASCII capitals lowercase to
/// ASCII (KELVIN SIGN to `k`) and must be classified as Latin on the first pass.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let script = detect_alphabet(&lowered);
    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|token| !is_honorific(token, script))
        .collect();
    let joined = kept.join(" ");

    let folded = fold_script(&joined, detect_alphabet(&joined));
    collapse_whitespace(&folded.to_lowercase())
}

/// A token is an honorific when its folded, lowercased form is one.
///
/// Folding before the check keeps `normalize_text` idempotent: a token such as
/// "Пан" or "Pań" would otherwise survive the first pass as "pan" and be
/// removed by the second.
fn is_honorific(token: &str, script: Alphabet) -> bool {
    let folded = fold_script(token, script).to_lowercase();
    HONORIFICS.contains(&folded.as_str())
}

/// Cyrillic text is transliterated letter by letter, then any Cyrillic left
/// over (Ukrainian `і`, `ї`, `є`, Serbian `ђ`, ...) is folded with the Latin
/// rules, so the output of a Cyrillic string is always ASCII.
fn fold_script(text: &str, script: Alphabet) -> String {
    match script {
        Alphabet::Cyrillic => fold_latin(&transliterate_cyrillic(text)),
        Alphabet::Latin => fold_latin(text),
        Alphabet::Korean | Alphabet::Other => text.to_string(),
    }
}

/// Strip diacritics and transliterate any remaining non-ASCII to plain ASCII.
/// Characters with no known transliteration are dropped.
fn fold_latin(text: &str) -> String {
    deunicode::deunicode_with_tofu(text, "")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Russian Cyrillic → Latin, one scheme per letter.
///
/// Letters outside the Russian alphabet pass through unchanged.
pub fn transliterate_cyrillic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        match cyrillic_to_latin(lower) {
            Some(latin) if c != lower => {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

fn cyrillic_to_latin(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "'",
        'ы' => "y",
        'ь' => "'",
        'э' => "e",
        'ю' => "ju",
        'я' => "ja",
        _ => return None,
    };
    Some(latin)
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Canonical form of a postal address: text normalization, then the
/// street/apartment abbreviation tokens are reduced to bare `ul` / `apt`, then
/// periods and commas are removed.
pub fn normalize_address(address: &str) -> String {
    let text = normalize_text(address);
    let text = STREET_ABBREV.replace_all(&text, "ul");
    let text = APARTMENT_ABBREV.replace_all(&text, "apt");
    let stripped: String = text.chars().filter(|c| !matches!(c, '.' | ',')).collect();
    collapse_whitespace(&stripped)
}

/// Compose `"street, building[/apartment], city"` from address components.
///
/// Only absent parts are omitted; an empty string is still a part. Without a
/// building number the building part is absent even if an apartment number is
/// present.
pub fn build_full_address(
    street: Option<&str>,
    building_number: Option<&str>,
    apartment_number: Option<&str>,
    city: Option<&str>,
) -> String {
    let building = building_number.map(|b| match apartment_number {
        Some(apt) => format!("{b}/{apt}"),
        None => b.to_string(),
    });

    [street.map(str::to_string), building, city.map(str::to_string)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}
