//! Script classification for short text fragments.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    Korean,
    Cyrillic,
    Latin,
    Other,
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Korean => write!(f, "korean"),
            Self::Cyrillic => write!(f, "cyrillic"),
            Self::Latin => write!(f, "latin"),
            Self::Other => write!(f, "other"),
        }
    }
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Classify `text` by the first script found in precedence order:
/// Hangul syllables, then Cyrillic, then ASCII letters.
///
/// Blank text is `Other`.
pub fn detect_alphabet(text: &str) -> Alphabet {
    if text.trim().is_empty() {
        return Alphabet::Other;
    }

    if text.chars().any(is_hangul_syllable) {
        Alphabet::Korean
    } else if text.chars().any(is_cyrillic) {
        Alphabet::Cyrillic
    } else if text.chars().any(|c| c.is_ascii_alphabetic()) {
        Alphabet::Latin
    } else {
        Alphabet::Other
    }
}
