//! Phonetic-code similarity (Double Metaphone).

use rphonetic::{DoubleMetaphone, Encoder};

use crate::similarity::ratio;

/// Shortest code-length cap the encoder is given.
const MIN_CODE_LENGTH: usize = 4;

/// Primary and alternate Double Metaphone codes of the whole string, with
/// empty codes removed. Codes are not truncated: every word contributes.
///
/// An encoder panic yields no codes.
pub fn phonetic_codes(text: &str) -> Vec<String> {
    // A letter encodes to at most two code characters.
    let max_code_length = (text.len() * 2).max(MIN_CODE_LENGTH);
    let encoded = std::panic::catch_unwind(|| {
        let encoder = DoubleMetaphone::new(max_code_length);
        (encoder.encode(text), encoder.encode_alternate(text))
    });

    match encoded {
        Ok((primary, alternate)) => [primary, alternate]
            .into_iter()
            .filter(|code| !code.is_empty())
            .collect(),
        Err(_) => {
            log::warn!("Double Metaphone panicked on input {text:?}");
            Vec::new()
        }
    }
}

/// Best [`ratio`] over every pairing of the two inputs' phonetic codes.
///
/// Returns 0 when either input is empty or yields no code.
pub fn double_metaphone_similarity(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let codes_a = phonetic_codes(a);
    let codes_b = phonetic_codes(b);

    codes_a
        .iter()
        .flat_map(|ca| codes_b.iter().map(move |cb| ratio(ca, cb)))
        .max()
        .unwrap_or(0)
}
