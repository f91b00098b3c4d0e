/// Heuristic surname guess: the longest whitespace token, first one on ties.
///
/// This misreads names whose given name is longer than the surname
/// ("Maximilian Nowak" → "maximilian"); callers compare both sides with the
/// same rule, so consistent misreads still line up.
pub fn extract_likely_surname(name: &str) -> &str {
    let mut best = "";
    let mut best_len = 0;
    for token in name.split_whitespace() {
        let len = token.chars().count();
        if len > best_len {
            best = token;
            best_len = len;
        }
    }
    best
}
