use std::collections::HashSet;

use crate::model::OutputRecord;

/// Order rows by name fuzzy ratio (highest first) and keep the first row
/// per employee identifier.
///
/// The sort is stable, so ties keep generation order. Rows without an
/// employee identifier are never treated as duplicates of one another.
pub fn rank_and_dedupe(mut rows: Vec<OutputRecord>) -> Vec<OutputRecord> {
    rows.sort_by(|a, b| b.name_ratio().cmp(&a.name_ratio()));

    let mut seen: HashSet<String> = HashSet::new();
    let before = rows.len();
    rows.retain(|row| match row.employee_key {
        Some(ref key) => seen.insert(key.clone()),
        None => true,
    });

    if rows.len() < before {
        log::debug!("dropped {} duplicate row(s)", before - rows.len());
    }
    rows
}
