use std::collections::BTreeMap;

use crate::model::{MatchSummary, OutputRecord};

/// Build run counters. Reason counts are taken over the final rows; a row
/// with several reasons counts once toward each.
pub fn compute_summary(
    employees: usize,
    owners: usize,
    matched_pairs: usize,
    rows: &[OutputRecord],
) -> MatchSummary {
    let mut reason_counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        for reason in row.match_reason.split(", ").filter(|r| !r.is_empty()) {
            *reason_counts.entry(reason.to_string()).or_insert(0) += 1;
        }
    }

    MatchSummary {
        employees,
        owners,
        pairs_evaluated: employees * owners,
        matched_pairs,
        rows: rows.len(),
        duplicates_dropped: matched_pairs.saturating_sub(rows.len()),
        reason_counts,
    }
}
