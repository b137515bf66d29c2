use types::{MatchRecord, TotalMismatch};

/// Every stored total that disagrees with its category sum.
pub fn integrity_report(matches: &[MatchRecord]) -> Vec<TotalMismatch> {
    let mismatches: Vec<TotalMismatch> = matches
        .iter()
        .flat_map(MatchRecord::total_mismatches)
        .collect();
    for mismatch in &mismatches {
        log::warn!(
            "Match {} {}: stored total {} but categories sum to {}",
            mismatch.match_id,
            mismatch.seat,
            mismatch.stored,
            mismatch.computed
        );
    }
    mismatches
}

/// Newest matches first.
pub fn recent_matches(matches: &[MatchRecord], limit: usize) -> Vec<&MatchRecord> {
    let mut recent: Vec<&MatchRecord> = matches.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}
