use serde::{Deserialize, Serialize};
use types::{MatchRecord, WinCondition, WinConditionCatalog};

use crate::percentage;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinConditionShare {
    pub condition: WinCondition,
    pub count: usize,
    /// Share of all matches, rounded to one decimal.
    pub percentage: f64,
}

/// How often each catalog condition decided a match, most frequent first.
///
/// Matches without a recorded condition still count toward the total.
pub fn win_condition_distribution(
    matches: &[MatchRecord],
    catalog: &WinConditionCatalog,
) -> Vec<WinConditionShare> {
    let total = matches.len();
    let mut shares: Vec<WinConditionShare> = catalog
        .iter()
        .map(|condition| {
            let count = matches
                .iter()
                .filter(|m| m.win_condition == Some(condition.id))
                .count();
            WinConditionShare {
                condition: condition.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
