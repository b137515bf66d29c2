use serde::{Deserialize, Serialize};
use types::{MatchRecord, Player, PlayerId, Seat, WinCondition, WinConditionCatalog};

use crate::percentage;

/// Sum of one seat's categories, absent optional categories counting as zero.
/// Stored totals play no part in it.
pub fn total_score(record: &MatchRecord, seat: Seat) -> u64 {
    record.sheet(seat).total()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionCount {
    pub condition: WinCondition,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub name: String,
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage rounded to one decimal, 0 without games.
    pub win_rate: f64,
    /// One entry per catalog condition, in catalog order.
    pub win_condition_breakdown: Vec<ConditionCount>,
}

impl PlayerStats {
    pub fn wins_by(&self, condition: &str) -> usize {
        self.win_condition_breakdown
            .iter()
            .find(|entry| entry.condition.name.eq_ignore_ascii_case(condition))
            .map_or(0, |entry| entry.count)
    }
}

/// `losses` is `games_played - wins`, so a match without a winner counts as a loss.
pub fn player_stats(
    matches: &[MatchRecord],
    player: &Player,
    catalog: &WinConditionCatalog,
) -> PlayerStats {
    let played: Vec<&MatchRecord> = matches.iter().filter(|m| m.involves(player.id)).collect();
    let won: Vec<&MatchRecord> = played
        .iter()
        .copied()
        .filter(|m| m.winner == Some(player.id))
        .collect();

    let win_condition_breakdown = catalog
        .iter()
        .map(|condition| ConditionCount {
            condition: condition.clone(),
            count: won
                .iter()
                .filter(|m| m.win_condition == Some(condition.id))
                .count(),
        })
        .collect();

    PlayerStats {
        player_id: player.id,
        name: player.name.clone(),
        games_played: played.len(),
        wins: won.len(),
        losses: played.len() - won.len(),
        win_rate: percentage(won.len(), played.len()),
        win_condition_breakdown,
    }
}
