use itertools::Itertools;
use serde::{Deserialize, Serialize};
use types::{MatchRecord, Player, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub wins_a: usize,
    pub wins_b: usize,
    /// Every shared match, including those without a winner.
    pub total: usize,
}

impl HeadToHead {
    pub fn draws(&self) -> usize {
        self.total - self.wins_a - self.wins_b
    }
}

/// Tallies for every pair of players that met at least once. Pairs follow the
/// roster order of `players`, whichever seat each one took.
pub fn head_to_head(players: &[Player], matches: &[MatchRecord]) -> Vec<HeadToHead> {
    players
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.id != b.id)
        .filter_map(|(a, b)| {
            let shared: Vec<&MatchRecord> =
                matches.iter().filter(|m| m.is_between(a.id, b.id)).collect();
            if shared.is_empty() {
                return None;
            }
            Some(HeadToHead {
                player_a: a.id,
                player_b: b.id,
                wins_a: shared.iter().filter(|m| m.winner == Some(a.id)).count(),
                wins_b: shared.iter().filter(|m| m.winner == Some(b.id)).count(),
                total: shared.len(),
            })
        })
        .collect()
}
