use std::fmt::Display;

use serde::{Deserialize, Serialize};
use types::{MatchRecord, Player, WinConditionCatalog};

use crate::player::{player_stats, PlayerStats};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
}

impl Badge {
    pub fn for_rank(rank: usize) -> Option<Badge> {
        match rank {
            1 => Some(Badge::Gold),
            2 => Some(Badge::Silver),
            3 => Some(Badge::Bronze),
            _ => None,
        }
    }
}

impl Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Badge::Gold => "gold",
            Badge::Silver => "silver",
            Badge::Bronze => "bronze",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub badge: Option<Badge>,
    pub stats: PlayerStats,
}

/// Every player's stats, most wins first, then highest win rate.
///
/// The sort is stable and has no further key: players equal on both keep the
/// order in which `players` lists them.
pub fn leaderboard(
    players: &[Player],
    matches: &[MatchRecord],
    catalog: &WinConditionCatalog,
) -> Vec<LeaderboardEntry> {
    let mut stats: Vec<PlayerStats> = players
        .iter()
        .map(|player| player_stats(matches, player, catalog))
        .collect();
    stats.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
    });
    stats
        .into_iter()
        .enumerate()
        .map(|(index, stats)| LeaderboardEntry {
            rank: index + 1,
            badge: Badge::for_rank(index + 1),
            stats,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{catalog, record};

    fn names(board: &[LeaderboardEntry]) -> Vec<&str> {
        board.iter().map(|e| e.stats.name.as_str()).collect()
    }

    #[test]
    fn test_win_rate_breaks_ties_on_wins() {
        let a = Player::new("A");
        let b = Player::new("B");
        let c = Player::new("C");
        let mut matches = Vec::new();
        // A: 3 wins out of 5 (60%)
        for _ in 0..3 {
            matches.push(record(&a, &c, Some(&a), Some(1)));
        }
        for _ in 0..2 {
            matches.push(record(&a, &c, Some(&c), Some(1)));
        }
        // B: 3 wins out of 6 (50%)
        for _ in 0..3 {
            matches.push(record(&c, &b, Some(&b), Some(2)));
        }
        for _ in 0..3 {
            matches.push(record(&c, &b, Some(&c), Some(2)));
        }

        let board = leaderboard(&[b.clone(), a.clone(), c.clone()], &matches, &catalog());
        assert_eq!(names(&board), vec!["C", "A", "B"]);
        assert_eq!(board[1].stats.win_rate, 60.0);
        assert_eq!(board[2].stats.win_rate, 50.0);
        assert_eq!(board[0].badge, Some(Badge::Gold));
        assert_eq!(board[2].badge, Some(Badge::Bronze));
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_full_ties_keep_roster_order() {
        let players: Vec<Player> = ["Xia", "Abe", "Mo", "Lu"].map(Player::new).into();
        let board = leaderboard(&players, &[], &catalog());
        assert_eq!(names(&board), vec!["Xia", "Abe", "Mo", "Lu"]);
        assert!(board.iter().all(|e| e.stats.win_rate == 0.0));
        assert_eq!(board[3].badge, None);
    }

    #[test]
    fn test_empty_roster() {
        assert!(leaderboard(&[], &[], &catalog()).is_empty());
    }
}
