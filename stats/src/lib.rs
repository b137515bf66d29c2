//! Read-side projections over stored matches. Nothing here performs I/O or
//! keeps state between calls.

pub mod distribution;
pub mod head_to_head;
pub mod history;
pub mod leaderboard;
pub mod player;

pub use distribution::{win_condition_distribution, WinConditionShare};
pub use head_to_head::{head_to_head, HeadToHead};
pub use history::{integrity_report, recent_matches};
pub use leaderboard::{leaderboard, Badge, LeaderboardEntry};
pub use player::{player_stats, total_score, ConditionCount, PlayerStats};

/// `part / whole` as a percentage with one decimal; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use types::{
        MatchRecord, Player, ScoreSheet, WinCondition, WinConditionCatalog, WinConditionId,
    };
    use uuid::Uuid;

    use super::percentage;

    pub fn catalog() -> WinConditionCatalog {
        WinConditionCatalog::new(vec![
            WinCondition::new(1, "Points"),
            WinCondition::new(2, "Military"),
            WinCondition::new(3, "Science"),
        ])
    }

    pub fn record(
        player_1: &Player,
        player_2: &Player,
        winner: Option<&Player>,
        win_condition: Option<WinConditionId>,
    ) -> MatchRecord {
        MatchRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            player_1: player_1.id,
            player_2: player_2.id,
            winner: winner.map(|p| p.id),
            win_condition,
            scores: [ScoreSheet::default(); 2],
            stored_totals: [None; 2],
            time_used_secs: [None; 2],
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 5), 60.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(4, 4), 100.0);
    }
}
