use std::cmp::Ordering;

use clock::ClockOutcome;
use types::{MatchDraft, ScoreSheet, Seat, WinConditionCatalog};

/// Higher category total wins; an exact tie has no winner.
pub fn points_winner(scores: &[ScoreSheet; 2]) -> Option<Seat> {
    match scores[0].total().cmp(&scores[1].total()) {
        Ordering::Greater => Some(Seat::One),
        Ordering::Less => Some(Seat::Two),
        Ordering::Equal => None,
    }
}

/// Combines a finished clock session with the entered score sheets.
pub fn draft_from_outcome(
    outcome: &ClockOutcome,
    catalog: &WinConditionCatalog,
    scores: [ScoreSheet; 2],
) -> MatchDraft {
    let winner_seat = outcome.winner_seat.or_else(|| points_winner(&scores));
    if outcome.needs_points_decision() && winner_seat.is_none() {
        log::info!("Scores are tied, recording the match without a winner");
    }
    let [player_1, player_2] = outcome.participants;
    MatchDraft {
        player_1,
        player_2,
        winner: winner_seat.map(|seat| outcome.participants[seat.index()]),
        win_condition: outcome.win_condition_id(catalog),
        created_at: None,
        scores,
        time_used_secs: outcome.time_used_secs.map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clock::Finish;
    use types::{ScoreCategory, WinCondition};
    use uuid::Uuid;

    fn catalog() -> WinConditionCatalog {
        WinConditionCatalog::new(vec![
            WinCondition::new(1, "Points"),
            WinCondition::new(2, "Military"),
        ])
    }

    fn outcome(winner_seat: Option<Seat>, condition: Finish) -> ClockOutcome {
        let participants = [Uuid::new_v4(), Uuid::new_v4()];
        ClockOutcome {
            participants,
            winner_seat,
            winner_id: winner_seat.map(|seat| participants[seat.index()]),
            condition,
            time_used_secs: [300, 412],
        }
    }

    fn sheets(p1: u32, p2: u32) -> [ScoreSheet; 2] {
        [
            ScoreSheet::default().with(ScoreCategory::Wonders, p1),
            ScoreSheet::default().with(ScoreCategory::Wonders, p2),
        ]
    }

    #[test]
    fn test_points_winner_with_large_scores() {
        let big = crate::input::parse_score_sheet(&["blue=4294967295 green=1"]).unwrap();
        let small = ScoreSheet::default().with(ScoreCategory::Wonders, 5);
        assert_eq!(big.total(), 4_294_967_296);
        assert_eq!(points_winner(&[big, small]), Some(Seat::One));
        assert_eq!(points_winner(&[small, big]), Some(Seat::Two));
    }

    #[test]
    fn test_points_finish_goes_to_higher_total() {
        let outcome = outcome(None, Finish::Points);
        let draft = draft_from_outcome(&outcome, &catalog(), sheets(40, 52));
        assert_eq!(draft.winner, Some(outcome.participants[1]));
        assert_eq!(draft.win_condition, Some(1));
        assert_eq!(draft.time_used_secs, [Some(300), Some(412)]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_points_tie_has_no_winner() {
        let draft = draft_from_outcome(&outcome(None, Finish::Points), &catalog(), sheets(40, 40));
        assert_eq!(draft.winner, None);
    }

    #[test]
    fn test_time_expiry_keeps_clock_winner() {
        let outcome = outcome(Some(Seat::One), Finish::TimeExpired);
        let draft = draft_from_outcome(&outcome, &catalog(), sheets(10, 60));
        assert_eq!(draft.winner, Some(outcome.participants[0]));
        assert_eq!(draft.win_condition, Some(1));
    }

    #[test]
    fn test_instant_victory_condition() {
        let outcome = outcome(
            Some(Seat::Two),
            Finish::Instant(WinCondition::new(2, "Military")),
        );
        let draft = draft_from_outcome(&outcome, &catalog(), sheets(0, 0));
        assert_eq!(draft.winner, Some(outcome.participants[1]));
        assert_eq!(draft.win_condition, Some(2));
    }
}
