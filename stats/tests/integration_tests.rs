use chrono::Utc;
use stats::{head_to_head, leaderboard, total_score, win_condition_distribution, Badge};
use types::{
    MatchRecord, Player, ScoreCategory, ScoreSheet, Seat, WinCondition, WinConditionCatalog,
};
use uuid::Uuid;

fn catalog() -> WinConditionCatalog {
    WinConditionCatalog::new(vec![
        WinCondition::new(1, "Points"),
        WinCondition::new(2, "Military"),
        WinCondition::new(3, "Science"),
        WinCondition::new(4, "Senate"),
        WinCondition::new(5, "Naval"),
    ])
}

fn sheet(values: &[(ScoreCategory, u32)]) -> ScoreSheet {
    values
        .iter()
        .fold(ScoreSheet::default(), |sheet, &(category, value)| {
            sheet.with(category, value)
        })
}

/// A points match where the higher total wins.
fn points_match(p1: &Player, p2: &Player, scores: [ScoreSheet; 2]) -> MatchRecord {
    let winner = match scores[0].total().cmp(&scores[1].total()) {
        std::cmp::Ordering::Greater => Some(p1.id),
        std::cmp::Ordering::Less => Some(p2.id),
        std::cmp::Ordering::Equal => None,
    };
    MatchRecord {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        player_1: p1.id,
        player_2: p2.id,
        winner,
        win_condition: Some(1),
        scores,
        stored_totals: [Some(scores[0].total()), Some(scores[1].total())],
        time_used_secs: [None; 2],
    }
}

fn instant_match(p1: &Player, p2: &Player, winner: &Player, condition: i64) -> MatchRecord {
    MatchRecord {
        winner: Some(winner.id),
        win_condition: Some(condition),
        stored_totals: [None; 2],
        ..points_match(p1, p2, [ScoreSheet::default(); 2])
    }
}

#[test]
fn test_season_summary() {
    let ada = Player::new("Ada");
    let bo = Player::new("Bo");
    let cy = Player::new("Cy");
    let roster = vec![ada.clone(), bo.clone(), cy.clone()];

    let matches = vec![
        points_match(
            &ada,
            &bo,
            [
                sheet(&[
                    (ScoreCategory::BlueCards, 14),
                    (ScoreCategory::Wonders, 9),
                    (ScoreCategory::Naval, 2),
                ]),
                sheet(&[(ScoreCategory::GreenCards, 6), (ScoreCategory::Coins, 11)]),
            ],
        ),
        instant_match(&bo, &ada, &bo, 2),
        instant_match(&ada, &bo, &ada, 3),
        points_match(
            &bo,
            &ada,
            [
                sheet(&[(ScoreCategory::Senate, 4)]),
                sheet(&[(ScoreCategory::Senate, 4)]),
            ],
        ),
    ];

    assert_eq!(total_score(&matches[0], Seat::One), 25);
    assert_eq!(total_score(&matches[0], Seat::Two), 17);

    let board = leaderboard(&roster, &matches, &catalog());
    assert_eq!(board[0].stats.name, "Ada");
    assert_eq!(board[0].stats.wins, 2);
    assert_eq!(board[0].stats.games_played, 4);
    assert_eq!(board[0].stats.win_rate, 50.0);
    assert_eq!(board[0].badge, Some(Badge::Gold));
    assert_eq!(board[1].stats.name, "Bo");
    assert_eq!(board[1].stats.win_rate, 25.0);
    assert_eq!(board[2].stats.name, "Cy");
    assert_eq!(board[2].stats.games_played, 0);
    assert_eq!(board[2].stats.win_rate, 0.0);

    let table = head_to_head(&roster, &matches);
    assert_eq!(table.len(), 1);
    assert_eq!((table[0].wins_a, table[0].wins_b, table[0].total), (2, 1, 4));

    let shares = win_condition_distribution(&matches, &catalog());
    assert_eq!(shares[0].condition.name, "Points");
    assert_eq!(shares[0].count, 2);
    assert_eq!(shares[0].percentage, 50.0);
    assert_eq!(shares.len(), 5);
    let sum: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((sum - 100.0).abs() <= 0.1);
}
