//! Match persistence against an in-memory SQLite database with the embedded
//! migrations applied.

use chrono::{Duration, Utc};
use database::{DatabaseConfig, DatabaseError, MatchStore, SqliteStore};
use types::{
    MatchDraft, MatchError, MatchUpdate, Player, ScoreCategory, ScoreEdit, ScoreSheet, Seat,
};
use uuid::Uuid;

async fn store() -> SqliteStore {
    SqliteStore::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("Failed to open in-memory database")
}

async fn two_players(store: &SqliteStore) -> (Player, Player) {
    let ada = store.add_player("Ada").await.unwrap();
    let bo = store.add_player("Bo").await.unwrap();
    (ada, bo)
}

fn draft(p1: &Player, p2: &Player) -> MatchDraft {
    let mut draft = MatchDraft::new(p1.id, p2.id);
    draft.winner = Some(p1.id);
    draft.win_condition = Some(1);
    draft.scores = [
        ScoreSheet::default()
            .with(ScoreCategory::BlueCards, 12)
            .with(ScoreCategory::Wonders, 9)
            .with(ScoreCategory::Coins, 4),
        ScoreSheet::default()
            .with(ScoreCategory::GreenCards, 7)
            .with(ScoreCategory::Naval, 5),
    ];
    draft
}

#[tokio::test]
async fn test_insert_and_load_match() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let mut draft = draft(&ada, &bo);
    draft.time_used_secs = [Some(610), Some(742)];

    let inserted = store.insert_match(&draft).await.unwrap();
    assert_eq!(inserted.stored_totals, [Some(25), Some(12)]);

    let loaded = store.get_match(inserted.id).await.unwrap();
    assert_eq!(loaded.player_1, ada.id);
    assert_eq!(loaded.player_2, bo.id);
    assert_eq!(loaded.winner, Some(ada.id));
    assert_eq!(loaded.win_condition, Some(1));
    assert_eq!(loaded.scores, draft.scores);
    assert_eq!(loaded.sheet(Seat::One).naval, None);
    assert_eq!(loaded.sheet(Seat::Two).naval, Some(5));
    assert_eq!(loaded.stored_totals, [Some(25), Some(12)]);
    assert_eq!(loaded.time_used_secs, [Some(610), Some(742)]);
    assert!(loaded.total_mismatches().is_empty());
}

#[tokio::test]
async fn test_totals_beyond_category_range_round_trip() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let mut draft = MatchDraft::new(ada.id, bo.id);
    draft.scores[0] = ScoreSheet::default()
        .with(ScoreCategory::BlueCards, u32::MAX)
        .with(ScoreCategory::GreenCards, 1);

    let inserted = store.insert_match(&draft).await.unwrap();
    let expected = u64::from(u32::MAX) + 1;
    assert_eq!(inserted.stored_totals, [Some(expected), Some(0)]);

    let loaded = store.get_match(inserted.id).await.unwrap();
    assert_eq!(loaded.total_score(Seat::One), expected);
    assert_eq!(loaded.stored_totals, [Some(expected), Some(0)]);
    assert!(loaded.total_mismatches().is_empty());
}

#[tokio::test]
async fn test_invalid_matches_are_rejected_before_writing() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;

    let same = MatchDraft::new(ada.id, ada.id);
    assert!(matches!(
        store.insert_match(&same).await,
        Err(DatabaseError::InvalidMatch(MatchError::SamePlayers(_)))
    ));

    let mut outsider = draft(&ada, &bo);
    outsider.winner = Some(Uuid::new_v4());
    assert!(matches!(
        store.insert_match(&outsider).await,
        Err(DatabaseError::InvalidMatch(MatchError::WinnerNotParticipant(_)))
    ));

    assert!(store.list_matches(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_player_is_a_query_error() {
    let store = store().await;
    let (ada, _) = two_players(&store).await;
    let stranger = Player::new("Stranger");
    let result = store.insert_match(&MatchDraft::new(ada.id, stranger.id)).await;
    assert!(matches!(result, Err(DatabaseError::Query(_))));
}

#[tokio::test]
async fn test_matches_are_listed_newest_first() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let now = Utc::now();

    let mut ids = Vec::new();
    for days_ago in [3, 0, 7, 1, 5, 2] {
        let mut draft = draft(&ada, &bo);
        draft.created_at = Some(now - Duration::days(days_ago));
        ids.push((days_ago, store.insert_match(&draft).await.unwrap().id));
    }
    ids.sort_by_key(|(days_ago, _)| *days_ago);

    let all = store.list_matches(None).await.unwrap();
    assert_eq!(
        all.iter().map(|m| m.id).collect::<Vec<_>>(),
        ids.iter().map(|(_, id)| *id).collect::<Vec<_>>()
    );

    let recent = store.list_matches(Some(5)).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, ids[0].1);
}

#[tokio::test]
async fn test_update_match_in_place() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let inserted = store.insert_match(&draft(&ada, &bo)).await.unwrap();

    let update = MatchUpdate {
        winner: Some(Some(bo.id)),
        win_condition: Some(Some(3)),
        scores: vec![
            ScoreEdit {
                seat: Seat::Two,
                category: ScoreCategory::Progress,
                value: Some(30),
            },
            ScoreEdit {
                seat: Seat::Two,
                category: ScoreCategory::Naval,
                value: None,
            },
        ],
        ..Default::default()
    };
    let updated = store.update_match(inserted.id, &update).await.unwrap();
    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.created_at, inserted.created_at);

    let loaded = store.get_match(inserted.id).await.unwrap();
    assert_eq!(loaded.winner, Some(bo.id));
    assert_eq!(loaded.win_condition, Some(3));
    assert_eq!(loaded.sheet(Seat::Two).progress, 30);
    assert_eq!(loaded.sheet(Seat::Two).naval, None);
    assert_eq!(loaded.stored_totals, [Some(25), Some(37)]);
}

#[tokio::test]
async fn test_update_rejects_invalid_result() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let inserted = store.insert_match(&draft(&ada, &bo)).await.unwrap();

    let update = MatchUpdate {
        player_2: Some(ada.id),
        winner: Some(None),
        ..Default::default()
    };
    assert!(matches!(
        store.update_match(inserted.id, &update).await,
        Err(DatabaseError::InvalidMatch(MatchError::SamePlayers(_)))
    ));
    let loaded = store.get_match(inserted.id).await.unwrap();
    assert_eq!(loaded.player_2, bo.id);
}

#[tokio::test]
async fn test_missing_match_is_not_found() {
    let store = store().await;
    let id = Uuid::new_v4();

    let err = store.get_match(id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, DatabaseError::MatchNotFound(missing) if missing == id));

    assert!(matches!(
        store.update_match(id, &MatchUpdate::default()).await,
        Err(DatabaseError::MatchNotFound(_))
    ));
    assert!(matches!(
        store.delete_match(id).await,
        Err(DatabaseError::MatchNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_match() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let kept = store.insert_match(&draft(&ada, &bo)).await.unwrap();
    let gone = store.insert_match(&draft(&bo, &ada)).await.unwrap();

    store.delete_match(gone.id).await.unwrap();

    assert!(store.get_match(gone.id).await.unwrap_err().is_not_found());
    let remaining: Vec<_> = store
        .list_matches(None)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(remaining, vec![kept.id]);
}

#[tokio::test]
async fn test_stale_stored_total_is_reported_not_trusted() {
    let store = store().await;
    let (ada, bo) = two_players(&store).await;
    let inserted = store.insert_match(&draft(&ada, &bo)).await.unwrap();

    sqlx::query("UPDATE games SET p1_total_score = 99 WHERE id = ?")
        .bind(inserted.id.to_string())
        .execute(store.pool())
        .await
        .unwrap();

    let loaded = store.get_match(inserted.id).await.unwrap();
    assert_eq!(loaded.total_score(Seat::One), 25);
    let mismatches = loaded.total_mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].stored, 99);
    assert_eq!(mismatches[0].computed, 25);
}
