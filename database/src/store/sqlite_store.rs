use chrono::Utc;
use sqlx::{
    query::Query,
    sqlite::{SqliteArguments, SqlitePool},
    Sqlite,
};
use types::{
    MatchDraft, MatchId, MatchRecord, MatchUpdate, Player, PlayerId, ScoreCategory, Seat,
    WinCondition,
};
use uuid::Uuid;

use super::MatchStore;
use crate::{
    config::DatabaseConfig,
    error::{DatabaseError, Result},
    models::{match_from_row, match_value_columns, player_from_row, query_error, win_condition_from_row},
};

const SELECT_MATCH: &str = "SELECT * FROM games";
const MATCH_ORDER: &str = "ORDER BY created_at DESC, rowid DESC";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the configured database and brings its schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let store = Self::new(config.create_pool().await?);
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player> {
        let row = sqlx::query("SELECT id, name, created_at FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or_else(|| DatabaseError::PlayerNotFound(id.to_string()))?;
        player_from_row(&row)
    }
}

fn insert_sql() -> String {
    let columns = match_value_columns();
    format!(
        "INSERT INTO games (id, created_at, {}) VALUES (?, ?, {})",
        columns.join(", "),
        vec!["?"; columns.len()].join(", ")
    )
}

fn update_sql() -> String {
    let assignments = match_value_columns()
        .into_iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE games SET created_at = ?, {assignments} WHERE id = ?")
}

/// Binds the columns of [`match_value_columns`] in order. Totals are always
/// written from the category sums.
fn bind_match_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    draft: &MatchDraft,
) -> Result<Query<'q, Sqlite, SqliteArguments<'q>>> {
    query = query
        .bind(draft.player_1.to_string())
        .bind(draft.player_2.to_string())
        .bind(draft.winner.map(|id| id.to_string()))
        .bind(draft.win_condition);
    for seat in Seat::BOTH {
        let sheet = &draft.scores[seat.index()];
        for category in ScoreCategory::ALL {
            query = query.bind(sheet.get(category).map(i64::from));
        }
    }
    let totals = draft.totals();
    for seat in Seat::BOTH {
        let total = totals[seat.index()];
        let total = i64::try_from(total)
            .map_err(|_| DatabaseError::Integrity(format!("Total {total} does not fit a column")))?;
        query = query.bind(total);
    }
    for seat in Seat::BOTH {
        query = query.bind(draft.time_used_secs[seat.index()].map(i64::from));
    }
    Ok(query)
}

fn warn_on_mismatch(record: &MatchRecord) {
    for mismatch in record.total_mismatches() {
        tracing::warn!(
            match_id = %mismatch.match_id,
            seat = %mismatch.seat,
            stored = mismatch.stored,
            computed = mismatch.computed,
            "Stored total disagrees with category sum, using the sum"
        );
    }
}

fn record_from_draft(id: MatchId, draft: &MatchDraft) -> MatchRecord {
    let totals = draft.totals();
    MatchRecord {
        id,
        created_at: draft.created_at.unwrap_or_else(Utc::now),
        player_1: draft.player_1,
        player_2: draft.player_2,
        winner: draft.winner,
        win_condition: draft.win_condition,
        scores: draft.scores,
        stored_totals: totals.map(Some),
        time_used_secs: draft.time_used_secs,
    }
}

#[async_trait::async_trait]
impl MatchStore for SqliteStore {
    async fn list_players(&self) -> Result<Vec<Player>> {
        sqlx::query("SELECT id, name, created_at FROM players ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?
            .iter()
            .map(player_from_row)
            .collect()
    }

    async fn add_player(&self, name: &str) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidPlayerName(name.to_string()));
        }
        let player = Player::new(name);
        sqlx::query("INSERT INTO players (id, name, created_at) VALUES (?, ?, ?)")
            .bind(player.id.to_string())
            .bind(&player.name)
            .bind(player.created_at)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        tracing::info!("Added player {} ({})", player.name, player.id);
        Ok(player)
    }

    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidPlayerName(name.to_string()));
        }
        let result = sqlx::query("UPDATE players SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::PlayerNotFound(id.to_string()));
        }
        self.get_player(id).await
    }

    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        sqlx::query("SELECT id, name, created_at FROM players WHERE name = ? COLLATE NOCASE")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .as_ref()
            .map(player_from_row)
            .transpose()
    }

    async fn list_win_conditions(&self) -> Result<Vec<WinCondition>> {
        sqlx::query("SELECT id, name FROM win_conditions ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?
            .iter()
            .map(win_condition_from_row)
            .collect()
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord> {
        let row = sqlx::query(&format!("{SELECT_MATCH} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or(DatabaseError::MatchNotFound(id))?;
        let record = match_from_row(&row)?;
        warn_on_mismatch(&record);
        Ok(record)
    }

    async fn list_matches(&self, limit: Option<usize>) -> Result<Vec<MatchRecord>> {
        // a negative LIMIT means no limit in SQLite
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
        let rows = sqlx::query(&format!("{SELECT_MATCH} {MATCH_ORDER} LIMIT ?"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let records = rows
            .iter()
            .map(match_from_row)
            .collect::<Result<Vec<_>>>()?;
        records.iter().for_each(warn_on_mismatch);
        Ok(records)
    }

    async fn insert_match(&self, draft: &MatchDraft) -> Result<MatchRecord> {
        draft.validate()?;
        let record = record_from_draft(Uuid::new_v4(), draft);
        let sql = insert_sql();
        let query = sqlx::query(&sql)
            .bind(record.id.to_string())
            .bind(record.created_at);
        bind_match_values(query, draft)?
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        tracing::info!("Recorded match {}", record.id);
        Ok(record)
    }

    async fn update_match(&self, id: MatchId, update: &MatchUpdate) -> Result<MatchRecord> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let row = sqlx::query(&format!("{SELECT_MATCH} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?
            .ok_or(DatabaseError::MatchNotFound(id))?;
        let current = match_from_row(&row)?;
        let draft = update.apply(&current)?;
        let record = record_from_draft(id, &draft);

        let sql = update_sql();
        let query = sqlx::query(&sql).bind(record.created_at);
        let result = bind_match_values(query, &draft)?
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::MatchNotFound(id));
        }

        tx.commit().await.map_err(query_error)?;
        tracing::info!("Updated match {id}");
        Ok(record)
    }

    async fn delete_match(&self, id: MatchId) -> Result<()> {
        let result = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::MatchNotFound(id));
        }
        tracing::info!("Deleted match {id}");
        Ok(())
    }
}
