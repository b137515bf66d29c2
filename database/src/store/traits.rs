use async_trait::async_trait;
use types::{
    MatchDraft, MatchId, MatchRecord, MatchUpdate, Player, PlayerId, WinCondition,
    WinConditionCatalog,
};

use crate::error::Result;

/// Persistence collaborator for players, the win-condition catalog and matches.
///
/// Implementations report a missing match as [`crate::DatabaseError::MatchNotFound`]
/// and never retry a failed write.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Ordered by name.
    async fn list_players(&self) -> Result<Vec<Player>>;
    async fn add_player(&self, name: &str) -> Result<Player>;
    async fn rename_player(&self, id: PlayerId, name: &str) -> Result<Player>;
    /// Case-insensitive.
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>>;

    /// Ordered by id.
    async fn list_win_conditions(&self) -> Result<Vec<WinCondition>>;

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord>;
    /// Newest first; `None` returns every match.
    async fn list_matches(&self, limit: Option<usize>) -> Result<Vec<MatchRecord>>;
    async fn insert_match(&self, draft: &MatchDraft) -> Result<MatchRecord>;
    async fn update_match(&self, id: MatchId, update: &MatchUpdate) -> Result<MatchRecord>;
    async fn delete_match(&self, id: MatchId) -> Result<()>;

    async fn win_condition_catalog(&self, points_name: &str) -> Result<WinConditionCatalog> {
        let entries = self.list_win_conditions().await?;
        Ok(WinConditionCatalog::with_points_name(entries, points_name))
    }
}
