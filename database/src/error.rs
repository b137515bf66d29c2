use thiserror::Error;
use types::MatchError;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Invalid player name: {0:?}")]
    InvalidPlayerName(String),

    #[error("Invalid match: {0}")]
    InvalidMatch(#[from] MatchError),

    #[error("Stored data is inconsistent: {0}")]
    Integrity(String),

    #[error("UUID parsing error: {0}")]
    UuidParsing(#[from] uuid::Error),
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DatabaseError::MatchNotFound(_) | DatabaseError::PlayerNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
