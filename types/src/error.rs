use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("A match needs two different players, got {0} twice")]
    SamePlayers(Uuid),

    #[error("Winner {0} is not one of the match participants")]
    WinnerNotParticipant(Uuid),

    #[error("Unknown seat: {0} (expected 1 or 2)")]
    UnknownSeat(String),

    #[error("Unknown score category: {0}")]
    UnknownCategory(String),

    #[error("Score category {0} cannot be cleared")]
    RequiredCategory(String),
}
