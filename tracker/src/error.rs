use clock::ClockError;
use database::DatabaseError;
use thiserror::Error;
use types::MatchError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not understand {0:?}")]
    Input(String),

    #[error("No player named {0:?}")]
    UnknownPlayer(String),

    #[error("No win condition named {0:?}")]
    UnknownCondition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
