use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Clock session has already ended")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, ClockError>;
