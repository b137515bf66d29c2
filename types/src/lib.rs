pub mod error;
pub mod match_record;
pub mod player;
pub mod score;
pub mod seat;
pub mod win_condition;

pub use error::MatchError;
pub use match_record::{MatchDraft, MatchId, MatchRecord, MatchUpdate, ScoreEdit, TotalMismatch};
pub use player::{Player, PlayerId};
pub use score::{ScoreCategory, ScoreSheet};
pub use seat::Seat;
pub use win_condition::{
    WinCondition, WinConditionCatalog, WinConditionId, DEFAULT_POINTS_CONDITION,
};
