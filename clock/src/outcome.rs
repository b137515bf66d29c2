use serde::{Deserialize, Serialize};
use types::{PlayerId, Seat, WinConditionCatalog, WinConditionId};

use crate::engine::Finish;

/// What a finished session hands over to match recording.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockOutcome {
    pub participants: [PlayerId; 2],
    /// Unset for a points finish; the score sheets decide that winner.
    pub winner_seat: Option<Seat>,
    pub winner_id: Option<PlayerId>,
    pub condition: Finish,
    /// Session length minus remaining time, per seat.
    pub time_used_secs: [u32; 2],
}

impl ClockOutcome {
    pub fn win_condition_name(&self) -> String {
        self.condition.to_string()
    }

    /// The catalog entry to persist. Running out of time is recorded as a
    /// points win.
    pub fn win_condition_id(&self, catalog: &WinConditionCatalog) -> Option<WinConditionId> {
        match &self.condition {
            Finish::TimeExpired | Finish::Points => catalog.points().map(|wc| wc.id),
            Finish::Instant(condition) => Some(condition.id),
        }
    }

    pub fn needs_points_decision(&self) -> bool {
        self.winner_seat.is_none()
    }
}
