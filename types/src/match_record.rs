use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MatchError, PlayerId, ScoreCategory, ScoreSheet, Seat, WinConditionId};

pub type MatchId = Uuid;

/// A stored total that disagrees with the sum of its categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalMismatch {
    pub match_id: MatchId,
    pub seat: Seat,
    pub stored: u64,
    pub computed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub created_at: DateTime<Utc>,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub winner: Option<PlayerId>,
    pub win_condition: Option<WinConditionId>,
    pub scores: [ScoreSheet; 2],
    /// Totals as persisted next to the categories. Never used for statistics.
    pub stored_totals: [Option<u64>; 2],
    pub time_used_secs: [Option<u32>; 2],
}

impl MatchRecord {
    pub fn participant(&self, seat: Seat) -> PlayerId {
        match seat {
            Seat::One => self.player_1,
            Seat::Two => self.player_2,
        }
    }

    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|&seat| self.participant(seat) == player)
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    /// True for a match between `a` and `b` in either seating.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player_1 == a && self.player_2 == b) || (self.player_1 == b && self.player_2 == a)
    }

    pub fn winner_seat(&self) -> Option<Seat> {
        self.winner.and_then(|winner| self.seat_of(winner))
    }

    pub fn sheet(&self, seat: Seat) -> &ScoreSheet {
        &self.scores[seat.index()]
    }

    pub fn total_score(&self, seat: Seat) -> u64 {
        self.sheet(seat).total()
    }

    pub fn total_mismatches(&self) -> Vec<TotalMismatch> {
        Seat::BOTH
            .into_iter()
            .filter_map(|seat| {
                let stored = self.stored_totals[seat.index()]?;
                let computed = self.total_score(seat);
                (stored != computed).then_some(TotalMismatch {
                    match_id: self.id,
                    seat,
                    stored,
                    computed,
                })
            })
            .collect()
    }

    pub fn to_draft(&self) -> MatchDraft {
        MatchDraft {
            player_1: self.player_1,
            player_2: self.player_2,
            winner: self.winner,
            win_condition: self.win_condition,
            created_at: Some(self.created_at),
            scores: self.scores,
            time_used_secs: self.time_used_secs,
        }
    }
}

/// Everything needed to insert a match; id and timestamp are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchDraft {
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub winner: Option<PlayerId>,
    pub win_condition: Option<WinConditionId>,
    pub created_at: Option<DateTime<Utc>>,
    pub scores: [ScoreSheet; 2],
    pub time_used_secs: [Option<u32>; 2],
}

impl MatchDraft {
    pub fn new(player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            player_1,
            player_2,
            winner: None,
            win_condition: None,
            created_at: None,
            scores: [ScoreSheet::default(); 2],
            time_used_secs: [None; 2],
        }
    }

    pub fn participant(&self, seat: Seat) -> PlayerId {
        match seat {
            Seat::One => self.player_1,
            Seat::Two => self.player_2,
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.player_1 == self.player_2 {
            return Err(MatchError::SamePlayers(self.player_1));
        }
        if let Some(winner) = self.winner {
            if winner != self.player_1 && winner != self.player_2 {
                return Err(MatchError::WinnerNotParticipant(winner));
            }
        }
        Ok(())
    }

    pub fn totals(&self) -> [u64; 2] {
        [self.scores[0].total(), self.scores[1].total()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEdit {
    pub seat: Seat,
    pub category: ScoreCategory,
    /// `None` clears an optional category.
    pub value: Option<u32>,
}

/// Partial edit of a stored match. Unset fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub player_1: Option<PlayerId>,
    pub player_2: Option<PlayerId>,
    pub winner: Option<Option<PlayerId>>,
    pub win_condition: Option<Option<WinConditionId>>,
    pub created_at: Option<DateTime<Utc>>,
    pub scores: Vec<ScoreEdit>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.player_1.is_none()
            && self.player_2.is_none()
            && self.winner.is_none()
            && self.win_condition.is_none()
            && self.created_at.is_none()
            && self.scores.is_empty()
    }

    pub fn apply(&self, record: &MatchRecord) -> Result<MatchDraft, MatchError> {
        let mut draft = record.to_draft();
        if let Some(player_1) = self.player_1 {
            draft.player_1 = player_1;
        }
        if let Some(player_2) = self.player_2 {
            draft.player_2 = player_2;
        }
        if let Some(winner) = self.winner {
            draft.winner = winner;
        }
        if let Some(win_condition) = self.win_condition {
            draft.win_condition = win_condition;
        }
        if let Some(created_at) = self.created_at {
            draft.created_at = Some(created_at);
        }
        for edit in &self.scores {
            let sheet = &mut draft.scores[edit.seat.index()];
            match edit.value {
                Some(value) => sheet.set(edit.category, value),
                None => sheet.clear(edit.category)?,
            }
        }
        draft.validate()?;
        Ok(draft)
    }
}
