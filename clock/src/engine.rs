use std::fmt::Display;

use serde::{Deserialize, Serialize};
use types::{PlayerId, Seat, WinCondition, WinConditionCatalog, WinConditionId};

use crate::{config::ClockConfig, outcome::ClockOutcome};

pub const FIRST_AGE: u8 = 1;
pub const FINAL_AGE: u8 = 3;

/// How a clock session ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finish {
    /// The active player ran out of time; the other player wins.
    TimeExpired,
    /// The last age was closed; the winner follows from the score sheets.
    Points,
    /// A player claimed one of the catalog's instant victories.
    Instant(WinCondition),
}

impl Display for Finish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finish::TimeExpired => write!(f, "time expired"),
            Finish::Points => write!(f, "points"),
            Finish::Instant(condition) => write!(f, "{}", condition.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub time_remaining: [u32; 2],
    pub active_player: Option<Seat>,
    pub is_running: bool,
    pub age: u8,
    pub winner: Option<Seat>,
    pub win_condition: Option<Finish>,
    pub age_advance_pending: bool,
}

impl ClockState {
    pub fn initial(session_length_secs: u32) -> Self {
        Self {
            time_remaining: [session_length_secs; 2],
            active_player: None,
            is_running: false,
            age: FIRST_AGE,
            winner: None,
            win_condition: None,
            age_advance_pending: false,
        }
    }

    pub fn remaining(&self, seat: Seat) -> u32 {
        self.time_remaining[seat.index()]
    }

    pub fn is_terminal(&self) -> bool {
        self.win_condition.is_some()
    }

    /// The seat whose time is draining, if any. Ticks are only scheduled while this is set.
    pub fn ticking_seat(&self) -> Option<Seat> {
        if self.is_running && !self.is_terminal() {
            self.active_player
        } else {
            None
        }
    }
}

impl Display for ClockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seats = Seat::BOTH
            .iter()
            .map(|&seat| {
                let marker = if self.active_player == Some(seat) {
                    if self.is_running {
                        " *"
                    } else {
                        " (paused)"
                    }
                } else {
                    ""
                };
                format!("{seat} {}{marker}", format_time(self.remaining(seat)))
            })
            .collect::<Vec<_>>()
            .join(" | ");
        write!(f, "Age {} | {seats}", self.age)?;
        if let Some(finish) = &self.win_condition {
            match self.winner {
                Some(winner) => write!(f, " | {winner} wins ({finish})")?,
                None => write!(f, " | finished ({finish})")?,
            }
        }
        Ok(())
    }
}

pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockCommand {
    Start(Seat),
    SwitchTurn,
    TogglePause,
    AdvanceAge,
    ConfirmAdvanceAge,
    CancelAdvanceAge,
    DeclareVictory {
        winner: Seat,
        condition: WinConditionId,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgeControl {
    /// A request to close the current age is waiting for confirmation.
    ConfirmationRequested,
    /// The final age was closed and the session ended on points.
    PointsFinish,
    Ignored,
}

/// Turn-based countdown for one match session.
///
/// Every operation that does not make sense in the current state is ignored and
/// leaves the state untouched.
#[derive(Clone, Debug)]
pub struct MatchClock {
    participants: [PlayerId; 2],
    session_length_secs: u32,
    instant_conditions: Vec<WinCondition>,
    state: ClockState,
}

impl MatchClock {
    pub fn new(
        participants: [PlayerId; 2],
        config: &ClockConfig,
        catalog: &WinConditionCatalog,
    ) -> Self {
        Self {
            participants,
            session_length_secs: config.session_length_secs,
            instant_conditions: catalog.instant_victory_conditions(),
            state: ClockState::initial(config.session_length_secs),
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn participants(&self) -> [PlayerId; 2] {
        self.participants
    }

    pub fn session_length_secs(&self) -> u32 {
        self.session_length_secs
    }

    pub fn instant_conditions(&self) -> &[WinCondition] {
        &self.instant_conditions
    }

    pub fn apply(&mut self, command: ClockCommand) -> bool {
        match command {
            ClockCommand::Start(seat) => self.start(seat),
            ClockCommand::SwitchTurn => self.switch_turn(),
            ClockCommand::TogglePause => self.toggle_pause(),
            ClockCommand::AdvanceAge => self.advance_age() != AgeControl::Ignored,
            ClockCommand::ConfirmAdvanceAge => self.confirm_advance_age(),
            ClockCommand::CancelAdvanceAge => self.cancel_advance_age(),
            ClockCommand::DeclareVictory { winner, condition } => {
                self.declare_victory(winner, condition)
            }
        }
    }

    pub fn start(&mut self, seat: Seat) -> bool {
        if self.state.is_terminal() || self.state.active_player.is_some() {
            log::debug!("Ignoring start for {seat}: clock already started or finished");
            return false;
        }
        self.state.active_player = Some(seat);
        self.state.is_running = true;
        log::info!("{seat} starts the match");
        true
    }

    /// Ends the active player's turn; the clock always runs for the next player.
    pub fn switch_turn(&mut self) -> bool {
        if self.state.is_terminal() {
            log::debug!("Ignoring turn switch: match is over");
            return false;
        }
        let Some(active) = self.state.active_player else {
            log::debug!("Ignoring turn switch: no turn has started");
            return false;
        };
        self.state.active_player = Some(active.other());
        self.state.is_running = true;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state.is_terminal() || self.state.active_player.is_none() {
            log::debug!("Ignoring pause toggle: no turn in progress");
            return false;
        }
        self.state.is_running = !self.state.is_running;
        true
    }

    /// One elapsed second for the active player.
    pub fn tick(&mut self) -> bool {
        let Some(seat) = self.state.ticking_seat() else {
            return false;
        };
        let remaining = &mut self.state.time_remaining[seat.index()];
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.state.is_running = false;
            self.state.winner = Some(seat.other());
            self.state.win_condition = Some(Finish::TimeExpired);
            self.state.age_advance_pending = false;
            log::info!("{seat} ran out of time, {} wins", seat.other());
        }
        true
    }

    /// Closes the current age. Before the final age this only raises a
    /// confirmation request; in the final age the session ends on points.
    pub fn advance_age(&mut self) -> AgeControl {
        if self.state.is_terminal() {
            log::debug!("Ignoring age advance: match is over");
            return AgeControl::Ignored;
        }
        if self.state.age < FINAL_AGE {
            self.state.age_advance_pending = true;
            return AgeControl::ConfirmationRequested;
        }
        self.state.is_running = false;
        self.state.age_advance_pending = false;
        self.state.win_condition = Some(Finish::Points);
        log::info!("Final age closed, match goes to scoring");
        AgeControl::PointsFinish
    }

    pub fn confirm_advance_age(&mut self) -> bool {
        if !self.state.age_advance_pending
            || self.state.is_terminal()
            || self.state.age >= FINAL_AGE
        {
            log::debug!("Ignoring age confirmation: nothing to confirm");
            return false;
        }
        self.state.age += 1;
        self.state.age_advance_pending = false;
        log::info!("Age {} begins", self.state.age);
        true
    }

    pub fn cancel_advance_age(&mut self) -> bool {
        if !self.state.age_advance_pending {
            return false;
        }
        self.state.age_advance_pending = false;
        true
    }

    /// Accepts any catalog condition except the generic points condition.
    pub fn declare_victory(&mut self, winner: Seat, condition: WinConditionId) -> bool {
        if self.state.is_terminal() {
            log::debug!("Ignoring victory for {winner}: match is over");
            return false;
        }
        let Some(condition) = self
            .instant_conditions
            .iter()
            .find(|wc| wc.id == condition)
            .cloned()
        else {
            log::debug!("Ignoring victory for {winner}: {condition} is not an instant victory");
            return false;
        };
        log::info!("{winner} wins by {condition}");
        self.state.is_running = false;
        self.state.age_advance_pending = false;
        self.state.winner = Some(winner);
        self.state.win_condition = Some(Finish::Instant(condition));
        true
    }

    pub fn time_used(&self) -> [u32; 2] {
        Seat::BOTH.map(|seat| {
            self.session_length_secs
                .saturating_sub(self.state.remaining(seat))
        })
    }

    /// The hand-off for match recording; `None` until the session has ended.
    pub fn outcome(&self) -> Option<ClockOutcome> {
        let condition = self.state.win_condition.clone()?;
        let winner_seat = self.state.winner;
        Some(ClockOutcome {
            participants: self.participants,
            winner_seat,
            winner_id: winner_seat.map(|seat| self.participants[seat.index()]),
            condition,
            time_used_secs: self.time_used(),
        })
    }
}
