use std::time::Duration;

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use types::{Seat, WinConditionId};

use crate::{
    engine::{ClockCommand, ClockState, MatchClock},
    error::{ClockError, Result},
};

struct Request {
    command: ClockCommand,
    reply: oneshot::Sender<ClockState>,
}

/// Runs a [`MatchClock`] on its own task and ticks it in real time.
///
/// Commands are applied in the order they are sent and always before a tick
/// that became due at the same moment. Every state change is published to
/// subscribers.
pub struct ClockHandle {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<ClockState>,
    task: JoinHandle<MatchClock>,
}

impl ClockHandle {
    pub fn spawn(clock: MatchClock, tick_interval: Duration) -> Self {
        let (requests, receiver) = mpsc::channel(16);
        let (publisher, snapshots) = watch::channel(clock.state().clone());
        let task = tokio::spawn(drive(clock, receiver, publisher, tick_interval));
        Self {
            requests,
            snapshots,
            task,
        }
    }

    /// Applies a command and returns the state right after it.
    pub async fn send(&self, command: ClockCommand) -> Result<ClockState> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| ClockError::SessionClosed)?;
        response.await.map_err(|_| ClockError::SessionClosed)
    }

    pub async fn start(&self, seat: Seat) -> Result<ClockState> {
        self.send(ClockCommand::Start(seat)).await
    }

    pub async fn switch_turn(&self) -> Result<ClockState> {
        self.send(ClockCommand::SwitchTurn).await
    }

    pub async fn toggle_pause(&self) -> Result<ClockState> {
        self.send(ClockCommand::TogglePause).await
    }

    pub async fn advance_age(&self) -> Result<ClockState> {
        self.send(ClockCommand::AdvanceAge).await
    }

    pub async fn confirm_advance_age(&self) -> Result<ClockState> {
        self.send(ClockCommand::ConfirmAdvanceAge).await
    }

    pub async fn cancel_advance_age(&self) -> Result<ClockState> {
        self.send(ClockCommand::CancelAdvanceAge).await
    }

    pub async fn declare_victory(
        &self,
        winner: Seat,
        condition: WinConditionId,
    ) -> Result<ClockState> {
        self.send(ClockCommand::DeclareVictory { winner, condition })
            .await
    }

    pub fn snapshot(&self) -> ClockState {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockState> {
        self.snapshots.clone()
    }

    /// Resolves once the session has a finish, with the final state.
    pub async fn finished(&self) -> Result<ClockState> {
        let mut snapshots = self.snapshots.clone();
        loop {
            {
                let state = snapshots.borrow_and_update();
                if state.is_terminal() {
                    return Ok(state.clone());
                }
            }
            snapshots
                .changed()
                .await
                .map_err(|_| ClockError::SessionClosed)?;
        }
    }

    /// Stops the driver and returns the clock as it was last seen.
    pub async fn finish(self) -> Result<MatchClock> {
        drop(self.requests);
        self.task.await.map_err(|_| ClockError::SessionClosed)
    }
}

async fn drive(
    mut clock: MatchClock,
    mut requests: mpsc::Receiver<Request>,
    publisher: watch::Sender<ClockState>,
    period: Duration,
) -> MatchClock {
    let mut armed_for: Option<Seat> = None;
    let mut ticker: Option<Interval> = None;

    loop {
        let ticking = clock.state().ticking_seat();
        if ticking != armed_for {
            armed_for = ticking;
            ticker = ticking.map(|_| {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                interval
            });
        }

        tokio::select! {
            biased;
            request = requests.recv() => {
                let Some(Request { command, reply }) = request else {
                    break;
                };
                if clock.apply(command) {
                    publisher.send_replace(clock.state().clone());
                }
                let _ = reply.send(clock.state().clone());
            }
            _ = next_tick(&mut ticker) => {
                if clock.tick() {
                    publisher.send_replace(clock.state().clone());
                }
            }
        }
    }

    log::debug!("Clock driver stopped: {}", clock.state());
    clock
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
