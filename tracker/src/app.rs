use std::io::Write;

use chrono::{DateTime, Utc};
use clock::{ClockHandle, MatchClock};
use database::MatchStore;
use serde::Serialize;
use stats::{HeadToHead, LeaderboardEntry, WinConditionShare};
use tokio::io::{AsyncBufRead, Lines};
use types::{
    MatchDraft, MatchError, MatchId, MatchRecord, MatchUpdate, Player, ScoreSheet, TotalMismatch,
    WinConditionCatalog, WinConditionId,
};

use crate::{
    config::TrackerConfig,
    error::{Result, TrackerError},
    input::{parse_score_edit, parse_score_sheet, PLAY_HELP},
    recording::{draft_from_outcome, points_winner},
    session::{drive_session, read_scores},
};

/// A match entered by hand. Players and the condition are given by name.
#[derive(Clone, Debug, Default)]
pub struct RecordRequest {
    pub player_1: String,
    pub player_2: String,
    /// Decided from the totals when unset.
    pub winner: Option<String>,
    /// The points condition when unset.
    pub condition: Option<String>,
    /// `category=value` assignments per seat.
    pub scores: [Vec<String>; 2],
}

/// Changes to a stored match. `winner` and `condition` accept `none` to clear.
#[derive(Clone, Debug, Default)]
pub struct EditRequest {
    pub player_1: Option<String>,
    pub player_2: Option<String>,
    pub winner: Option<String>,
    pub condition: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// `<seat>.<category>=<value>` edits.
    pub scores: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatsReport {
    pub players: Vec<Player>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub distribution: Vec<WinConditionShare>,
    pub head_to_head: Vec<HeadToHead>,
    pub integrity: Vec<TotalMismatch>,
}

pub struct Tracker<S: MatchStore> {
    store: S,
    config: TrackerConfig,
    catalog: WinConditionCatalog,
}

impl<S: MatchStore> Tracker<S> {
    pub async fn open(store: S, config: TrackerConfig) -> Result<Self> {
        let catalog = store
            .win_condition_catalog(&config.points_condition)
            .await?;
        if catalog.points().is_none() {
            log::warn!(
                "Win condition catalog has no {:?} entry, points finishes are stored without a condition",
                config.points_condition
            );
        }
        Ok(Self {
            store,
            config,
            catalog,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WinConditionCatalog {
        &self.catalog
    }

    pub async fn player(&self, name: &str) -> Result<Player> {
        self.store
            .get_player_by_name(name)
            .await?
            .ok_or_else(|| TrackerError::UnknownPlayer(name.trim().to_string()))
    }

    pub fn condition(&self, name: &str) -> Result<WinConditionId> {
        self.catalog
            .find_by_name(name)
            .map(|wc| wc.id)
            .ok_or_else(|| TrackerError::UnknownCondition(name.trim().to_string()))
    }

    pub async fn record(&self, request: &RecordRequest) -> Result<MatchRecord> {
        let player_1 = self.player(&request.player_1).await?;
        let player_2 = self.player(&request.player_2).await?;
        let scores = [
            parse_score_sheet(&request.scores[0])?,
            parse_score_sheet(&request.scores[1])?,
        ];

        let winner = match &request.winner {
            Some(name) => Some(self.player(name).await?.id),
            None => points_winner(&scores).map(|seat| [player_1.id, player_2.id][seat.index()]),
        };
        let win_condition = match &request.condition {
            Some(name) => Some(self.condition(name)?),
            None => self.catalog.points().map(|wc| wc.id),
        };

        let draft = MatchDraft {
            winner,
            win_condition,
            scores,
            ..MatchDraft::new(player_1.id, player_2.id)
        };
        Ok(self.store.insert_match(&draft).await?)
    }

    pub async fn edit(&self, id: MatchId, request: &EditRequest) -> Result<MatchRecord> {
        let mut update = MatchUpdate {
            created_at: request.created_at,
            ..Default::default()
        };
        if let Some(name) = &request.player_1 {
            update.player_1 = Some(self.player(name).await?.id);
        }
        if let Some(name) = &request.player_2 {
            update.player_2 = Some(self.player(name).await?.id);
        }
        if let Some(name) = &request.winner {
            update.winner = if is_none(name) {
                Some(None)
            } else {
                Some(Some(self.player(name).await?.id))
            };
        }
        if let Some(name) = &request.condition {
            update.win_condition = if is_none(name) {
                Some(None)
            } else {
                Some(Some(self.condition(name)?))
            };
        }
        update.scores = request
            .scores
            .iter()
            .map(String::as_str)
            .map(parse_score_edit)
            .collect::<Result<_>>()?;

        if update.is_empty() {
            log::info!("Nothing to change on match {id}");
            return Ok(self.store.get_match(id).await?);
        }
        Ok(self.store.update_match(id, &update).await?)
    }

    pub async fn recent(&self, limit: Option<usize>) -> Result<Vec<MatchRecord>> {
        let limit = limit.unwrap_or(self.config.recent_limit);
        Ok(self.store.list_matches(Some(limit)).await?)
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let players = self.store.list_players().await?;
        let matches = self.store.list_matches(None).await?;
        Ok(stats::leaderboard(&players, &matches, &self.catalog))
    }

    pub async fn stats_report(&self) -> Result<StatsReport> {
        let players = self.store.list_players().await?;
        let matches = self.store.list_matches(None).await?;
        Ok(StatsReport {
            leaderboard: stats::leaderboard(&players, &matches, &self.catalog),
            distribution: stats::win_condition_distribution(&matches, &self.catalog),
            head_to_head: stats::head_to_head(&players, &matches),
            integrity: stats::integrity_report(&matches),
            players,
        })
    }

    /// Runs a live match between two roster players, then asks for the
    /// scores and stores the result. Returns `None` if the match was left
    /// unfinished.
    pub async fn play<R, W>(
        &self,
        player_1: &str,
        player_2: &str,
        lines: &mut Lines<R>,
        out: &mut W,
    ) -> Result<Option<MatchRecord>>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let players = [self.player(player_1).await?, self.player(player_2).await?];
        if players[0].id == players[1].id {
            return Err(MatchError::SamePlayers(players[0].id).into());
        }
        let names = players.clone().map(|p| p.name);
        let clock_config = self.config.clock_config();
        let clock = MatchClock::new(players.map(|p| p.id), &clock_config, &self.catalog);
        let handle = ClockHandle::spawn(clock, clock_config.tick_interval);

        writeln!(out, "{PLAY_HELP}")?;
        drive_session(&handle, &self.catalog, &names, lines, out).await?;

        let clock = handle.finish().await?;
        let Some(outcome) = clock.outcome() else {
            writeln!(out, "Match abandoned, nothing recorded")?;
            return Ok(None);
        };

        let scores: [ScoreSheet; 2] = read_scores(lines, out, &names).await?;
        let draft = draft_from_outcome(&outcome, &self.catalog, scores);
        let record = self.store.insert_match(&draft).await?;
        Ok(Some(record))
    }
}

fn is_none(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}
