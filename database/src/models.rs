use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use types::{MatchRecord, Player, ScoreCategory, ScoreSheet, Seat, WinCondition};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};

/// Column holding one seat's value for one category.
pub fn score_column(seat: Seat, category: ScoreCategory) -> &'static str {
    use ScoreCategory::*;
    match (seat, category) {
        (Seat::One, BlueCards) => "p1_score_blue_cards",
        (Seat::One, GreenCards) => "p1_score_green_cards",
        (Seat::One, YellowCards) => "p1_score_yellow_cards",
        (Seat::One, PurpleCards) => "p1_score_purple_cards",
        (Seat::One, GodsCards) => "p1_score_gods_cards",
        (Seat::One, Wonders) => "p1_score_wonders",
        (Seat::One, Capitol) => "p1_score_capitol",
        (Seat::One, Senate) => "p1_score_senate",
        (Seat::One, Military) => "p1_score_military",
        (Seat::One, Progress) => "p1_score_progress",
        (Seat::One, Coins) => "p1_score_coins",
        (Seat::One, GreatTemple) => "p1_score_great_temple",
        (Seat::One, Naval) => "p1_score_naval",
        (Seat::Two, BlueCards) => "p2_score_blue_cards",
        (Seat::Two, GreenCards) => "p2_score_green_cards",
        (Seat::Two, YellowCards) => "p2_score_yellow_cards",
        (Seat::Two, PurpleCards) => "p2_score_purple_cards",
        (Seat::Two, GodsCards) => "p2_score_gods_cards",
        (Seat::Two, Wonders) => "p2_score_wonders",
        (Seat::Two, Capitol) => "p2_score_capitol",
        (Seat::Two, Senate) => "p2_score_senate",
        (Seat::Two, Military) => "p2_score_military",
        (Seat::Two, Progress) => "p2_score_progress",
        (Seat::Two, Coins) => "p2_score_coins",
        (Seat::Two, GreatTemple) => "p2_score_great_temple",
        (Seat::Two, Naval) => "p2_score_naval",
    }
}

pub fn total_column(seat: Seat) -> &'static str {
    match seat {
        Seat::One => "p1_total_score",
        Seat::Two => "p2_total_score",
    }
}

pub fn time_used_column(seat: Seat) -> &'static str {
    match seat {
        Seat::One => "p1_time_used_secs",
        Seat::Two => "p2_time_used_secs",
    }
}

/// Every column of a stored match except `id` and `created_at`, in bind order.
pub fn match_value_columns() -> Vec<&'static str> {
    let mut columns = vec!["player_1", "player_2", "winner", "win_condition"];
    for seat in Seat::BOTH {
        columns.extend(
            ScoreCategory::ALL
                .iter()
                .map(|&category| score_column(seat, category)),
        );
    }
    columns.extend(Seat::BOTH.map(total_column));
    columns.extend(Seat::BOTH.map(time_used_column));
    columns
}

pub(crate) fn player_from_row(row: &SqliteRow) -> Result<Player> {
    Ok(Player {
        id: read_uuid(row, "id")?,
        name: row.try_get("name").map_err(query_error)?,
        created_at: row.try_get("created_at").map_err(query_error)?,
    })
}

pub(crate) fn win_condition_from_row(row: &SqliteRow) -> Result<WinCondition> {
    Ok(WinCondition {
        id: row.try_get("id").map_err(query_error)?,
        name: row.try_get("name").map_err(query_error)?,
    })
}

pub(crate) fn match_from_row(row: &SqliteRow) -> Result<MatchRecord> {
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(query_error)?;
    let winner = row
        .try_get::<Option<String>, _>("winner")
        .map_err(query_error)?
        .map(|id| Uuid::parse_str(&id))
        .transpose()?;

    let mut scores = [ScoreSheet::default(); 2];
    let mut stored_totals = [None; 2];
    let mut time_used_secs = [None; 2];
    for seat in Seat::BOTH {
        let sheet = &mut scores[seat.index()];
        for category in ScoreCategory::ALL {
            let column = score_column(seat, category);
            match read_optional_points(row, column)? {
                Some(value) => sheet.set(category, value),
                None if category.is_optional() => sheet.clear(category)?,
                None => {
                    return Err(DatabaseError::Integrity(format!(
                        "{column} is empty but required"
                    )))
                }
            }
        }
        stored_totals[seat.index()] = read_optional_total(row, total_column(seat))?;
        time_used_secs[seat.index()] = read_optional_points(row, time_used_column(seat))?;
    }

    Ok(MatchRecord {
        id: read_uuid(row, "id")?,
        created_at,
        player_1: read_uuid(row, "player_1")?,
        player_2: read_uuid(row, "player_2")?,
        winner,
        win_condition: row.try_get("win_condition").map_err(query_error)?,
        scores,
        stored_totals,
        time_used_secs,
    })
}

fn read_uuid(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let id: String = row.try_get(column).map_err(query_error)?;
    Ok(Uuid::parse_str(&id)?)
}

fn read_optional_points(row: &SqliteRow, column: &str) -> Result<Option<u32>> {
    let value: Option<i64> = row.try_get(column).map_err(query_error)?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                DatabaseError::Integrity(format!("{column} holds out of range value {v}"))
            })
        })
        .transpose()
}

fn read_optional_total(row: &SqliteRow, column: &str) -> Result<Option<u64>> {
    let value: Option<i64> = row.try_get(column).map_err(query_error)?;
    value
        .map(|v| {
            u64::try_from(v).map_err(|_| {
                DatabaseError::Integrity(format!("{column} holds out of range value {v}"))
            })
        })
        .transpose()
}

pub(crate) fn query_error(e: sqlx::Error) -> DatabaseError {
    DatabaseError::Query(e.to_string())
}
