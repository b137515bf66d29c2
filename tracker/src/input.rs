use regex::{Captures, Regex};
use types::{ScoreCategory, ScoreEdit, ScoreSheet, Seat};

use crate::error::{Result, TrackerError};

/// One line typed during a live match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayInput {
    /// Starts the match for this seat, or ends this seat's turn.
    Turn(Seat),
    Pause,
    Age,
    Confirm,
    Cancel,
    Win { seat: Seat, condition: String },
    Status,
    Quit,
}

pub const PLAY_HELP: &str = "Commands: 1/2 start or end that player's turn | p pause/resume | age close the age | yes/no answer a question | win <1|2> <condition> | quit";

pub fn parse_play_input(line: &str) -> Result<PlayInput> {
    let input = line.trim().to_lowercase();
    let input = input.as_str();

    let seat_re = Regex::new(r"^(?<seat>[12])$").expect("Valid seat regex");
    if let Some(caps) = seat_re.captures(input) {
        return Ok(PlayInput::Turn(seat_from_captures(&caps)?));
    }

    let win_re =
        Regex::new(r"^win\s+(?<seat>[12])\s+(?<condition>\S.*)$").expect("Valid win regex");
    if let Some(caps) = win_re.captures(input) {
        let condition = caps
            .name("condition")
            .expect("condition is a required group")
            .as_str()
            .trim()
            .to_string();
        return Ok(PlayInput::Win {
            seat: seat_from_captures(&caps)?,
            condition,
        });
    }

    let keyword = match input {
        "p" | "pause" => PlayInput::Pause,
        "age" | "a" => PlayInput::Age,
        "y" | "yes" => PlayInput::Confirm,
        "n" | "no" => PlayInput::Cancel,
        "" | "s" | "status" => PlayInput::Status,
        "q" | "quit" => PlayInput::Quit,
        _ => return Err(TrackerError::Input(line.trim().to_string())),
    };
    Ok(keyword)
}

fn seat_from_captures(caps: &Captures) -> Result<Seat> {
    Ok(caps
        .name("seat")
        .expect("seat is a required group")
        .as_str()
        .parse()?)
}

/// Parses `category=value`, e.g. `blue=12`.
pub fn parse_score(input: &str) -> Result<(ScoreCategory, u32)> {
    let re = Regex::new(r"^(?<category>[a-z]+)\s*=\s*(?<value>\d+)$").expect("Valid score regex");
    let normalized = input.trim().to_lowercase();
    let caps = re
        .captures(&normalized)
        .ok_or_else(|| TrackerError::Input(input.trim().to_string()))?;
    let category = caps
        .name("category")
        .expect("category is a required group")
        .as_str()
        .parse()?;
    let value = parse_points(input, &caps["value"])?;
    Ok((category, value))
}

/// A whole sheet from assignments separated by spaces or commas. Categories
/// that are not mentioned stay at zero, naval stays absent.
pub fn parse_score_sheet<S: AsRef<str>>(assignments: &[S]) -> Result<ScoreSheet> {
    let mut sheet = ScoreSheet::default();
    for assignment in assignments {
        for part in assignment
            .as_ref()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
        {
            let (category, value) = parse_score(part)?;
            sheet.set(category, value);
        }
    }
    Ok(sheet)
}

/// Parses `<seat>.<category>=<value>`; an empty value clears the category.
pub fn parse_score_edit(input: &str) -> Result<ScoreEdit> {
    let re = Regex::new(r"^(?<seat>[12])\.(?<category>[a-z]+)\s*=\s*(?<value>\d*)$")
        .expect("Valid score edit regex");
    let normalized = input.trim().to_lowercase();
    let caps = re
        .captures(&normalized)
        .ok_or_else(|| TrackerError::Input(input.trim().to_string()))?;
    let value = match &caps["value"] {
        "" => None,
        digits => Some(parse_points(input, digits)?),
    };
    Ok(ScoreEdit {
        seat: seat_from_captures(&caps)?,
        category: caps["category"].parse()?,
        value,
    })
}

fn parse_points(input: &str, digits: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| TrackerError::Input(input.trim().to_string()))
}
