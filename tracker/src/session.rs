use std::io::Write;

use clock::{ClockHandle, ClockState};
use tokio::io::{AsyncBufRead, Lines};
use types::{ScoreCategory, ScoreSheet, Seat, WinConditionCatalog};

use crate::{
    error::{Result, TrackerError},
    input::{parse_play_input, parse_score_sheet, PlayInput},
    render::render_clock,
};

/// Feeds typed commands to a running clock until the session ends, the user
/// quits, or input runs out.
pub async fn drive_session<R, W>(
    handle: &ClockHandle,
    catalog: &WinConditionCatalog,
    names: &[String; 2],
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", render_clock(&handle.snapshot(), names))?;
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            state = handle.finished() => {
                writeln!(out, "{}", render_clock(&state?, names))?;
                return Ok(());
            }
        };
        let Some(line) = line else {
            log::info!("Input closed, leaving the match unfinished");
            return Ok(());
        };

        let input = match parse_play_input(&line) {
            Ok(input) => input,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if input == PlayInput::Quit {
            return Ok(());
        }

        let state = apply_input(handle, catalog, names, input, out).await?;
        writeln!(out, "{}", render_clock(&state, names))?;
        if state.is_terminal() {
            return Ok(());
        }
    }
}

async fn apply_input<W: Write>(
    handle: &ClockHandle,
    catalog: &WinConditionCatalog,
    names: &[String; 2],
    input: PlayInput,
    out: &mut W,
) -> Result<ClockState> {
    let state = handle.snapshot();
    let next = match input {
        PlayInput::Turn(seat) => match state.active_player {
            None => handle.start(seat).await?,
            Some(active) if active == seat => handle.switch_turn().await?,
            Some(_) => {
                writeln!(out, "It is not {}'s turn", names[seat.index()])?;
                state
            }
        },
        PlayInput::Pause => handle.toggle_pause().await?,
        PlayInput::Age => handle.advance_age().await?,
        PlayInput::Confirm => handle.confirm_advance_age().await?,
        PlayInput::Cancel => handle.cancel_advance_age().await?,
        PlayInput::Win { seat, condition } => {
            match catalog
                .find_by_name(&condition)
                .filter(|wc| !catalog.is_points(wc.id))
            {
                Some(wc) => handle.declare_victory(seat, wc.id).await?,
                None => {
                    let choices = catalog
                        .instant_victory_conditions()
                        .into_iter()
                        .map(|wc| wc.name)
                        .collect::<Vec<_>>()
                        .join(", ");
                    writeln!(out, "Unknown victory {condition:?}, choose one of: {choices}")?;
                    state
                }
            }
        }
        PlayInput::Status | PlayInput::Quit => state,
    };
    Ok(next)
}

/// Prompts for each player's sheet until it parses. Empty lines mean zero.
pub async fn read_scores<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    names: &[String; 2],
) -> Result<[ScoreSheet; 2]>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let keys = ScoreCategory::ALL.map(|c| c.key()).join(", ");
    writeln!(out, "Enter scores as category=value ({keys})")?;
    let mut sheets = [ScoreSheet::default(); 2];
    for seat in Seat::BOTH {
        loop {
            write!(out, "{} >> ", names[seat.index()])?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                return Err(TrackerError::Input(
                    "input ended before scores were entered".to_string(),
                ));
            };
            match parse_score_sheet(&[line]) {
                Ok(sheet) => {
                    writeln!(out, "{} total: {}", names[seat.index()], sheet.total())?;
                    sheets[seat.index()] = sheet;
                    break;
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clock::{ClockConfig, Finish, MatchClock};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use types::WinCondition;
    use uuid::Uuid;

    fn catalog() -> WinConditionCatalog {
        WinConditionCatalog::new(vec![
            WinCondition::new(1, "Points"),
            WinCondition::new(2, "Military"),
            WinCondition::new(3, "Science"),
        ])
    }

    fn names() -> [String; 2] {
        ["Ada".to_string(), "Bo".to_string()]
    }

    fn spawn(session_length_secs: u32) -> ClockHandle {
        let config = ClockConfig::with_session_length(session_length_secs);
        let clock = MatchClock::new([Uuid::new_v4(), Uuid::new_v4()], &config, &catalog());
        ClockHandle::spawn(clock, config.tick_interval)
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ends_on_victory() {
        let handle = spawn(1500);
        let input = "1\nwin 2 points\n3\n1\nwin 2 science\n1\n";
        let mut lines = BufReader::new(input.as_bytes()).lines();
        let mut out = Vec::new();

        drive_session(&handle, &catalog(), &names(), &mut lines, &mut out)
            .await
            .unwrap();

        let state = handle.snapshot();
        assert_eq!(state.winner, Some(Seat::Two));
        assert_eq!(
            state.win_condition,
            Some(Finish::Instant(WinCondition::new(3, "Science")))
        );
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unknown victory \"points\""));
        assert!(printed.contains("Could not understand \"3\""));
        assert!(printed.contains("Bo wins by Science"));
        // the line after the victory is left unread
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_player_cannot_end_turn() {
        let handle = spawn(1500);
        let mut lines = BufReader::new("2\n1\n".as_bytes()).lines();
        let mut out = Vec::new();

        drive_session(&handle, &catalog(), &names(), &mut lines, &mut out)
            .await
            .unwrap();

        assert_eq!(handle.snapshot().active_player, Some(Seat::Two));
        assert!(String::from_utf8(out).unwrap().contains("It is not Ada's turn"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ends_when_time_runs_out() {
        let handle = spawn(2);
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"2\n").await.unwrap();
        let mut lines = BufReader::new(reader).lines();
        let mut out = Vec::new();

        drive_session(&handle, &catalog(), &names(), &mut lines, &mut out)
            .await
            .unwrap();

        let state = handle.snapshot();
        assert_eq!(state.winner, Some(Seat::One));
        assert_eq!(state.win_condition, Some(Finish::TimeExpired));
        let clock = handle.finish().await.unwrap();
        assert_eq!(clock.outcome().unwrap().time_used_secs, [0, 2]);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Bo ran out of time, Ada wins"));
        drop(writer);
    }

    #[tokio::test]
    async fn test_read_scores_retries_bad_lines() {
        let input = "blue=4 wonders=x\nblue=4 wonders=6\n\n";
        let mut lines = BufReader::new(input.as_bytes()).lines();
        let mut out = Vec::new();

        let sheets = read_scores(&mut lines, &mut out, &names()).await.unwrap();
        assert_eq!(sheets[0].total(), 10);
        assert_eq!(sheets[1], ScoreSheet::default());
        assert!(String::from_utf8(out).unwrap().contains("Could not understand"));
    }

    #[tokio::test]
    async fn test_read_scores_needs_both_sheets() {
        let mut lines = BufReader::new("coins=3\n".as_bytes()).lines();
        let mut out = Vec::new();
        assert!(matches!(
            read_scores(&mut lines, &mut out, &names()).await,
            Err(TrackerError::Input(_))
        ));
    }
}
