use clock::{format_time, ClockState, Finish};
use itertools::Itertools;
use stats::{HeadToHead, LeaderboardEntry, WinConditionShare};
use types::{
    MatchRecord, Player, PlayerId, ScoreCategory, Seat, TotalMismatch, WinConditionCatalog,
};

pub fn player_name(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|p| p.id == id)
        .map_or_else(|| id.to_string(), |p| p.name.clone())
}

pub fn condition_name(catalog: &WinConditionCatalog, record: &MatchRecord) -> String {
    match record.win_condition {
        Some(id) => catalog
            .get(id)
            .map_or_else(|| format!("#{id}"), |wc| wc.name.clone()),
        None => "-".to_string(),
    }
}

pub fn render_players(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players yet".to_string();
    }
    players
        .iter()
        .map(|p| format!("{}  (since {})", p.name, p.created_at.format("%Y-%m-%d")))
        .join("\n")
}

pub fn render_conditions(catalog: &WinConditionCatalog) -> String {
    catalog
        .iter()
        .map(|wc| {
            let marker = if catalog.is_points(wc.id) {
                "  [points]"
            } else {
                ""
            };
            format!("{:>3}  {}{marker}", wc.id, wc.name)
        })
        .join("\n")
}

/// One line per match: date, both players with totals, winner and condition.
pub fn render_match_line(
    record: &MatchRecord,
    players: &[Player],
    catalog: &WinConditionCatalog,
) -> String {
    let winner = record
        .winner
        .map_or_else(|| "no winner".to_string(), |id| player_name(players, id));
    format!(
        "{}  {} {} : {} {}  {} ({})  {}",
        record.created_at.format("%Y-%m-%d %H:%M"),
        player_name(players, record.player_1),
        record.total_score(Seat::One),
        record.total_score(Seat::Two),
        player_name(players, record.player_2),
        winner,
        condition_name(catalog, record),
        record.id
    )
}

pub fn render_match_detail(
    record: &MatchRecord,
    players: &[Player],
    catalog: &WinConditionCatalog,
) -> String {
    let names = Seat::BOTH.map(|seat| player_name(players, record.participant(seat)));
    let row = |label: &str, cells: [String; 2]| format!("{label:<16}{:>10}{:>10}", cells[0], cells[1]);

    let mut lines = vec![
        format!("Match {}", record.id),
        format!("Played {}", record.created_at.format("%Y-%m-%d %H:%M")),
        row("", names.clone()),
    ];
    lines.extend(ScoreCategory::ALL.into_iter().map(|category| {
        let cells = Seat::BOTH.map(|seat| {
            record
                .sheet(seat)
                .get(category)
                .map_or_else(|| "-".to_string(), |v| v.to_string())
        });
        row(category.label(), cells)
    }));
    lines.push(row(
        "Total",
        Seat::BOTH.map(|seat| record.total_score(seat).to_string()),
    ));
    if record.time_used_secs.iter().any(Option::is_some) {
        let cells = record
            .time_used_secs
            .map(|secs| secs.map_or_else(|| "-".to_string(), format_time));
        lines.push(row("Time used", cells));
    }
    let winner = record
        .winner
        .map_or_else(|| "none".to_string(), |id| player_name(players, id));
    lines.push(format!("Winner: {winner} ({})", condition_name(catalog, record)));
    lines.extend(record.total_mismatches().into_iter().map(|mismatch| {
        format!(
            "warning: stored total for {} is {}, categories sum to {}",
            names[mismatch.seat.index()],
            mismatch.stored,
            mismatch.computed
        )
    }));
    lines.join("\n")
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No players yet".to_string();
    }
    let header = format!(
        "{:<5}{:<8}{:<16}{:>6}{:>6}{:>8}{:>9}",
        "Rank", "", "Player", "Games", "Wins", "Losses", "Win %"
    );
    let rows = entries.iter().map(|entry| {
        let badge = entry.badge.map_or_else(String::new, |b| b.to_string());
        format!(
            "{:<5}{:<8}{:<16}{:>6}{:>6}{:>8}{:>9.1}",
            entry.rank,
            badge,
            entry.stats.name,
            entry.stats.games_played,
            entry.stats.wins,
            entry.stats.losses,
            entry.stats.win_rate
        )
    });
    std::iter::once(header).chain(rows).join("\n")
}

pub fn render_distribution(shares: &[WinConditionShare]) -> String {
    shares
        .iter()
        .map(|share| {
            format!(
                "{:<16}{:>5}{:>8.1}%",
                share.condition.name, share.count, share.percentage
            )
        })
        .join("\n")
}

pub fn render_head_to_head(table: &[HeadToHead], players: &[Player]) -> String {
    if table.is_empty() {
        return "No matches between players yet".to_string();
    }
    table
        .iter()
        .map(|h2h| {
            format!(
                "{} {} - {} {}  ({} played)",
                player_name(players, h2h.player_a),
                h2h.wins_a,
                h2h.wins_b,
                player_name(players, h2h.player_b),
                h2h.total
            )
        })
        .join("\n")
}

pub fn render_integrity(mismatches: &[TotalMismatch]) -> String {
    mismatches
        .iter()
        .map(|m| {
            format!(
                "match {} {}: stored total {} but categories sum to {}",
                m.match_id, m.seat, m.stored, m.computed
            )
        })
        .join("\n")
}

pub fn render_clock(state: &ClockState, names: &[String; 2]) -> String {
    let seats = Seat::BOTH
        .iter()
        .map(|&seat| {
            let marker = match (state.active_player == Some(seat), state.is_running) {
                (true, true) => " <",
                (true, false) => " (paused)",
                _ => "",
            };
            format!(
                "{} {}{marker}",
                names[seat.index()],
                format_time(state.remaining(seat))
            )
        })
        .join("   ");
    let mut out = format!("[Age {}] {seats}", state.age);
    if state.age_advance_pending {
        out.push_str(&format!("\nClose age {}? (yes/no)", state.age));
    }
    if let Some(finish) = &state.win_condition {
        let verdict = match (state.winner, finish) {
            (Some(seat), Finish::TimeExpired) => format!(
                "{} ran out of time, {} wins",
                names[seat.other().index()],
                names[seat.index()]
            ),
            (Some(seat), _) => format!("{} wins by {finish}", names[seat.index()]),
            (None, _) => "Final age closed, the scores decide".to_string(),
        };
        out.push('\n');
        out.push_str(&verdict);
    }
    out
}
