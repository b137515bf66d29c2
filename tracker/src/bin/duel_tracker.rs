use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use database::{DatabaseConfig, MatchStore, SqliteStore};
use itertools::Itertools;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracker::{
    render::{
        render_conditions, render_distribution, render_head_to_head, render_integrity,
        render_leaderboard, render_match_detail, render_match_line, render_players,
    },
    EditRequest, RecordRequest, Tracker, TrackerConfig, TrackerError,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "duel-tracker", about = "Scores, statistics and a match clock for two-player duels")]
struct Params {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, overrides DATABASE_URL and the config file
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the roster
    Players,
    AddPlayer {
        name: String,
    },
    RenamePlayer {
        name: String,
        new_name: String,
    },
    /// List the win conditions
    Conditions,
    /// Record a finished match
    Record {
        #[arg(long)]
        player_1: String,
        #[arg(long)]
        player_2: String,
        /// Defaults to the player with the higher total
        #[arg(long)]
        winner: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        /// Player 1 scores as category=value
        #[arg(long = "p1", value_name = "CATEGORY=VALUE")]
        p1_scores: Vec<String>,
        /// Player 2 scores as category=value
        #[arg(long = "p2", value_name = "CATEGORY=VALUE")]
        p2_scores: Vec<String>,
    },
    /// List recent matches
    Games {
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    Show {
        id: Uuid,
        #[arg(long)]
        json: bool,
    },
    /// Change a stored match
    Edit {
        id: Uuid,
        #[arg(long)]
        player_1: Option<String>,
        #[arg(long)]
        player_2: Option<String>,
        /// Player name, or `none`
        #[arg(long)]
        winner: Option<String>,
        /// Win condition name, or `none`
        #[arg(long)]
        condition: Option<String>,
        /// RFC 3339 timestamp
        #[arg(long)]
        date: Option<DateTime<Utc>>,
        /// Score change as <seat>.<category>=<value>, empty value clears
        #[arg(long = "score", value_name = "SEAT.CATEGORY=VALUE")]
        scores: Vec<String>,
    },
    Delete {
        id: Uuid,
    },
    Leaderboard,
    /// Win conditions, head-to-head tallies and data warnings
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Run the match clock, then enter the scores
    Play {
        #[arg(long)]
        player_1: String,
        #[arg(long)]
        player_2: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Params::parse();
    log::debug!("args: {args:?}");

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Params) -> Result<(), TrackerError> {
    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    let db_config =
        DatabaseConfig::from_cli_or_env_or_yaml(args.database.clone(), config.database_url.clone());
    let store = SqliteStore::connect(&db_config).await?;
    let tracker = Tracker::open(store, config).await?;

    match args.command {
        Command::Players => {
            println!("{}", render_players(&tracker.store().list_players().await?));
        }
        Command::AddPlayer { name } => {
            let player = tracker.store().add_player(&name).await?;
            println!("Added {} ({})", player.name, player.id);
        }
        Command::RenamePlayer { name, new_name } => {
            let player = tracker.player(&name).await?;
            let renamed = tracker.store().rename_player(player.id, &new_name).await?;
            println!("Renamed {} to {}", player.name, renamed.name);
        }
        Command::Conditions => println!("{}", render_conditions(tracker.catalog())),
        Command::Record {
            player_1,
            player_2,
            winner,
            condition,
            p1_scores,
            p2_scores,
        } => {
            let request = RecordRequest {
                player_1,
                player_2,
                winner,
                condition,
                scores: [p1_scores, p2_scores],
            };
            let record = tracker.record(&request).await?;
            let players = tracker.store().list_players().await?;
            println!(
                "{}",
                render_match_detail(&record, &players, tracker.catalog())
            );
        }
        Command::Games { limit, all } => {
            let matches = if all {
                tracker.store().list_matches(None).await?
            } else {
                tracker.recent(limit).await?
            };
            let players = tracker.store().list_players().await?;
            if matches.is_empty() {
                println!("No matches yet");
            } else {
                println!(
                    "{}",
                    matches
                        .iter()
                        .map(|m| render_match_line(m, &players, tracker.catalog()))
                        .join("\n")
                );
            }
        }
        Command::Show { id, json } => {
            let record = tracker.store().get_match(id).await?;
            if json {
                println!("{}", to_json(&record)?);
            } else {
                let players = tracker.store().list_players().await?;
                println!(
                    "{}",
                    render_match_detail(&record, &players, tracker.catalog())
                );
            }
        }
        Command::Edit {
            id,
            player_1,
            player_2,
            winner,
            condition,
            date,
            scores,
        } => {
            let request = EditRequest {
                player_1,
                player_2,
                winner,
                condition,
                created_at: date,
                scores,
            };
            let record = tracker.edit(id, &request).await?;
            let players = tracker.store().list_players().await?;
            println!(
                "{}",
                render_match_detail(&record, &players, tracker.catalog())
            );
        }
        Command::Delete { id } => {
            tracker.store().delete_match(id).await?;
            println!("Deleted match {id}");
        }
        Command::Leaderboard => {
            println!("{}", render_leaderboard(&tracker.leaderboard().await?));
        }
        Command::Stats { json } => {
            let report = tracker.stats_report().await?;
            if json {
                println!("{}", to_json(&report)?);
            } else {
                println!("{}", render_leaderboard(&report.leaderboard));
                println!("\nWin conditions");
                println!("{}", render_distribution(&report.distribution));
                println!("\nHead to head");
                println!("{}", render_head_to_head(&report.head_to_head, &report.players));
                if !report.integrity.is_empty() {
                    println!("\nWarnings");
                    println!("{}", render_integrity(&report.integrity));
                }
            }
        }
        Command::Play { player_1, player_2 } => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut out = std::io::stdout();
            if let Some(record) = tracker
                .play(&player_1, &player_2, &mut lines, &mut out)
                .await?
            {
                let players = tracker.store().list_players().await?;
                println!(
                    "{}",
                    render_match_detail(&record, &players, tracker.catalog())
                );
            }
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, TrackerError> {
    Ok(serde_json::to_string_pretty(value)?)
}
