//! Strictly Gomoku - terminal front end
//!
//! Hot-seat five-in-a-row on stdin/stdout, plus a config inspector.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use strictly_gomoku::{
    GameConfig, MoveOutcome, Position, SessionManager, Status, Stone, SystemClock, WIN_LENGTH,
    rules,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Table used for the local game.
const LOCAL_TABLE: &str = "local";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            black,
            white,
            json,
        } => run_play(config.as_deref(), &black, &white, json),
        Command::Config { config } => run_config(config.as_deref()),
    }
}

/// Print the effective configuration
fn run_config(path: Option<&Path>) -> Result<()> {
    let config = GameConfig::load(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Run a hot-seat game: both players type at the same terminal.
#[instrument]
fn run_play(path: Option<&Path>, black: &str, white: &str, json: bool) -> Result<()> {
    let config = GameConfig::load(path)?;
    let manager = SessionManager::with_clock(Arc::new(SystemClock), config);

    manager.join(LOCAL_TABLE, black, Stone::Black)?;
    manager.join(LOCAL_TABLE, white, Stone::White)?;
    manager.start_game(LOCAL_TABLE, black)?;
    info!(black, white, "Local game started");

    println!("Moves: `7 7`, `7,7` or `H8`. Also: undo, yes, no, timeout, quit.");
    println!("{}", manager.snapshot(LOCAL_TABLE)?.board().display());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        let game = manager.snapshot(LOCAL_TABLE)?;
        if game.status() == Status::Ended {
            break;
        }
        let to_move = game.current_turn_player().clone();
        print!(
            "{} ({}, {}s left) > ",
            to_move,
            game.stone_to_move(),
            manager.remaining_turn_time(LOCAL_TABLE)?.num_seconds()
        );
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim().to_lowercase();
        debug!(input = %input, "Command received");

        let reply: Result<String> = match input.as_str() {
            "" => continue,
            "quit" => break,
            "undo" => {
                let mover = game.player(game.stone_to_move().opponent()).clone();
                manager
                    .request_revoke(&mover)
                    .map(|()| format!("{} asks to take back the last move (yes/no)", mover))
                    .map_err(Into::into)
            }
            "yes" | "no" => manager
                .answer_revoke(&to_move, input == "yes")
                .map(|state| format!("Revoke: {:?}", state))
                .map_err(Into::into),
            "timeout" => manager
                .end_game_on_timeout(LOCAL_TABLE)
                .map(|outcome| outcome.to_string())
                .map_err(Into::into),
            text => Position::parse(text)
                .map_err(anyhow::Error::from)
                .and_then(|pos| {
                    manager
                        .make_move(&to_move, pos.row() as usize, pos.col() as usize)
                        .map(|outcome| describe(&manager, pos, outcome))
                        .map_err(Into::into)
                }),
        };

        match reply {
            Ok(message) => {
                println!("{}", manager.snapshot(LOCAL_TABLE)?.board().display());
                println!("{}", message);
            }
            Err(error) => println!("Rejected: {}", error),
        }
    }

    let game = manager.snapshot(LOCAL_TABLE)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else if let Some(outcome) = game.outcome() {
        println!("Game over: {}", outcome);
    }
    Ok(())
}

/// Human-readable summary of an accepted move.
fn describe(manager: &SessionManager, pos: Position, outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Continue { next } => format!("Played {}; {} to move", pos.label(), next),
        MoveOutcome::GameOver(outcome) => {
            let line = manager
                .snapshot(LOCAL_TABLE)
                .map(|game| rules::longest_run(game.board(), pos, outcome.winning_stone))
                .ok()
                .filter(|(_, run)| *run >= WIN_LENGTH);
            match line {
                Some((axis, run)) => format!("{} ({} line of {})", outcome, axis, run),
                None => outcome.to_string(),
            }
        }
    }
}
