//! Command-line interface for strictly_gomoku.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Gomoku - five-in-a-row with enforced turns and time limits
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Type-safe five-in-a-row engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat game in the terminal
    Play {
        /// Path to a TOML file with time limits (falls back to $GOMOKU_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name of the black player (moves first)
        #[arg(long, default_value = "black")]
        black: String,

        /// Name of the white player
        #[arg(long, default_value = "white")]
        white: String,

        /// Print the final session as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to a TOML file with time limits (falls back to $GOMOKU_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
