//! Command-line interface for tactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against a heuristic computer opponent
#[derive(Parser, Debug)]
#[command(name = "tactoe")]
#[command(about = "Play tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Settings file (defaults to ./tactoe.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the computer's moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play headless games with random moves for X and report the results
    Autoplay {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for both sides
        #[arg(long)]
        seed: Option<u64>,

        /// Print every final snapshot as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// Print the computer's heuristic move for a board
    Suggest {
        /// Nine squares, e.g. "XX_OO____" (`_` or `.` for empty)
        board: String,

        /// Seed for corner and fallback tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },
}
