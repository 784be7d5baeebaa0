//! Tactoe - unified CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use tactoe::{Board, Settings, Timing, autoplay, make_rng, run_tui};
use tactoe_core::heuristic_move;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, seed } => {
            let settings = Settings::load(config.as_deref())?.with_seed(seed);
            run_tui(settings).await
        }
        Command::Autoplay { games, seed, json } => run_autoplay(games, seed, json).await,
        Command::Suggest { board, seed } => suggest(&board, seed),
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Plays headless games with no delays.
async fn run_autoplay(games: u32, seed: Option<u64>, json: bool) -> Result<()> {
    init_stderr_logging();
    info!(games, ?seed, "Starting autoplay");

    let timing = Timing {
        reply_delay: Duration::ZERO,
        reset_delay: Duration::ZERO,
        settle_delay: Duration::ZERO,
    };
    let mut failure = None;
    let tally = autoplay(games, seed, timing, |snapshot| {
        if json && failure.is_none() {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => failure = Some(e),
            }
        }
    })
    .await;
    if let Some(e) = failure {
        return Err(e).context("Failed to serialize snapshot");
    }

    if json {
        println!("{}", serde_json::to_string(&tally)?);
    } else {
        println!("{}", tally);
    }
    Ok(())
}

/// Prints the heuristic reply for a board given on the command line.
fn suggest(board: &str, seed: Option<u64>) -> Result<()> {
    init_stderr_logging();
    let board: Board = board.parse().context("Invalid board")?;
    let eval = tactoe_core::evaluate(&board);
    if eval.outcome.is_decided() {
        anyhow::bail!("Game is already over: {}", eval.outcome);
    }

    let position = heuristic_move(&board, &mut make_rng(seed));
    println!("{}\n", board.with(position, tactoe::Player::O).display());
    println!("O plays {} (square {})", position, position.to_index() + 1);
    Ok(())
}
