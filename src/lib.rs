//! Tactoe - tic-tac-toe against a heuristic computer opponent.
//!
//! The game rules and the turn-sequencing controller live in
//! [`tactoe_core`]. This crate runs them:
//!
//! - **Config**: [`Settings`] loaded from TOML
//! - **Session**: an async task owning the controller, with tokio timers
//!   standing in for the animation delays
//! - **TUI**: a ratatui front end that renders snapshots and forwards keys
//!
//! # Example
//!
//! ```no_run
//! use tactoe::{Settings, autoplay};
//!
//! # async fn example() {
//! let settings = Settings::default();
//! let tally = autoplay(10, Some(7), settings.timing(), |_| {}).await;
//! println!("{tally}");
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod session;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, Settings};

// Crate-level exports - Session driver
pub use session::{Command, Session, SessionEvent, SessionHandle, Tally, TokioHost, autoplay, make_rng};

// Crate-level exports - Terminal UI
pub use tui::run_tui;

// Crate-level exports - Game types
pub use tactoe_core::{
    Board, GameController, Host, Outcome, Phase, Player, Position, Snapshot, Square, Timer, Timing,
};
