//! Pure tic-tac-toe game logic.
//!
//! The human plays X, the computer plays O. This crate holds everything that
//! decides what happens on the board and nothing that draws it:
//!
//! - **Board**: [`Board`], [`Square`], [`Position`], [`Player`]
//! - **Rules**: [`evaluate`] scans the eight [`LINES`] for a winner or a draw
//! - **Selector**: [`choose_move`] is the computer's heuristic opponent
//! - **Controller**: [`GameController`] sequences turns, timing gates and the
//!   reset/fade lifecycle, talking to the outside world through [`Host`]
//!
//! # Example
//!
//! ```
//! use tactoe_core::{Board, Outcome, Player, Position, Square, evaluate};
//!
//! let board: Board = "XXXOO____".parse().unwrap();
//! let eval = evaluate(&board);
//! assert_eq!(eval.outcome, Outcome::Won(Player::X));
//! assert_eq!(eval.winning_line.map(|l| l.positions()[0]), Some(Position::TopLeft));
//! assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
mod position;
mod rules;
mod selector;
mod types;

pub use action::Move;
pub use controller::{GameController, Host, Phase, Snapshot, Timer, Timing};
pub use position::Position;
pub use rules::{Evaluation, LINES, Line, Outcome, check_winner, evaluate, is_full};
pub use selector::{RANDOM_MOVE_CHANCE, RandomSource, choose_move, heuristic_move, winning_move};
pub use types::{Board, BoardParseError, Player, Square};
