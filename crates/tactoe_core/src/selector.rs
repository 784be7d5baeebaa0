//! Heuristic move selection for the computer player (O).
//!
//! Half the time the computer plays a uniformly random empty square. The
//! other half it follows a fixed priority: take a win, block a win, center,
//! a random free corner, then any random free square. Look-ahead is a single
//! ply, so the opponent is beatable.

use crate::{Board, Outcome, Player, Position, evaluate};
use tracing::{debug, instrument};

/// Probability that the computer skips the heuristic and plays randomly.
pub const RANDOM_MOVE_CHANCE: f64 = 0.5;

/// Source of randomness consumed by the move selector.
///
/// Every [`rand::RngCore`] is a `RandomSource`, so a seeded generator gives
/// reproducible games.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: rand::RngCore> RandomSource for R {
    fn unit(&mut self) -> f64 {
        rand::Rng::gen_range(self, 0.0..1.0)
    }

    fn pick(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}

fn pick_from<R: RandomSource + ?Sized>(candidates: &[Position], rng: &mut R) -> Position {
    candidates[rng.pick(candidates.len())]
}

/// Chooses the computer's move.
///
/// # Panics
///
/// Panics if the board is already decided or has no empty square.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn choose_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Position {
    assert_eq!(
        evaluate(board).outcome,
        Outcome::Undecided,
        "choose_move requires an undecided board with an empty square"
    );

    if rng.unit() < RANDOM_MOVE_CHANCE {
        let position = pick_from(&Position::valid_moves(board), rng);
        debug!(%position, "Random move");
        return position;
    }

    heuristic_move(board, rng)
}

/// The heuristic branch of [`choose_move`], without the random coin flip.
///
/// # Panics
///
/// Panics if the board has no empty square.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn heuristic_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Position {
    let empty = Position::valid_moves(board);
    assert!(!empty.is_empty(), "heuristic_move requires an empty square");

    if let Some(position) = winning_move(board, Player::O) {
        debug!(%position, "Taking win");
        return position;
    }

    if let Some(position) = winning_move(board, Player::X) {
        debug!(%position, "Blocking opponent");
        return position;
    }

    if board.is_empty(Position::Center) {
        debug!("Taking center");
        return Position::Center;
    }

    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect();
    if !corners.is_empty() {
        let position = pick_from(&corners, rng);
        debug!(%position, "Taking corner");
        return position;
    }

    let position = pick_from(&empty, rng);
    debug!(%position, "Taking remaining square");
    position
}

/// First empty position (ascending) where `player` would complete a line.
#[instrument(skip(board), fields(board = %board))]
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    Position::valid_moves(board)
        .into_iter()
        .find(|&pos| evaluate(&board.with(pos, player)).outcome == Outcome::Won(player))
}
