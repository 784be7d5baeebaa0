//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). They never touch the
//! controller, so the move selector can run them on hypothetical boards.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{Evaluation, LINES, Line, Outcome, check_winner, evaluate};
