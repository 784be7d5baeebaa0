//! Application state for the terminal game.

use crate::session::SessionEvent;
use std::time::{Duration, Instant};
use tactoe_core::{Outcome, Phase, Player, Position, Snapshot};
use tracing::debug;

/// Everything the renderer needs, rebuilt from session events.
#[derive(Debug)]
pub struct App {
    snapshot: Option<Snapshot>,
    cursor: Position,
    celebrating_until: Option<Instant>,
    celebration: Duration,
    started: Instant,
}

impl App {
    /// Creates an app waiting for its first snapshot.
    pub fn new(celebration: Duration) -> Self {
        Self {
            snapshot: None,
            cursor: Position::Center,
            celebrating_until: None,
            celebration,
            started: Instant::now(),
        }
    }

    /// Latest snapshot from the session.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the keyboard cursor.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Milliseconds since start, used to animate blinking and confetti.
    pub fn tick(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    /// True while the victory confetti should be drawn.
    pub fn celebrating(&self) -> bool {
        self.celebrating_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Applies an event from the session.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Snapshot(snapshot) => {
                debug!(phase = %snapshot.phase, "Snapshot received");
                if snapshot.phase == Phase::WaitingForHuman && snapshot.history.is_empty() {
                    self.celebrating_until = None;
                }
                self.snapshot = Some(snapshot);
            }
            SessionEvent::Celebrate => {
                self.celebrating_until = Some(Instant::now() + self.celebration);
            }
        }
    }

    /// Result banner text, empty while the game runs.
    pub fn banner(&self) -> &'static str {
        match self.snapshot.as_ref().and_then(Snapshot::result) {
            Some(Outcome::Won(Player::X)) => "You won!",
            Some(Outcome::Won(Player::O)) => "Unlucky, the computer won",
            Some(Outcome::Draw) => "It's a draw",
            Some(Outcome::Undecided) | None => "",
        }
    }

    /// Status line describing what the game is waiting for.
    pub fn status(&self) -> String {
        let Some(snapshot) = &self.snapshot else {
            return "Starting...".to_string();
        };
        match snapshot.phase {
            Phase::WaitingForHuman => format!("Your move ({})", self.cursor.label()),
            Phase::InputBlocked => "Computer is thinking...".to_string(),
            Phase::GameOver => format!("{} - press R to play again", snapshot.outcome),
            Phase::Resetting => "Clearing the board...".to_string(),
        }
    }
}
