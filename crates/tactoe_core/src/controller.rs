//! Game controller: the turn-sequencing state machine.
//!
//! The controller owns the single game state and is driven by three entry
//! points: a human click, a reset request, and the firing of a timer it
//! scheduled earlier. It never sleeps. Delays are handed to a [`Host`], which
//! calls [`GameController::on_timer`] once the delay has elapsed.
//!
//! ```text
//!  WaitingForHuman --click--> InputBlocked --ComputerReply--> WaitingForHuman
//!        |                          |                               |
//!        +--winning click--> GameOver <--------winning reply--------+
//!                               |
//!                       (Unblock clears the input block, phase unchanged)
//!                               |
//!   WaitingForHuman/GameOver --reset--> Resetting --ClearBoard--> WaitingForHuman
//! ```
//!
//! Invalid events (occupied square, out of turn, after game over, a second
//! reset) are ignored, not errors. At most one timer is pending at a time.

use crate::{Board, Line, Move, Outcome, Player, Position, RandomSource, choose_move, evaluate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Where the controller is in its lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// Accepting a click from the human.
    #[default]
    WaitingForHuman,
    /// A placement animation is running; clicks are ignored.
    InputBlocked,
    /// The game has an outcome; only a reset is accepted.
    GameOver,
    /// Marks are fading out; the board clears when the timer fires.
    Resetting,
}

/// A one-shot delayed transition scheduled through [`Host::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Timer {
    /// Compute and place the computer's reply.
    ComputerReply,
    /// Unblock input after the computer's mark has appeared.
    Settle,
    /// Unblock input after a game-ending mark has appeared. The phase stays
    /// [`Phase::GameOver`].
    Unblock,
    /// Replace the faded board with a fresh game.
    ClearBoard,
}

/// Collaborators the controller calls out to.
pub trait Host {
    /// Calls [`GameController::on_timer`] with `timer` after `delay`.
    fn schedule(&mut self, delay: Duration, timer: Timer);

    /// Fire-and-forget celebration, triggered once per human win.
    fn celebrate(&mut self);
}

/// Fixed delays of the timing gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Input block between the human's move and the computer's reply.
    pub reply_delay: Duration,
    /// Fade-out time between a reset request and the cleared board.
    pub reset_delay: Duration,
    /// Input block after the computer's move. Zero skips it.
    pub settle_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(600),
            reset_delay: Duration::from_millis(600),
            settle_delay: Duration::ZERO,
        }
    }
}

/// Read-only view of the game for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board contents.
    pub board: Board,
    /// Outcome so far.
    pub outcome: Outcome,
    /// Line proving a win, if any.
    pub winning_line: Option<Line>,
    /// Controller phase.
    pub phase: Phase,
    /// True while a delayed transition is pending.
    pub input_blocked: bool,
    /// Squares fading out during a reset.
    pub fading: [bool; 9],
    /// Moves committed since the game started or was loaded, oldest first.
    ///
    /// Marks present on a loaded board are not part of the history.
    pub history: Vec<Move>,
}

impl Snapshot {
    /// The game-over result, or `None` while the game is running.
    pub fn result(&self) -> Option<Outcome> {
        self.outcome.is_decided().then_some(self.outcome)
    }

    /// Checks whether `pos` belongs to the winning line.
    pub fn is_winning(&self, pos: Position) -> bool {
        self.winning_line.is_some_and(|line| line.contains(pos))
    }
}

/// Owns the game state and sequences human and computer turns.
#[derive(Debug)]
pub struct GameController<R> {
    board: Board,
    outcome: Outcome,
    winning_line: Option<Line>,
    phase: Phase,
    fading: [bool; 9],
    history: Vec<Move>,
    pending: Option<Timer>,
    timing: Timing,
    rng: R,
}

impl<R: RandomSource> GameController<R> {
    /// Creates a controller with the default timing.
    pub fn new(rng: R) -> Self {
        Self::with_timing(rng, Timing::default())
    }

    /// Creates a controller with explicit delays.
    #[instrument(skip(rng))]
    pub fn with_timing(rng: R, timing: Timing) -> Self {
        Self {
            board: Board::new(),
            outcome: Outcome::Undecided,
            winning_line: None,
            phase: Phase::WaitingForHuman,
            fading: [false; 9],
            history: Vec::new(),
            pending: None,
            timing,
            rng,
        }
    }

    /// Loads an arbitrary position, replacing the current game.
    ///
    /// The outcome is re-evaluated; no timer is scheduled and no celebration
    /// fires. Any pending timer is forgotten. The history starts empty, so it
    /// only records moves made after the load.
    #[instrument(skip(self), fields(board = %board))]
    pub fn load(&mut self, board: Board) {
        self.clear();
        let eval = evaluate(&board);
        self.board = board;
        self.outcome = eval.outcome;
        self.winning_line = eval.winning_line;
        if eval.outcome.is_decided() {
            self.phase = Phase::GameOver;
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The timer the controller is waiting on, if any.
    pub fn pending(&self) -> Option<Timer> {
        self.pending
    }

    /// Configured delays.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Copies the state for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            outcome: self.outcome,
            winning_line: self.winning_line,
            phase: self.phase,
            input_blocked: self.pending.is_some(),
            fading: self.fading,
            history: self.history.clone(),
        }
    }

    /// Human selects the square at `index` (0-8).
    ///
    /// Returns whether the click was accepted. Clicks on occupied squares or
    /// outside [`Phase::WaitingForHuman`] are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    #[instrument(skip(self, host), fields(phase = %self.phase))]
    pub fn on_cell_click(&mut self, index: usize, host: &mut dyn Host) -> bool {
        let Some(position) = Position::from_index(index) else {
            panic!("cell index {index} out of range 0..9");
        };

        if self.phase != Phase::WaitingForHuman {
            debug!(%position, "Ignoring click while not waiting for human");
            return false;
        }
        if !self.board.is_empty(position) {
            debug!(%position, "Ignoring click on occupied square");
            return false;
        }

        self.place(Move::new(Player::X, position), host);
        if self.outcome.is_decided() {
            self.hold_input(Timer::Unblock, self.timing.reply_delay, host);
        } else {
            self.block_until(Timer::ComputerReply, self.timing.reply_delay, host);
        }
        true
    }

    /// Human asks for a new game.
    ///
    /// Accepted in [`Phase::WaitingForHuman`] and [`Phase::GameOver`]; flags
    /// every marked square for fade-out and schedules the clear. A pending
    /// [`Timer::Unblock`] is replaced by the clear.
    #[instrument(skip(self, host), fields(phase = %self.phase))]
    pub fn on_reset_requested(&mut self, host: &mut dyn Host) -> bool {
        if !matches!(self.phase, Phase::WaitingForHuman | Phase::GameOver) {
            debug!("Ignoring reset while a transition is pending");
            return false;
        }

        self.fading = self.board.occupied_mask();
        self.phase = Phase::Resetting;
        info!(
            fading = self.fading.iter().filter(|f| **f).count(),
            "Fading out board"
        );
        self.pending = Some(Timer::ClearBoard);
        host.schedule(self.timing.reset_delay, Timer::ClearBoard);
        true
    }

    /// A delay scheduled through [`Host::schedule`] has elapsed.
    ///
    /// Timers the controller is not waiting on are ignored.
    #[instrument(skip(self, host), fields(phase = %self.phase))]
    pub fn on_timer(&mut self, timer: Timer, host: &mut dyn Host) -> bool {
        if self.pending != Some(timer) {
            debug!(pending = ?self.pending, "Ignoring unexpected timer");
            return false;
        }
        self.pending = None;

        match timer {
            Timer::ComputerReply => self.computer_reply(host),
            Timer::Settle => self.phase = Phase::WaitingForHuman,
            Timer::Unblock => debug!("Input unblocked after game over"),
            Timer::ClearBoard => {
                self.clear();
                info!("Board cleared");
            }
        }
        true
    }

    fn computer_reply(&mut self, host: &mut dyn Host) {
        let position = choose_move(&self.board, &mut self.rng);
        self.place(Move::new(Player::O, position), host);
        if self.outcome.is_decided() {
            if !self.timing.settle_delay.is_zero() {
                self.hold_input(Timer::Unblock, self.timing.settle_delay, host);
            }
            return;
        }

        if self.timing.settle_delay.is_zero() {
            self.phase = Phase::WaitingForHuman;
        } else {
            self.block_until(Timer::Settle, self.timing.settle_delay, host);
        }
    }

    /// Commits a move and ends the game if it decided the outcome.
    fn place(&mut self, action: Move, host: &mut dyn Host) {
        self.board = self.board.with(action.position, action.player);
        self.history.push(action);
        info!(%action, "Move committed");

        let eval = evaluate(&self.board);
        if eval.outcome.is_decided() {
            self.outcome = eval.outcome;
            self.winning_line = eval.winning_line;
            self.phase = Phase::GameOver;
            info!(outcome = %self.outcome, "Game over");
            if self.outcome == Outcome::Won(Player::X) {
                host.celebrate();
            }
        }
    }

    fn block_until(&mut self, timer: Timer, delay: Duration, host: &mut dyn Host) {
        self.phase = Phase::InputBlocked;
        self.hold_input(timer, delay, host);
    }

    /// Blocks input until `timer` fires, without touching the phase.
    fn hold_input(&mut self, timer: Timer, delay: Duration, host: &mut dyn Host) {
        self.pending = Some(timer);
        host.schedule(delay, timer);
    }

    /// Back to the initial state, keeping the random source and timing.
    fn clear(&mut self) {
        self.board = Board::new();
        self.outcome = Outcome::Undecided;
        self.winning_line = None;
        self.phase = Phase::WaitingForHuman;
        self.fading = [false; 9];
        self.history.clear();
        self.pending = None;
    }
}
