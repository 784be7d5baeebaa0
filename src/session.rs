//! Async driver that owns the game controller.
//!
//! The controller lives on a single task. Clicks, resets and elapsed timers
//! all arrive on one channel, so every mutation happens in arrival order on
//! that task. Delays are tokio sleeps on side tasks that post a
//! [`Command::Fire`] back into the same channel.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Duration;
use tactoe_core::{
    GameController, Host, Outcome, Phase, Player, Position, RandomSource, Snapshot, Timer, Timing,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Input to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Human clicked the square at this index.
    Click(usize),
    /// Human asked for a new game.
    Reset,
    /// A scheduled delay elapsed.
    Fire(Timer),
    /// Stop the session task.
    Shutdown,
}

/// Output of the session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// State after an accepted command.
    Snapshot(Snapshot),
    /// The human just won.
    Celebrate,
}

/// [`Host`] backed by tokio timers and channels.
#[derive(Debug, Clone)]
pub struct TokioHost {
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Host for TokioHost {
    fn schedule(&mut self, delay: Duration, timer: Timer) {
        debug!(?delay, %timer, "Scheduling timer");
        let commands = self.commands.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            if commands.send(Command::Fire(timer)).is_err() {
                debug!(%timer, "Session closed before timer fired");
            }
        });
    }

    fn celebrate(&mut self) {
        info!("Celebrating human win");
        if self.events.send(SessionEvent::Celebrate).is_err() {
            debug!("No listener for celebration");
        }
    }
}

/// Handle for sending input to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Forwards a human click.
    pub fn click(&self, index: usize) {
        self.send(Command::Click(index));
    }

    /// Forwards a reset request.
    pub fn reset(&self) {
        self.send(Command::Reset);
    }

    /// Asks the session task to stop.
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!(?command, "Session already stopped");
        }
    }
}

/// A game controller wired to its channels.
pub struct Session<R> {
    controller: GameController<R>,
    host: TokioHost,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl<R> Session<R>
where
    R: RandomSource + Send + 'static,
{
    /// Wires `controller` to fresh channels.
    ///
    /// Returns the session, a handle for input, and the event stream.
    pub fn new(
        controller: GameController<R>,
    ) -> (Self, SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = Self {
            controller,
            host: TokioHost {
                commands: command_tx.clone(),
                events: event_tx,
            },
            commands: command_rx,
        };
        (session, SessionHandle { commands: command_tx }, event_rx)
    }

    /// Spawns the session on the tokio runtime.
    pub fn spawn(
        controller: GameController<R>,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<SessionEvent>,
        JoinHandle<()>,
    ) {
        let (session, handle, events) = Self::new(controller);
        let task = tokio::spawn(session.run());
        (handle, events, task)
    }

    /// Processes commands until shutdown or until every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Session started");
        self.publish();

        while let Some(command) = self.commands.recv().await {
            let accepted = match command {
                Command::Click(index) => self.controller.on_cell_click(index, &mut self.host),
                Command::Reset => self.controller.on_reset_requested(&mut self.host),
                Command::Fire(timer) => self.controller.on_timer(timer, &mut self.host),
                Command::Shutdown => break,
            };
            if accepted {
                self.publish();
            }
        }

        info!("Session stopped");
    }

    fn publish(&self) {
        let snapshot = self.controller.snapshot();
        if self.host.events.send(SessionEvent::Snapshot(snapshot)).is_err() {
            debug!("No listener for snapshot");
        }
    }
}

/// Seeded generator, or one drawn from entropy.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Results of a batch of headless games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games the human side won.
    pub x_wins: u32,
    /// Games the computer won.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(Player::X) => self.x_wins += 1,
            Outcome::Won(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Undecided => {}
        }
    }

    /// Total games counted.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, drawn {}",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays `games` headless games, clicking random empty squares for X.
///
/// `on_game_over` sees the final snapshot of every game.
#[instrument(skip(timing, on_game_over))]
pub async fn autoplay(
    games: u32,
    seed: Option<u64>,
    timing: Timing,
    mut on_game_over: impl FnMut(&Snapshot),
) -> Tally {
    let mut clicker = make_rng(seed.map(|s| s.wrapping_add(1)));
    let controller = GameController::with_timing(make_rng(seed), timing);
    let (handle, mut events, task) = Session::spawn(controller);
    let mut tally = Tally::default();
    let mut last_phase = None;

    while tally.games() < games {
        let Some(event) = events.recv().await else {
            break;
        };
        let SessionEvent::Snapshot(snapshot) = event else {
            continue;
        };
        // The input block lifting after game over republishes the same game.
        let repeated = last_phase == Some(snapshot.phase);
        last_phase = Some(snapshot.phase);

        match snapshot.phase {
            Phase::WaitingForHuman => {
                let empty = Position::valid_moves(&snapshot.board);
                let index = empty[clicker.pick(empty.len())].to_index();
                handle.click(index);
            }
            Phase::GameOver if !repeated => {
                tally.record(snapshot.outcome);
                on_game_over(&snapshot);
                handle.reset();
            }
            Phase::GameOver | Phase::InputBlocked | Phase::Resetting => {}
        }
    }

    handle.shutdown();
    if let Err(e) = task.await {
        debug!(error = %e, "Session task ended abnormally");
    }
    info!(%tally, "Autoplay finished");
    tally
}
