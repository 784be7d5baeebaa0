//! Terminal UI for the game.

mod app;
mod input;
mod ui;

use crate::config::Settings;
use crate::session::{Session, SessionHandle, SessionEvent, make_rng};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tactoe_core::GameController;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{error, info, instrument};

use app::App;
use input::{Action, action_for};

/// Runs the terminal game until the player quits.
pub async fn run_tui(settings: Settings) -> Result<()> {
    // Log to a file so tracing output does not corrupt the screen.
    let log_file = std::fs::File::create(settings.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?settings, "Starting terminal game");

    let controller = GameController::with_timing(make_rng(*settings.seed()), settings.timing());
    let (handle, mut events, task) = Session::spawn(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings.celebration());
    let res = run_loop(&mut terminal, &mut app, &handle, &mut events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    handle.shutdown();
    if let Err(e) = task.await {
        error!(error = %e, "Session task failed");
    }

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handle: &SessionHandle,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match action_for(key.code, app.cursor()) {
                Action::Cursor(pos) => app.set_cursor(pos),
                Action::Click(pos) => {
                    app.set_cursor(pos);
                    handle.click(pos.to_index());
                }
                Action::Reset => handle.reset(),
                Action::Quit => {
                    info!("Player quit");
                    return Ok(());
                }
                Action::None => {}
            }
        }

        // Let the session task run between frames.
        tokio::task::yield_now().await;
    }
}
