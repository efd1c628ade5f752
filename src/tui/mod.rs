//! Terminal UI for playing against the model.

mod app;
mod input;
mod ui;

use crate::session::GameSession;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Run the game UI until the user quits.
pub async fn run(mut session: GameSession, log_file: &Path) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        eprintln!("Error: {:?}", err);
    }

    res
}

/// Event loop: draw the board, read keys, hand accepted cells to the session.
async fn run_game<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut GameSession,
) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut app = App::new();

    loop {
        terminal.draw(|f| ui::draw(f, session, &app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("User quit");
                    return Ok(());
                }
                KeyCode::Char('n') => {
                    session.new_game();
                }
                KeyCode::Char('a') => {
                    app.toggle_analysis();
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                    app.move_cursor(key.code);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let cell = app.cursor();
                    play_cell(terminal, session, &mut app, cell).await?;
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let digit = c as usize - '0' as usize;
                    if (1..=9).contains(&digit) {
                        play_cell(terminal, session, &mut app, digit - 1).await?;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Play one full turn at `cell`, drawing a waiting frame while the model reply
/// is in flight.
async fn play_cell<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut GameSession,
    app: &mut App,
    cell: usize,
) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    if !session.can_play(cell) {
        debug!(cell, "Ignoring unplayable cell");
        return Ok(());
    }

    app.set_thinking(true);
    terminal.draw(|f| ui::draw(f, session, app))?;

    session.play(cell).await;

    // Keys typed while the model was deciding are stale; drop them.
    while event::poll(std::time::Duration::ZERO)? {
        event::read()?;
    }

    app.set_thinking(false);
    Ok(())
}
