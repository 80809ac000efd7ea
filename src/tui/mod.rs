//! TUI module
//!
//! Terminal dashboard for releases, built with ratatui.

mod app;
mod constants;
mod keybindings;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::config::Config;
use crate::services::{ReleaseService, Route};
use anyhow::Result;
use constants::POLL_INTERVAL_MS;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Run the TUI application
pub async fn run_tui(
    config: Config,
    service: ReleaseService,
    start_route: Option<Route>,
) -> Result<()> {
    tracing::debug!("Initializing TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let enable_mouse = config.ui.enable_mouse;
    let mut app = App::new(config, Theme::default());
    if let Some(route) = start_route {
        app = app.with_start_route(route);
    }
    let result = run_loop(&mut terminal, &mut app, &service).await;

    tracing::debug!("TUI shutting down");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &ReleaseService,
) -> Result<()> {
    loop {
        // Dispatch whatever the last key or poll queued
        for command in app.take_commands() {
            service.spawn(command);
        }

        app.poll();
        app.check_status_message_timeout();
        terminal.draw(|f| app.render(f))?;

        // Input is polled with a timeout so settled requests still get drawn
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Some(true) {
                    break;
                }
            }
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
