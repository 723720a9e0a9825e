//! Tileline - a one-line tile word game
//!
//! Drop tiles next to each other, land the bonus squares, bank the word.

mod app;
mod cli;
mod config;
mod game;
mod tui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::Cli;
use config::Config;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use game::{Catalog, Game};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::Tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .merge(cli.overrides());

    init_logging(&config)?;

    // No catalog, no game
    let catalog = match &config.catalog {
        Some(path) => Catalog::from_file(path)
            .with_context(|| format!("failed to load tile catalog {}", path.display()))?,
        None => Catalog::standard()
            .context("embedded tile catalog is invalid")?
            .clone(),
    };

    let game = match config.seed {
        Some(seed) => Game::with_seed(catalog, seed),
        None => Game::new(catalog),
    };
    let mut app = App::new(game);

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    run(&mut terminal, &mut app)?;

    info!(total = app.total_score, "Exiting");
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

/// Log to a file so output does not fight the TUI for the screen
fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(log = %path.display(), "Starting tileline");
    Ok(())
}

fn run(terminal: &mut Tui, app: &mut App) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| tui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Esc => app.on_escape(),
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Enter => app.on_submit(),
                    KeyCode::Backspace => app.on_backspace(),
                    KeyCode::Left => app.on_left(),
                    KeyCode::Right => app.on_right(),
                    KeyCode::Tab | KeyCode::Up | KeyCode::Down => app.on_tab(),
                    KeyCode::Char(' ') => app.on_space(),
                    KeyCode::Char('n') => app.on_restart(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
