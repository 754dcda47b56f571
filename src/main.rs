mod app;
mod handlers;
mod ui;

use crate::app::App;
use anyhow::{Context, Result};
use apple_tree::config::{self, AppConfig};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err:#}");
    }

    let config = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config, using defaults: {err:#}");
            AppConfig::default()
        }
    };

    setup_terminal()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")?;

    let mut app = App::new(config);
    let run_result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    if let Err(err) = app.config.save() {
        eprintln!("failed to save config: {err:#}");
    }
    if let Err(err) = run_result {
        eprintln!("{err:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.sync();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(250)).context("event poll failed")?
            && let Event::Key(key) = event::read().context("event read failed")?
            && key.kind == KeyEventKind::Press
        {
            handlers::handle_key_event(app, key);
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let path = config::log_path()?;
    config::ensure_parent_dir(&path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
