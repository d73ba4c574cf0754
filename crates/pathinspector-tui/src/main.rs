//! Path Inspector: a terminal folder browser with bounded previews.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pathinspector_core::CapacityBudget;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::app::{cell_pixels, preview_budget, App};
use crate::input::handle_key;
use crate::render::{preview_inner, render};

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file; the terminal belongs to ratatui.
fn init_tracing() -> anyhow::Result<()> {
    let log_path = std::env::temp_dir().join("pathinspector.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let start_dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir()?,
    };

    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &start_dir);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    start_dir: &Path,
) -> anyhow::Result<()> {
    let mut app = App::new(start_dir)?;
    tracing::info!(root = %app.tree().root().display(), "started");

    let mut cell_px = cell_pixels();
    let size = terminal.size()?;
    let budget = budget_for(&app, size.width, size.height, cell_px);
    app = app.with_budget(budget).with_preview_refreshed();

    loop {
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = handle_key(key, app.mode());
                tracing::debug!(?action, "key");
                app = app.apply(action);
            }
            Event::Resize(width, height) => {
                cell_px = cell_pixels();
                let budget = budget_for(&app, width, height, cell_px);
                app = app.with_budget(budget);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Budget of the preview pane for a terminal of `width` x `height` cells.
fn budget_for(app: &App, width: u16, height: u16, cell_px: Option<(u32, u32)>) -> CapacityBudget {
    let ui = &app.config().ui;
    let inner = preview_inner(Rect::new(0, 0, width, height), ui.panel_ratio);
    preview_budget(inner, ui, cell_px)
}
