//! Horizontally scrollable catalog strips in the terminal.
//!
//! Each catalog category becomes a strip of subitem cards.  Strips can be
//! paged with the arrow keys or the ◀ / ▶ buttons, or dragged with the mouse.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, CatalogSource},
};
use crate::ui::render;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scrollable catalog strips")]
struct Cli {
    /// Catalog JSON file (an array of categories).  Uses a built-in demo
    /// catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Minimum window width in pixels that shows paging buttons.
    #[arg(long)]
    breakpoint: Option<f64>,

    /// Pixels per terminal column.
    #[arg(long)]
    cell_width: Option<f64>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = config::AppConfig::load();
    if let Some(bp) = cli.breakpoint {
        config.paging_breakpoint = bp.max(0.0);
    }
    if let Some(cw) = cli.cell_width {
        config.cell_width = cw.clamp(4.0, 32.0);
    }
    let source = match cli.catalog {
        Some(path) => CatalogSource::File(path),
        None => CatalogSource::Demo,
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(config, source, Rect::new(0, 0, size.width, size.height));
    state.reload();

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(40));

    loop {
        // Layout commits first; the engine measures against it before draw.
        state.settle_frame();
        terminal.draw(|frame| render(frame, state))?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => state.resize(Rect::new(0, 0, w, h)),
            AppEvent::FocusLost => handler::handle_focus_lost(state),
            AppEvent::Tick => {
                if state.is_animating() {
                    state.tick();
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
