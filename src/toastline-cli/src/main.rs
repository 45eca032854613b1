//! Toastline demo - main entry point.
//!
//! Runs a full-screen terminal app where key presses push toasts into a
//! store and a ratatui layer draws them.

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::task::LocalSet;

use toastline_cli::{Cli, Control, DemoApp, logging};

/// Time between frames.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match &cli.log_file {
        Some(path) => Some(logging::init_file_logging(path, cli.log_level)?),
        None => None,
    };
    let options = cli.toaster_options()?;

    // Toasts live on one thread; timers and promises need a LocalSet
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = LocalSet::new();

    let mut terminal = ratatui::init();
    crossterm::execute!(stdout(), EnableMouseCapture)?;
    tracing::info!(position = ?options.position, "demo started");

    let result = local.block_on(&runtime, run(&mut terminal, DemoApp::new(options)));

    if let Err(e) = crossterm::execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}

async fn run(terminal: &mut DefaultTerminal, mut app: DemoApp) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code) == Control::Quit {
                        tracing::info!("demo finished");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        tokio::time::sleep(FRAME).await;
    }
}
