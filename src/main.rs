mod app;
mod cli;
mod config;
mod event;
mod gateway;
mod log;
mod model;
mod results;
mod ui;
mod util;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};
use cli::Command;
use gateway::IssueSource;
use model::issue::SearchTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            Ok(())
        }
        Command::List(target) => cli::handle_list(target).await,
        Command::History => {
            cli::handle_history();
            Ok(())
        }
        Command::Tui(target) => run_tui(target).await,
    }
}

async fn run_tui(target: Option<SearchTarget>) -> Result<()> {
    let config = config::load_config()?;
    let target = target.unwrap_or_else(|| config.default_target());
    let source: Arc<dyn IssueSource> = Arc::new(gateway::create_gateway(&config));

    // Initial fetch happens before the first frame, so the UI opens populated
    let initial = source.fetch_issues(&target).await;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut app = App::new(
        source,
        log::ActivityLog::default(),
        action_tx.clone(),
        target,
        initial,
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    app.update(Action::Resize(terminal.size()?.width));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action);
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
