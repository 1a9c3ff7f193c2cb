//! LazyIssues - a terminal issue search with debounced autocomplete.

use std::io::{self, Stdout};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use lazyissues::api::GitHubClient;
use lazyissues::app::App;
use lazyissues::cli::Cli;
use lazyissues::error::AppError;
use lazyissues::events::EventHandler;
use lazyissues::logging;
use lazyissues::tasks::TaskSpawner;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli
        .resolve_config()
        .map_err(|e| anyhow::anyhow!(AppError::from(e).user_message()))?;
    logging::init(cli.log_dir.clone()).context("failed to initialize logging")?;
    info!(repo = %config.repo, "Configuration loaded");

    let client = GitHubClient::new(&config).map_err(AppError::from)?;

    let mut app = App::new(&config);
    if let Some(query) = cli.query.clone() {
        app.set_initial_query(query);
    }

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, app, client).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!(error = %e, "Exiting with error");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
    }
    logging::shutdown();
    result
}

/// Drive the application until it asks to quit.
async fn run(terminal: &mut Tui, mut app: App, client: GitHubClient) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(tx);
    let events = EventHandler::new();

    loop {
        if let Some(request) = app.take_pending_search() {
            spawner.spawn_search(&client, request);
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        let event = events.next().map_err(|e| AppError::terminal(e.to_string()))?;
        app.update(event);

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        original(info);
    }));
}
