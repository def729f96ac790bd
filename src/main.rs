//! FlickTUI - browse TMDB and play movies and series from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! flicktui
//!
//! # CLI mode (for automation)
//! flicktui search "blade runner"
//! flicktui play movie 78 --print-only
//! ```

use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use flicktui::app::App;
use flicktui::cli::{Cli, Command, ExitCode, Output, PlayCmd, PlayTarget};
use flicktui::commands;
use flicktui::config::Config;
use flicktui::logging;
use flicktui::stream::{EmbedUrls, Launcher};
use flicktui::tasks::{TaskResult, TaskRunner};
use flicktui::{ui, TmdbClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Event poll timeout; also the debounce resolution
const TICK_RATE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        logging::init_cli(cli.quiet);
    } else {
        let log_path = logging::init_tui()?;
        tracing::info!(log = ?log_path, "Starting TUI");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        let exit_code = run_cli(cli, config).await;
        std::process::exit(exit_code.into());
    }
    run_tui(config).await
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: Config) -> ExitCode {
    let output = Output::new(&cli);
    let embed = EmbedUrls::new(config.embed_base_url.clone());
    let launcher = Launcher::from_config(&config);

    let Some(command) = cli.command else {
        return ExitCode::Success;
    };

    // Movies play by id alone; everything else needs an API key
    let command = match command {
        Command::Play(PlayCmd {
            target: PlayTarget::Movie(args),
        }) => return commands::play_movie_cmd(args, &embed, &launcher, &output).await,
        other => other,
    };

    let client = match config.api_key() {
        Ok(key) => TmdbClient::new(key),
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };

    match command {
        Command::Popular(cmd) => commands::popular_cmd(cmd, &client, &output).await,
        Command::Trending(cmd) => commands::trending_cmd(cmd, &client, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &client, &output).await,
        Command::Recommend(cmd) => commands::recommend_cmd(cmd, &client, &output).await,
        Command::Series(cmd) => commands::series_cmd(cmd, &client, &output).await,
        Command::Season(cmd) => commands::season_cmd(cmd, &client, &output).await,
        Command::Play(cmd) => match cmd.target {
            PlayTarget::Tv(args) => {
                commands::play_tv_cmd(args, &client, &embed, &launcher, &output).await
            }
            PlayTarget::Movie(args) => {
                commands::play_movie_cmd(args, &embed, &launcher, &output).await
            }
        },
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    // Fail before touching the terminal
    let api_key = config.api_key().context("TMDB API key required")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let runner = TaskRunner::new(TmdbClient::new(api_key), Launcher::from_config(&config), tx);
    let mut app = App::new(&config);

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &runner, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, drains task results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runner: &TaskRunner,
    mut rx: mpsc::UnboundedReceiver<TaskResult>,
) -> Result<()> {
    runner.spawn_all(app.bootstrap());

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    runner.spawn_all(app.handle_key(key));
                }
            }
        }

        while let Ok(result) = rx.try_recv() {
            runner.spawn_all(app.apply(result));
        }

        runner.spawn_all(app.tick(Instant::now()));
    }

    tracing::info!("Exiting TUI");
    Ok(())
}
