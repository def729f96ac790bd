//! CLI - Command Line Interface for FlickTUI
//!
//! Every fetch the TUI performs is scriptable. Output is JSON when piped or
//! with `--json`.
//!
//! # Examples
//!
//! ```bash
//! flicktui popular movie
//! flicktui search "breaking bad" --limit 5 --json
//! flicktui season 1396 1
//! flicktui play tv 1396 S01E03 --print-only
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::MediaType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error
    Error = 1,
    InvalidArgs = 2,
    NetworkError = 3,
    /// TMDB has no such movie, series or season
    NotFound = 4,
    /// Player could not be launched
    PlayerFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// FlickTUI - browse TMDB and play movies and series from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "flicktui",
    version,
    author = "Gorka & Hermes",
    about = "Browse TMDB movies and series and play them from the terminal",
    long_about = "A terminal front-end for TMDB: popular and recommended shelves, \
                  debounced search, a series explorer and an embed player.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  flicktui                              Launch interactive TUI\n\
                  flicktui search \"dune\"                Search movies and series\n\
                  flicktui season 1396 2                List episodes of a season\n\
                  flicktui play tv 1396 S01E03          Play an episode"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Popular movies or series
    #[command(visible_alias = "pop")]
    Popular(PopularCmd),

    /// Movies trending this week
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Search movies and series
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Recommendations based on a movie or series
    #[command(visible_alias = "rec")]
    Recommend(RecommendCmd),

    /// Series details and its seasons
    Series(SeriesCmd),

    /// Episodes of one season
    Season(SeasonCmd),

    /// Open a movie or episode in the player
    Play(PlayCmd),
}

/// Movie or series
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Movie,
    Tv,
}

impl From<KindArg> for MediaType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => MediaType::Movie,
            KindArg::Tv => MediaType::Tv,
        }
    }
}

/// Popular movies or series
#[derive(Args, Debug)]
pub struct PopularCmd {
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Weekly trending movies
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Multi-search (people are excluded)
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "8")]
    pub limit: usize,

    /// Keep only movies or only series
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<KindArg>,
}

#[derive(Args, Debug)]
pub struct RecommendCmd {
    #[arg(value_enum)]
    pub kind: KindArg,

    /// TMDB id of the movie or series
    pub id: u64,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct SeriesCmd {
    /// TMDB series id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct SeasonCmd {
    /// TMDB series id
    pub id: u64,

    /// Season number
    pub season: u16,
}

// =============================================================================
// Play Command
// =============================================================================

#[derive(Args, Debug)]
pub struct PlayCmd {
    #[command(subcommand)]
    pub target: PlayTarget,
}

#[derive(Subcommand, Debug)]
pub enum PlayTarget {
    /// Play a movie by TMDB id
    Movie(PlayMovieArgs),
    /// Play an episode of a series
    Tv(PlayTvArgs),
}

#[derive(Args, Debug)]
pub struct PlayMovieArgs {
    /// TMDB movie id
    pub id: u64,

    /// Title shown in the output
    #[arg(long)]
    pub title: Option<String>,

    /// Print the URL without launching the player
    #[arg(long)]
    pub print_only: bool,
}

#[derive(Args, Debug)]
pub struct PlayTvArgs {
    /// TMDB series id
    pub id: u64,

    /// Episode code such as S01E03 (instead of --season/--episode)
    pub code: Option<String>,

    #[arg(long, short = 's', conflicts_with = "code")]
    pub season: Option<u16>,

    #[arg(long, short = 'e', conflicts_with = "code")]
    pub episode: Option<u16>,

    /// Print the URL without launching the player
    #[arg(long)]
    pub print_only: bool,
}

impl PlayTvArgs {
    /// Season and episode from the code or the flags (both default to 1)
    pub fn resolve(&self) -> Result<(u16, u16), String> {
        match self.code.as_deref() {
            Some(code) => parse_episode_code(code),
            None => Ok((self.season.unwrap_or(1), self.episode.unwrap_or(1))),
        }
    }
}

/// Parse "S01E03" (case-insensitive) into (season, episode)
pub fn parse_episode_code(code: &str) -> Result<(u16, u16), String> {
    let re = Regex::new(r"(?i)^s(\d{1,3})e(\d{1,4})$").map_err(|e| e.to_string())?;
    let invalid = || format!("Invalid episode code '{}' (expected e.g. S01E03)", code);

    let caps = re.captures(code.trim()).ok_or_else(invalid)?;
    let season = caps[1].parse().map_err(|_| invalid())?;
    let episode = caps[2].parse().map_err(|_| invalid())?;
    Ok((season, episode))
}

/// TMDB ids start at 1
pub fn validate_tmdb_id(id: u64) -> Result<u64, &'static str> {
    if id == 0 {
        Err("Invalid TMDB id (must be a positive number)")
    } else {
        Ok(id)
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// `play` response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayResponse {
    /// "launched" or "printed"
    pub status: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher: Option<String>,
}

/// `season` response
#[derive(Debug, Serialize, Deserialize)]
pub struct SeasonResponse {
    pub tv_id: u64,
    pub season: u16,
    pub episodes: Vec<crate::models::Episode>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data (pretty JSON in both modes)
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a list: JSON, or one display line per item
    pub fn print_list<T: Serialize + Display>(&self, items: &[T]) -> anyhow::Result<()> {
        if self.json {
            return self.print(items);
        }
        for item in items {
            println!("{}", item);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet and JSON mode)
    pub fn info(&self, msg: impl Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
