//! FlickTUI - browse TMDB and play movies and series from the terminal
//!
//! Popular and recommended shelves, a debounced search box with a
//! suggestion dropdown, a Series Explorer for seasons and episodes, and a
//! player that hands embed URLs to the browser or an external program.
//!
//! # Modules
//!
//! - `models` - Movies, series, seasons, episodes and their display labels
//! - `api` - TMDB client
//! - `search` - Debouncer and suggestion list
//! - `app` - Pure application state machine
//! - `tasks` - Background task execution
//! - `stream` - Embed URLs and player launching
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod search;
pub mod stream;
pub mod tasks;
pub mod ui;

// Re-export commonly used types
pub use models::{Episode, MediaItem, MediaType, SeasonSummary, TvDetail};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, Focus, InputMode};
pub use config::Config;
pub use tasks::{Task, TaskResult, TaskRunner};
