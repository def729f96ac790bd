//! Playback infrastructure
//!
//! - Player: embed URLs and handing them to a browser or external program

pub mod player;

pub use player::{EmbedUrls, Launcher, PlayerError, PlayerSession};
