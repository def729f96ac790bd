//! Embed player - URL construction and launching
//!
//! Movies and episodes play through an external video host addressed by
//! TMDB id. The URL is opened in the system browser or handed to a
//! configured program (mpv, a kiosk browser, ...).

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::config::{Config, DEFAULT_EMBED_BASE_URL};

/// Builds embed URLs for the configured host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedUrls {
    base: String,
}

impl Default for EmbedUrls {
    fn default() -> Self {
        Self::new(DEFAULT_EMBED_BASE_URL)
    }
}

impl EmbedUrls {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/movie/{id}`
    pub fn movie(&self, id: u64) -> String {
        format!("{}/movie/{}", self.base, id)
    }

    /// `{base}/tv/{id}-{season}-{episode}`
    pub fn episode(&self, id: u64, season: u16, episode: u16) -> String {
        format!("{}/tv/{}-{}-{}", self.base, id, season, episode)
    }
}

/// What the player modal is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSession {
    pub title: String,
    /// None when the item had no usable TMDB id
    pub url: Option<String>,
}

impl PlayerSession {
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }

    /// Body text of the modal
    pub fn body(&self) -> &str {
        self.url.as_deref().unwrap_or("Missing TMDB id")
    }
}

/// Errors from launching a player
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Nothing to play: missing TMDB id")]
    MissingUrl,
}

/// How player URLs are opened
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Launcher {
    /// System default browser
    #[default]
    Browser,
    /// External program, called as `program [args..] URL`
    Command { program: String, args: Vec<String> },
}

impl Launcher {
    /// Pick the launcher described by the config
    pub fn from_config(config: &Config) -> Self {
        match config.player_command.as_deref() {
            Some(program) if !program.trim().is_empty() => Launcher::Command {
                program: program.to_string(),
                args: config.player_args.clone(),
            },
            _ => Launcher::Browser,
        }
    }

    /// Display name for status messages
    pub fn display_name(&self) -> &str {
        match self {
            Launcher::Browser => "browser",
            Launcher::Command { program, .. } => program,
        }
    }

    /// Open `url` without waiting for the player to exit
    pub async fn launch(&self, url: &str) -> Result<(), PlayerError> {
        tracing::info!(url, launcher = self.display_name(), "Launching player");

        match self {
            Launcher::Browser => open::that_detached(url).map_err(PlayerError::StartFailed),
            Launcher::Command { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(url);
                cmd.stdin(Stdio::null());
                cmd.stdout(Stdio::null());
                cmd.stderr(Stdio::null());

                cmd.spawn().map(|_| ()).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        PlayerError::NotFound(program.clone())
                    } else {
                        PlayerError::StartFailed(e)
                    }
                })
            }
        }
    }

    /// Launch the session's URL, if it has one
    pub async fn launch_session(&self, session: &PlayerSession) -> Result<(), PlayerError> {
        let url = session.url.as_deref().ok_or(PlayerError::MissingUrl)?;
        self.launch(url).await
    }
}

impl std::fmt::Display for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
