//! Background work requested by the app
//!
//! [`App`](crate::app::App) never performs I/O itself. Key handling and
//! result application return [`Task`]s; the [`TaskRunner`] executes them on
//! the tokio runtime and sends each outcome back as a [`TaskResult`].

use tokio::sync::mpsc::UnboundedSender;

use crate::api::TmdbClient;
use crate::models::{Episode, MediaItem, TvDetail};
use crate::stream::{Launcher, PlayerSession};

// =============================================================================
// Task / TaskResult
// =============================================================================

/// Side effect requested by the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Popular movies, popular series and weekly trending movies
    Bootstrap,
    /// Multi-search for the suggestion list
    Search { query: String },
    MovieRecommendations { movie_id: u64 },
    TvRecommendations { tv_id: u64 },
    TvDetail { tv_id: u64 },
    Season { tv_id: u64, season: u16 },
    /// Hand the session's URL to the launcher
    Launch { session: PlayerSession },
}

/// The three lists loaded at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeShelves {
    pub popular_movies: Vec<MediaItem>,
    pub popular_tv: Vec<MediaItem>,
    pub trending_movies: Vec<MediaItem>,
}

/// Outcome of a [`Task`]; errors are carried as display strings
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    Home(Result<HomeShelves, String>),
    Suggestions {
        query: String,
        result: Result<Vec<MediaItem>, String>,
    },
    MovieRecommendations {
        movie_id: u64,
        result: Result<Vec<MediaItem>, String>,
    },
    TvRecommendations {
        tv_id: u64,
        result: Result<Vec<MediaItem>, String>,
    },
    TvDetail {
        tv_id: u64,
        result: Result<TvDetail, String>,
    },
    Season {
        tv_id: u64,
        season: u16,
        result: Result<Vec<Episode>, String>,
    },
    /// Ok carries the launcher's display name; `url` is empty when the
    /// session had none
    Launched {
        url: String,
        result: Result<String, String>,
    },
}

// =============================================================================
// Runner
// =============================================================================

/// Executes tasks and reports results over a channel
#[derive(Debug, Clone)]
pub struct TaskRunner {
    client: TmdbClient,
    launcher: Launcher,
    tx: UnboundedSender<TaskResult>,
}

impl TaskRunner {
    pub fn new(client: TmdbClient, launcher: Launcher, tx: UnboundedSender<TaskResult>) -> Self {
        Self {
            client,
            launcher,
            tx,
        }
    }

    /// Run one task to completion
    pub async fn run(&self, task: Task) -> TaskResult {
        let client = &self.client;
        match task {
            Task::Bootstrap => {
                let result = tokio::try_join!(
                    client.popular_movies(),
                    client.popular_tv(),
                    client.trending_movies(),
                )
                .map(|(popular_movies, popular_tv, trending_movies)| HomeShelves {
                    popular_movies,
                    popular_tv,
                    trending_movies,
                })
                .map_err(|e| e.to_string());
                TaskResult::Home(result)
            }
            Task::Search { query } => {
                let result = client.search(&query).await.map_err(|e| e.to_string());
                TaskResult::Suggestions { query, result }
            }
            Task::MovieRecommendations { movie_id } => TaskResult::MovieRecommendations {
                movie_id,
                result: client
                    .movie_recommendations(movie_id)
                    .await
                    .map_err(|e| e.to_string()),
            },
            Task::TvRecommendations { tv_id } => TaskResult::TvRecommendations {
                tv_id,
                result: client
                    .tv_recommendations(tv_id)
                    .await
                    .map_err(|e| e.to_string()),
            },
            Task::TvDetail { tv_id } => TaskResult::TvDetail {
                tv_id,
                result: client.tv_detail(tv_id).await.map_err(|e| e.to_string()),
            },
            Task::Season { tv_id, season } => TaskResult::Season {
                tv_id,
                season,
                result: client
                    .tv_season(tv_id, season)
                    .await
                    .map_err(|e| e.to_string()),
            },
            Task::Launch { session } => {
                let result = self
                    .launcher
                    .launch_session(&session)
                    .await
                    .map(|()| self.launcher.display_name().to_string())
                    .map_err(|e| e.to_string());
                TaskResult::Launched {
                    url: session.url.unwrap_or_default(),
                    result,
                }
            }
        }
    }

    /// Run a task in the background; its result arrives on the channel
    pub fn spawn(&self, task: Task) {
        let runner = self.clone();
        tokio::spawn(async move {
            let result = runner.run(task).await;
            if runner.tx.send(result).is_err() {
                tracing::debug!("Result receiver closed");
            }
        });
    }

    pub fn spawn_all(&self, tasks: impl IntoIterator<Item = Task>) {
        for task in tasks {
            tracing::debug!(?task, "Spawning task");
            self.spawn(task);
        }
    }
}
