//! CLI Command Handlers
//!
//! Each handler takes its parsed args, a TMDB client and the [`Output`], and
//! returns the process [`ExitCode`].

use serde::Serialize;

use crate::api::{TmdbClient, TmdbError};
use crate::cli::{
    validate_tmdb_id, ExitCode, KindArg, Output, PlayMovieArgs, PlayResponse, PlayTvArgs,
    PopularCmd, RecommendCmd, SearchCmd, SeasonCmd, SeasonResponse, SeriesCmd, TrendingCmd,
};
use crate::models::{episode_title, MediaItem, MediaType};
use crate::stream::{EmbedUrls, Launcher, PlayerError};

/// Exit code for a failed TMDB call
pub fn tmdb_exit_code(err: &TmdbError) -> ExitCode {
    match err {
        TmdbError::NotFound => ExitCode::NotFound,
        TmdbError::InvalidResponse(_) => ExitCode::Error,
        TmdbError::RateLimited | TmdbError::Status(_) | TmdbError::RequestFailed(_) => {
            ExitCode::NetworkError
        }
    }
}

fn print_items(output: &Output, items: &[MediaItem]) -> ExitCode {
    match output.print_list(items) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn print_data<T: Serialize>(output: &Output, data: T) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Lists
// =============================================================================

pub async fn popular_cmd(cmd: PopularCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching popular {}...", MediaType::from(cmd.kind)));

    let result = match cmd.kind {
        KindArg::Movie => client.popular_movies().await,
        KindArg::Tv => client.popular_tv().await,
    };

    match result {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            print_items(output, &items)
        }
        Err(e) => output.error(format!("Popular fetch failed: {}", e), tmdb_exit_code(&e)),
    }
}

pub async fn trending_cmd(cmd: TrendingCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info("Fetching trending movies (week)...");

    match client.trending_movies().await {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            print_items(output, &items)
        }
        Err(e) => output.error(format!("Trending fetch failed: {}", e), tmdb_exit_code(&e)),
    }
}

pub async fn search_cmd(cmd: SearchCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query is empty", ExitCode::InvalidArgs);
    }
    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query).await {
        Ok(mut items) => {
            if let Some(kind) = cmd.media_type {
                let kind = MediaType::from(kind);
                items.retain(|i| i.media_type == kind);
            }
            items.truncate(cmd.limit);
            print_items(output, &items)
        }
        Err(e) => output.error(format!("Search failed: {}", e), tmdb_exit_code(&e)),
    }
}

pub async fn recommend_cmd(cmd: RecommendCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let id = match validate_tmdb_id(cmd.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };

    let result = match cmd.kind {
        KindArg::Movie => client.movie_recommendations(id).await,
        KindArg::Tv => client.tv_recommendations(id).await,
    };

    match result {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            print_items(output, &items)
        }
        Err(e) => output.error(
            format!("Recommendations for {} failed: {}", id, e),
            tmdb_exit_code(&e),
        ),
    }
}

// =============================================================================
// Series
// =============================================================================

pub async fn series_cmd(cmd: SeriesCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let id = match validate_tmdb_id(cmd.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };

    match client.tv_detail(id).await {
        Ok(detail) => {
            if output.json {
                return print_data(output, &detail);
            }
            println!("{}", detail);
            for season in detail.explorable_seasons() {
                println!("  {}", season);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Series {} failed: {}", id, e), tmdb_exit_code(&e)),
    }
}

pub async fn season_cmd(cmd: SeasonCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let id = match validate_tmdb_id(cmd.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };

    match client.tv_season(id, cmd.season).await {
        Ok(episodes) => {
            if output.json {
                return print_data(
                    output,
                    SeasonResponse {
                        tv_id: id,
                        season: cmd.season,
                        episodes,
                    },
                );
            }
            for ep in &episodes {
                println!("{}", ep.label(cmd.season));
            }
            ExitCode::Success
        }
        Err(e) => output.error(
            format!("Season {} of {} failed: {}", cmd.season, id, e),
            tmdb_exit_code(&e),
        ),
    }
}

// =============================================================================
// Play
// =============================================================================

/// Exit code for a failed launch
pub fn player_exit_code(err: &PlayerError) -> ExitCode {
    match err {
        PlayerError::MissingUrl => ExitCode::InvalidArgs,
        PlayerError::NotFound(_) | PlayerError::StartFailed(_) => ExitCode::PlayerFailed,
    }
}

async fn play_url(
    title: String,
    url: String,
    print_only: bool,
    launcher: &Launcher,
    output: &Output,
) -> ExitCode {
    if print_only {
        return print_data(
            output,
            PlayResponse {
                status: "printed".to_string(),
                title,
                url,
                launcher: None,
            },
        );
    }

    output.info(format!("Opening {} in {}...", title, launcher));
    match launcher.launch(&url).await {
        Ok(()) => print_data(
            output,
            PlayResponse {
                status: "launched".to_string(),
                title,
                url,
                launcher: Some(launcher.to_string()),
            },
        ),
        Err(e) => output.error(e.to_string(), player_exit_code(&e)),
    }
}

pub async fn play_movie_cmd(
    args: PlayMovieArgs,
    embed: &EmbedUrls,
    launcher: &Launcher,
    output: &Output,
) -> ExitCode {
    let id = match validate_tmdb_id(args.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };
    let title = args
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Movie".to_string());

    play_url(title, embed.movie(id), args.print_only, launcher, output).await
}

/// Looks the series up first so the season is checked and the title named
pub async fn play_tv_cmd(
    args: PlayTvArgs,
    client: &TmdbClient,
    embed: &EmbedUrls,
    launcher: &Launcher,
    output: &Output,
) -> ExitCode {
    let id = match validate_tmdb_id(args.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };
    let (season, episode) = match args.resolve() {
        Ok(pair) => pair,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };

    let detail = match client.tv_detail(id).await {
        Ok(detail) => detail,
        Err(e) => {
            return output.error(format!("Series {} failed: {}", id, e), tmdb_exit_code(&e))
        }
    };
    if !detail.seasons.iter().any(|s| s.season_number == season) {
        return output.error(
            format!("{} has no season {}", detail.name, season),
            ExitCode::NotFound,
        );
    }

    let title = episode_title(&detail.name, season, episode);
    play_url(
        title,
        embed.episode(id, season, episode),
        args.print_only,
        launcher,
        output,
    )
    .await
}
