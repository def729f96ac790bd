//! TMDB (The Movie Database) API client
//!
//! Lists, multi-search, recommendations and series/season metadata.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Episode, MediaItem, MediaType, SeasonSummary, TvDetail};

/// Default API base
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("TMDB error {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, TMDB_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Total attempts (first try included) before a 429 is reported as `RateLimited`
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// GET `endpoint` with extra query pairs; `api_key` is always appended.
    /// Retries rate-limited requests.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            tracing::debug!(endpoint, "TMDB request");

            let response = self
                .client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .query(query)
                .header("Accept", "application/json")
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let body = response.text().await?;
                    return serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    });
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited);
                    }

                    // Retry-After header or exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    tracing::warn!(endpoint, wait_secs, "TMDB rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::Status(status.as_u16()));
                }
            }
        }
    }

    async fn list(&self, endpoint: &str, kind: MediaType) -> Result<Vec<MediaItem>, TmdbError> {
        let response: ListResponse = self.get(endpoint, &[]).await?;
        Ok(response.into_items(Some(kind)))
    }

    /// Popular movies (`/movie/popular`)
    pub async fn popular_movies(&self) -> Result<Vec<MediaItem>, TmdbError> {
        self.list("/movie/popular", MediaType::Movie).await
    }

    /// Popular series (`/tv/popular`)
    pub async fn popular_tv(&self) -> Result<Vec<MediaItem>, TmdbError> {
        self.list("/tv/popular", MediaType::Tv).await
    }

    /// This week's trending movies (`/trending/movie/week`)
    pub async fn trending_movies(&self) -> Result<Vec<MediaItem>, TmdbError> {
        self.list("/trending/movie/week", MediaType::Movie).await
    }

    /// Movies recommended for a seed movie
    pub async fn movie_recommendations(&self, id: u64) -> Result<Vec<MediaItem>, TmdbError> {
        self.list(&format!("/movie/{}/recommendations", id), MediaType::Movie)
            .await
    }

    /// Series recommended for a seed series
    pub async fn tv_recommendations(&self, id: u64) -> Result<Vec<MediaItem>, TmdbError> {
        self.list(&format!("/tv/{}/recommendations", id), MediaType::Tv)
            .await
    }

    /// Multi-search across movies and series; people are dropped
    pub async fn search(&self, query: &str) -> Result<Vec<MediaItem>, TmdbError> {
        let response: ListResponse = self
            .get(
                "/search/multi",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;
        Ok(response.into_items(None))
    }

    /// Full series record with its seasons
    pub async fn tv_detail(&self, id: u64) -> Result<TvDetail, TmdbError> {
        let response: TvResponse = self.get(&format!("/tv/{}", id), &[]).await?;
        Ok(response.into_detail())
    }

    /// Episodes of one season
    pub async fn tv_season(&self, id: u64, season: u16) -> Result<Vec<Episode>, TmdbError> {
        let response: SeasonResponse = self
            .get(&format!("/tv/{}/season/{}", id, season), &[])
            .await?;
        Ok(response.into_episodes())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<MediaRaw>,
}

impl ListResponse {
    /// `kind` is the implied type for endpoints whose entries carry no
    /// `media_type`; multi-search passes `None` and relies on the field.
    fn into_items(self, kind: Option<MediaType>) -> Vec<MediaItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_item(kind))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MediaRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl MediaRaw {
    fn into_item(self, kind: Option<MediaType>) -> Option<MediaItem> {
        let media_type = match self.media_type.as_deref() {
            Some(t) => MediaType::from_tmdb(t)?,
            None => kind?,
        };

        let date = self
            .release_date
            .or(self.first_air_date)
            .filter(|d| !d.is_empty());

        Some(MediaItem {
            id: self.id,
            media_type,
            title: self.title.or(self.name).unwrap_or_default(),
            date,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TvResponse {
    id: u64,
    name: String,
    first_air_date: Option<String>,
    #[serde(default)]
    seasons: Vec<SeasonRaw>,
    number_of_seasons: Option<u16>,
    number_of_episodes: Option<u32>,
    overview: Option<String>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
}

impl TvResponse {
    fn into_detail(self) -> TvDetail {
        let seasons: Vec<SeasonSummary> =
            self.seasons.into_iter().map(SeasonRaw::into_summary).collect();

        TvDetail {
            id: self.id,
            name: self.name,
            first_air_date: self.first_air_date.filter(|d| !d.is_empty()),
            number_of_seasons: self.number_of_seasons.unwrap_or(0),
            number_of_episodes: self.number_of_episodes.unwrap_or(0),
            seasons,
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            poster_path: self.poster_path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonRaw {
    id: Option<u64>,
    season_number: u16,
    name: Option<String>,
    episode_count: Option<u16>,
}

impl SeasonRaw {
    fn into_summary(self) -> SeasonSummary {
        SeasonSummary {
            id: self.id,
            season_number: self.season_number,
            name: self.name,
            episode_count: self.episode_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    #[serde(default)]
    episodes: Vec<EpisodeRaw>,
}

impl SeasonResponse {
    fn into_episodes(self) -> Vec<Episode> {
        self.episodes.into_iter().map(EpisodeRaw::into_episode).collect()
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    id: u64,
    episode_number: u16,
    name: Option<String>,
    overview: Option<String>,
    still_path: Option<String>,
}

impl EpisodeRaw {
    fn into_episode(self) -> Episode {
        Episode {
            id: self.id,
            episode_number: self.episode_number,
            name: self.name.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            still_path: self.still_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(media_type: Option<&str>) -> MediaRaw {
        MediaRaw {
            id: 1,
            media_type: media_type.map(String::from),
            title: None,
            name: Some("Show".to_string()),
            release_date: None,
            first_air_date: Some(String::new()),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
        }
    }

    #[test]
    fn test_media_type_filter() {
        assert!(raw(Some("person")).into_item(None).is_none());
        assert!(raw(Some("tv")).into_item(None).is_some());
        // List endpoints omit media_type
        assert!(raw(None).into_item(None).is_none());
        assert_eq!(
            raw(None).into_item(Some(MediaType::Tv)).map(|i| i.media_type),
            Some(MediaType::Tv)
        );
    }

    #[test]
    fn test_empty_date_and_missing_rating() {
        let item = raw(Some("tv")).into_item(None).unwrap();
        assert_eq!(item.title, "Show");
        assert_eq!(item.date, None);
        assert_eq!(item.vote_average, 0.0);
    }

    #[test]
    fn test_missing_results_is_empty() {
        let parsed: ListResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(parsed.into_items(None).is_empty());

        let season: SeasonResponse = serde_json::from_str("{}").unwrap();
        assert!(season.into_episodes().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TmdbClient::with_base_url("k", "http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
