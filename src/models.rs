//! Data structures for FlickTUI
//!
//! Shared models used across the application, organized by domain:
//! - **Media**: movies and series as returned by TMDB list endpoints
//! - **Series**: season and episode details for the Series Explorer
//! - **Formatting**: derived labels shown on cards, badges and the player

use serde::{Deserialize, Serialize};
use std::fmt;

/// TMDB image CDN base
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

// =============================================================================
// Media Models
// =============================================================================

/// Media type discriminator for list and search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Short uppercase badge ("MOVIE" / "TV")
    pub fn badge(&self) -> &'static str {
        match self {
            MediaType::Movie => "MOVIE",
            MediaType::Tv => "TV",
        }
    }

    /// Parse a TMDB `media_type` value, rejecting people and anything else
    pub fn from_tmdb(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "Series"),
        }
    }
}

/// A movie or series as it appears on a shelf or in the suggestion list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    /// `release_date` for movies, `first_air_date` for series
    pub date: Option<String>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
}

impl MediaItem {
    /// Release year (first four characters of the date)
    pub fn year(&self) -> Option<&str> {
        self.date.as_deref().and_then(year)
    }

    /// Rating badge text
    pub fn rating_badge(&self) -> String {
        rating_badge(self.vote_average)
    }

    /// Thumbnail for the suggestion list: poster first, backdrop as fallback
    pub fn thumbnail_url(&self) -> String {
        let poster = poster_url(self.poster_path.as_deref());
        if poster.is_empty() {
            backdrop_url(self.backdrop_path.as_deref())
        } else {
            poster
        }
    }

    pub fn is_movie(&self) -> bool {
        self.media_type == MediaType::Movie
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(y) => write!(f, "{} ({}) [{}]", self.title, y, self.media_type.badge()),
            None => write!(f, "{} [{}]", self.title, self.media_type.badge()),
        }
    }
}

// =============================================================================
// Series Models
// =============================================================================

/// One entry of a series' `seasons` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: Option<u64>,
    pub season_number: u16,
    pub name: Option<String>,
    pub episode_count: u16,
}

impl SeasonSummary {
    /// Selector label, falling back to "Season N" when TMDB has no name
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Season {}", self.season_number),
        }
    }
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} episodes)", self.label(), self.episode_count)
    }
}

/// Full series record from `/tv/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetail {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub seasons: Vec<SeasonSummary>,
    pub number_of_seasons: u16,
    pub number_of_episodes: u32,
    pub overview: String,
    pub vote_average: f32,
    pub poster_path: Option<String>,
}

impl TvDetail {
    /// Seasons offered in the selector (specials, season 0, are hidden)
    pub fn explorable_seasons(&self) -> Vec<&SeasonSummary> {
        self.seasons.iter().filter(|s| s.season_number != 0).collect()
    }

    /// Season opened when the series is first explored:
    /// season 1 if it exists, else whatever comes first, else 1.
    pub fn default_season(&self) -> u16 {
        self.seasons
            .iter()
            .find(|s| s.season_number == 1)
            .or_else(|| self.seasons.first())
            .map(|s| s.season_number)
            .unwrap_or(1)
    }

    pub fn season_count_label(&self) -> String {
        season_count_label(self.number_of_seasons)
    }

    pub fn episode_count_label(&self) -> String {
        format!("{} episodes", self.number_of_episodes)
    }
}

impl fmt::Display for TvDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - ★ {}",
            self.name,
            self.season_count_label(),
            self.episode_count_label(),
            rating_badge(self.vote_average)
        )
    }
}

/// Episode from `/tv/{id}/season/{n}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub episode_number: u16,
    pub name: String,
    pub overview: String,
    pub still_path: Option<String>,
}

impl Episode {
    /// Card label, e.g. "S1 • E3: ...And the Bag's in the River"
    pub fn label(&self, season: u16) -> String {
        format!("S{} • E{}: {}", season, self.episode_number, self.name)
    }

    pub fn still_url(&self) -> String {
        backdrop_url(self.still_path.as_deref())
    }
}

/// Player title for an episode, e.g. "Breaking Bad - S1E3"
pub fn episode_title(series: &str, season: u16, episode: u16) -> String {
    format!("{} - S{}E{}", series, season, episode)
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// First four characters of a TMDB date ("2022-03-04" -> "2022")
pub fn year(date: &str) -> Option<&str> {
    date.get(..4).filter(|y| !y.trim().is_empty())
}

/// Rating with one decimal place
pub fn rating_badge(vote_average: f32) -> String {
    format!("{:.1}", vote_average)
}

/// "1 season" / "5 seasons"
pub fn season_count_label(n: u16) -> String {
    if n == 1 {
        "1 season".to_string()
    } else {
        format!("{} seasons", n)
    }
}

/// Poster image URL (w342), empty when there is no poster
pub fn poster_url(path: Option<&str>) -> String {
    image_url("w342", path)
}

/// Backdrop / still image URL (w780), empty when there is no image
pub fn backdrop_url(path: Option<&str>) -> String {
    image_url("w780", path)
}

fn image_url(size: &str, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", IMAGE_BASE, size, p),
        _ => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(date: Option<&str>) -> MediaItem {
        MediaItem {
            id: 414906,
            media_type: MediaType::Movie,
            title: "The Batman".to_string(),
            date: date.map(String::from),
            overview: String::new(),
            poster_path: None,
            backdrop_path: Some("/backdrop.jpg".to_string()),
            vote_average: 7.8,
        }
    }

    fn season(n: u16) -> SeasonSummary {
        SeasonSummary {
            id: Some(n as u64 + 100),
            season_number: n,
            name: None,
            episode_count: 10,
        }
    }

    fn series(seasons: Vec<SeasonSummary>) -> TvDetail {
        TvDetail {
            id: 1396,
            name: "Breaking Bad".to_string(),
            first_air_date: Some("2008-01-20".to_string()),
            number_of_seasons: seasons.len() as u16,
            seasons,
            number_of_episodes: 62,
            overview: String::new(),
            vote_average: 8.9,
            poster_path: None,
        }
    }

    #[test]
    fn test_media_type_serde() {
        let json = serde_json::to_string(&MediaType::Tv).unwrap();
        assert_eq!(json, "\"tv\"");
        let parsed: MediaType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, MediaType::Movie);
    }

    #[test]
    fn test_media_type_from_tmdb_rejects_person() {
        assert_eq!(MediaType::from_tmdb("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::from_tmdb("tv"), Some(MediaType::Tv));
        assert_eq!(MediaType::from_tmdb("person"), None);
    }

    #[test]
    fn test_year() {
        assert_eq!(year("2022-03-04"), Some("2022"));
        assert_eq!(year(""), None);
        assert_eq!(year("20"), None);
        assert_eq!(movie(None).year(), None);
        assert_eq!(movie(Some("1999-10-15")).year(), Some("1999"));
    }

    #[test]
    fn test_rating_badge() {
        assert_eq!(rating_badge(7.83), "7.8");
        assert_eq!(rating_badge(0.0), "0.0");
        assert_eq!(rating_badge(10.0), "10.0");
    }

    #[test]
    fn test_image_urls() {
        assert_eq!(
            poster_url(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            backdrop_url(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w780/abc.jpg"
        );
        assert_eq!(poster_url(None), "");
        assert_eq!(poster_url(Some("")), "");
    }

    #[test]
    fn test_thumbnail_falls_back_to_backdrop() {
        let mut item = movie(None);
        assert_eq!(
            item.thumbnail_url(),
            "https://image.tmdb.org/t/p/w780/backdrop.jpg"
        );
        item.poster_path = Some("/poster.jpg".to_string());
        assert_eq!(
            item.thumbnail_url(),
            "https://image.tmdb.org/t/p/w342/poster.jpg"
        );
    }

    #[test]
    fn test_explorable_seasons_hide_specials() {
        let tv = series(vec![season(0), season(1), season(2)]);
        let numbers: Vec<u16> = tv.explorable_seasons().iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_default_season_prefers_one() {
        assert_eq!(series(vec![season(0), season(1), season(2)]).default_season(), 1);
        assert_eq!(series(vec![season(3), season(4)]).default_season(), 3);
        assert_eq!(series(vec![season(0)]).default_season(), 0);
        assert_eq!(series(vec![]).default_season(), 1);
    }

    #[test]
    fn test_season_labels() {
        assert_eq!(season_count_label(1), "1 season");
        assert_eq!(season_count_label(5), "5 seasons");
        assert_eq!(season(2).label(), "Season 2");

        let named = SeasonSummary {
            name: Some("Specials".to_string()),
            ..season(0)
        };
        assert_eq!(named.label(), "Specials");
    }

    #[test]
    fn test_episode_labels() {
        let ep = Episode {
            id: 62085,
            episode_number: 3,
            name: "...And the Bag's in the River".to_string(),
            overview: String::new(),
            still_path: None,
        };
        assert_eq!(ep.label(1), "S1 • E3: ...And the Bag's in the River");
        assert_eq!(episode_title("Breaking Bad", 1, 3), "Breaking Bad - S1E3");
        assert_eq!(ep.still_url(), "");
    }

    #[test]
    fn test_media_item_display() {
        assert_eq!(
            movie(Some("2022-03-01")).to_string(),
            "The Batman (2022) [MOVIE]"
        );
        assert_eq!(movie(None).to_string(), "The Batman [MOVIE]");
    }
}
