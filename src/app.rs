//! App state and core application logic
//!
//! A pure state machine: keystrokes, clock ticks and task results go in,
//! [`Task`]s come out. Nothing here touches the network or the terminal.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::models::{episode_title, Episode, MediaItem, SeasonSummary, TvDetail};
use crate::search::SearchState;
use crate::stream::{EmbedUrls, PlayerSession};
use crate::tasks::{HomeShelves, Task, TaskResult};

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    /// Replace the list contents: selection back to the top
    pub fn reset(&mut self, len: usize) {
        self.selected = 0;
        self.offset = 0;
        self.len = len;
    }

    /// Apply the common navigation keys; false if the key is not one of them
    fn handle_nav_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.up(),
            KeyCode::Down | KeyCode::Char('j') => self.down(),
            KeyCode::PageUp => self.page_up(PAGE_SIZE),
            KeyCode::PageDown => self.page_down(PAGE_SIZE),
            KeyCode::Home | KeyCode::Char('g') => self.first(),
            KeyCode::End | KeyCode::Char('G') => self.last(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Focus
// =============================================================================

/// Which panel receives navigation keys in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Explorer,
    #[default]
    PopularMovies,
    RecommendedMovies,
    PopularSeries,
    RecommendedSeries,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Explorer,
        Focus::PopularMovies,
        Focus::RecommendedMovies,
        Focus::PopularSeries,
        Focus::RecommendedSeries,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next panel (Tab)
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous panel (Shift+Tab)
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

// =============================================================================
// Shelves
// =============================================================================

/// A titled horizontal row of cards
#[derive(Debug, Clone)]
pub struct Shelf {
    pub title: &'static str,
    pub items: Vec<MediaItem>,
    pub list: ListState,
    pub loading: LoadingState,
}

impl Shelf {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            items: Vec::new(),
            list: ListState::default(),
            loading: LoadingState::Idle,
        }
    }

    pub fn set_items(&mut self, items: Vec<MediaItem>) {
        self.list.reset(items.len());
        self.items = items;
        self.loading = LoadingState::Idle;
    }

    pub fn selected(&self) -> Option<&MediaItem> {
        self.items.get(self.list.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Series Explorer
// =============================================================================

/// The explored series: the card it was chosen from, until the full record
/// arrives
#[derive(Debug, Clone, PartialEq)]
pub enum SelectedSeries {
    Summary(MediaItem),
    Detail(TvDetail),
}

impl SelectedSeries {
    pub fn id(&self) -> u64 {
        match self {
            SelectedSeries::Summary(item) => item.id,
            SelectedSeries::Detail(detail) => detail.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SelectedSeries::Summary(item) => &item.title,
            SelectedSeries::Detail(detail) => &detail.name,
        }
    }

    pub fn detail(&self) -> Option<&TvDetail> {
        match self {
            SelectedSeries::Summary(_) => None,
            SelectedSeries::Detail(detail) => Some(detail),
        }
    }
}

/// Seasons and episodes of the selected series
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub series: Option<SelectedSeries>,
    pub season: u16,
    pub episodes: Vec<Episode>,
    pub list: ListState,
    pub loading: LoadingState,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            series: None,
            season: 1,
            episodes: Vec::new(),
            list: ListState::default(),
            loading: LoadingState::Idle,
        }
    }
}

impl ExplorerState {
    pub fn series_id(&self) -> Option<u64> {
        self.series.as_ref().map(SelectedSeries::id)
    }

    /// Seasons offered in the selector; empty until the detail arrives
    pub fn seasons(&self) -> Vec<&SeasonSummary> {
        self.series
            .as_ref()
            .and_then(SelectedSeries::detail)
            .map(TvDetail::explorable_seasons)
            .unwrap_or_default()
    }

    pub fn selected_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.list.selected)
    }

    fn set_episodes(&mut self, episodes: Vec<Episode>) {
        self.list.reset(episodes.len());
        self.episodes = episodes;
        self.loading = LoadingState::Idle;
    }

    fn start_season(&mut self, season: u16) {
        self.season = season;
        self.episodes.clear();
        self.list.reset(0);
        self.loading = LoadingState::Loading(Some(format!("Loading season {}", season)));
    }

    /// Season adjacent to the current one in the selector, if any
    fn neighbour_season(&self, forward: bool) -> Option<u16> {
        let seasons = self.seasons();
        let current = seasons.iter().position(|s| s.season_number == self.season);
        let target = match (current, forward) {
            (Some(i), true) => i + 1,
            (Some(i), false) => i.checked_sub(1)?,
            (None, _) => 0,
        };
        seasons.get(target).map(|s| s.season_number)
    }
}

// =============================================================================
// Player
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub open: bool,
    pub session: PlayerSession,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    pub focus: Focus,
    /// Global error message (popup)
    pub error: Option<String>,
    /// Transient status bar message
    pub status: Option<String>,

    pub search: SearchState,
    pub popular_movies: Shelf,
    pub recommended_movies: Shelf,
    pub popular_series: Shelf,
    pub recommended_series: Shelf,
    /// Last movie played; drives the recommended movies shelf
    pub seed_movie: Option<MediaItem>,
    pub explorer: ExplorerState,
    pub player: PlayerState,

    embed: EmbedUrls,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(
            EmbedUrls::new(config.embed_base_url.clone()),
            config.debounce(),
            config.suggestion_limit,
        )
    }

    pub fn with_settings(embed: EmbedUrls, debounce: Duration, suggestion_limit: usize) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::default(),
            error: None,
            status: None,
            search: SearchState::new(debounce, suggestion_limit),
            popular_movies: Shelf::new("Popular Movies"),
            recommended_movies: Shelf::new("Recommended Movies"),
            popular_series: Shelf::new("Popular Series"),
            recommended_series: Shelf::new("Recommended Series"),
            seed_movie: None,
            explorer: ExplorerState::default(),
            player: PlayerState::default(),
            embed,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Shelf with input focus, if focus is on a shelf
    pub fn focused_shelf(&self) -> Option<&Shelf> {
        match self.focus {
            Focus::Explorer => None,
            Focus::PopularMovies => Some(&self.popular_movies),
            Focus::RecommendedMovies => Some(&self.recommended_movies),
            Focus::PopularSeries => Some(&self.popular_series),
            Focus::RecommendedSeries => Some(&self.recommended_series),
        }
    }

    fn focused_shelf_mut(&mut self) -> Option<&mut Shelf> {
        match self.focus {
            Focus::Explorer => None,
            Focus::PopularMovies => Some(&mut self.popular_movies),
            Focus::RecommendedMovies => Some(&mut self.recommended_movies),
            Focus::PopularSeries => Some(&mut self.popular_series),
            Focus::RecommendedSeries => Some(&mut self.recommended_series),
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Initial load of the home shelves
    pub fn bootstrap(&mut self) -> Vec<Task> {
        for shelf in [
            &mut self.popular_movies,
            &mut self.popular_series,
            &mut self.recommended_movies,
        ] {
            shelf.loading = LoadingState::Loading(None);
        }
        vec![Task::Bootstrap]
    }

    /// Open the player for a movie and make it the recommendation seed
    pub fn play_movie(&mut self, movie: MediaItem) -> Vec<Task> {
        let title = if movie.title.trim().is_empty() {
            "Movie".to_string()
        } else {
            movie.title.clone()
        };
        let url = (movie.id != 0).then(|| self.embed.movie(movie.id));
        let mut tasks = self.open_player(title, url);

        if movie.id != 0 {
            self.recommended_movies.loading = LoadingState::Loading(None);
            tasks.insert(0, Task::MovieRecommendations { movie_id: movie.id });
        }
        self.seed_movie = Some(movie);
        tasks
    }

    /// Explore a series; refetches only when the series changes
    pub fn choose_tv(&mut self, tv: MediaItem) -> Vec<Task> {
        self.focus = Focus::Explorer;
        if self.explorer.series_id() == Some(tv.id) {
            return Vec::new();
        }

        let tv_id = tv.id;
        self.explorer.series = Some(SelectedSeries::Summary(tv));
        self.explorer.start_season(1);
        self.recommended_series.loading = LoadingState::Loading(None);

        vec![
            Task::TvRecommendations { tv_id },
            Task::TvDetail { tv_id },
            Task::Season { tv_id, season: 1 },
        ]
    }

    /// Switch the explorer to season `n`, if the series offers it
    pub fn select_season(&mut self, n: u16) -> Vec<Task> {
        let Some(tv_id) = self.explorer.series_id() else {
            return Vec::new();
        };
        if n == self.explorer.season || !self.explorer.seasons().iter().any(|s| s.season_number == n)
        {
            return Vec::new();
        }
        self.explorer.start_season(n);
        vec![Task::Season { tv_id, season: n }]
    }

    /// Open the player for one episode
    pub fn play_episode(&mut self, tv_id: u64, season: u16, episode: u16, title: String) -> Vec<Task> {
        let url = (tv_id != 0).then(|| self.embed.episode(tv_id, season, episode));
        self.open_player(title, url)
    }

    fn open_player(&mut self, title: String, url: Option<String>) -> Vec<Task> {
        tracing::info!(%title, url = url.as_deref().unwrap_or("-"), "Opening player");
        let session = PlayerSession::new(title, url);
        let mut tasks = Vec::new();
        if session.url.is_some() {
            tasks.push(Task::Launch {
                session: session.clone(),
            });
        }
        self.player = PlayerState {
            open: true,
            session,
        };
        tasks
    }

    pub fn close_player(&mut self) {
        self.player.open = false;
    }

    /// Play the movie or explore the series behind a card
    pub fn activate(&mut self, item: MediaItem) -> Vec<Task> {
        if item.is_movie() {
            self.play_movie(item)
        } else {
            self.choose_tv(item)
        }
    }

    fn play_selected_episode(&mut self) -> Vec<Task> {
        let (Some(series), Some(episode)) =
            (self.explorer.series.as_ref(), self.explorer.selected_episode())
        else {
            return Vec::new();
        };
        let season = self.explorer.season;
        let tv_id = series.id();
        let number = episode.episode_number;
        let title = episode_title(series.name(), season, number);
        self.play_episode(tv_id, season, number, title)
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Advance timers; emits a search once the query settles
    pub fn tick(&mut self, now: Instant) -> Vec<Task> {
        self.search
            .tick(now)
            .map(|query| Task::Search { query })
            .into_iter()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Task Results
    // -------------------------------------------------------------------------

    /// Fold a finished task back into the state
    pub fn apply(&mut self, result: TaskResult) -> Vec<Task> {
        match result {
            TaskResult::Home(Ok(home)) => self.apply_home(home),
            TaskResult::Home(Err(e)) => {
                tracing::warn!(error = %e, "Failed to load home shelves");
                for shelf in [
                    &mut self.popular_movies,
                    &mut self.popular_series,
                    &mut self.recommended_movies,
                ] {
                    shelf.loading = LoadingState::Error(e.clone());
                }
                self.set_error(format!("Failed to load TMDB lists: {}", e));
            }
            TaskResult::Suggestions { query, result } => {
                self.search.receive(&query, result);
            }
            TaskResult::MovieRecommendations { movie_id, result } => {
                if self.seed_movie.as_ref().map(|m| m.id) != Some(movie_id) {
                    tracing::debug!(movie_id, "Discarding recommendations for old seed");
                    return Vec::new();
                }
                match result {
                    Ok(items) => self.recommended_movies.set_items(items),
                    Err(e) => {
                        tracing::warn!(movie_id, error = %e, "Movie recommendations failed");
                        self.recommended_movies.loading = LoadingState::Idle;
                    }
                }
            }
            TaskResult::TvRecommendations { tv_id, result } => {
                if self.explorer.series_id() != Some(tv_id) {
                    return Vec::new();
                }
                match result {
                    Ok(items) => self.recommended_series.set_items(items),
                    Err(e) => {
                        tracing::warn!(tv_id, error = %e, "Series recommendations failed");
                        self.recommended_series.loading = LoadingState::Idle;
                    }
                }
            }
            TaskResult::TvDetail { tv_id, result } => {
                if self.explorer.series_id() != Some(tv_id) {
                    return Vec::new();
                }
                match result {
                    Ok(detail) => return self.apply_detail(detail),
                    Err(e) => tracing::warn!(tv_id, error = %e, "Series detail failed"),
                }
            }
            TaskResult::Season {
                tv_id,
                season,
                result,
            } => {
                if self.explorer.series_id() != Some(tv_id) || self.explorer.season != season {
                    tracing::debug!(tv_id, season, "Discarding stale season");
                    return Vec::new();
                }
                match result {
                    Ok(episodes) => self.explorer.set_episodes(episodes),
                    Err(e) => {
                        tracing::warn!(tv_id, season, error = %e, "Season fetch failed");
                        self.explorer.set_episodes(Vec::new());
                    }
                }
            }
            TaskResult::Launched { url, result } => match result {
                Ok(launcher) => self.status = Some(format!("Opened in {}", launcher)),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Launch failed");
                    self.set_error(e);
                }
            },
        }
        Vec::new()
    }

    fn apply_home(&mut self, home: HomeShelves) {
        self.popular_movies.set_items(home.popular_movies);
        self.popular_series.set_items(home.popular_tv);
        // A movie played during startup already owns this shelf
        if self.seed_movie.is_none() {
            self.recommended_movies.set_items(home.trending_movies);
        } else {
            self.recommended_movies.loading = LoadingState::Idle;
        }
    }

    fn apply_detail(&mut self, detail: TvDetail) -> Vec<Task> {
        let tv_id = detail.id;
        let default = detail.default_season();
        self.explorer.series = Some(SelectedSeries::Detail(detail));
        if default != self.explorer.season {
            self.explorer.start_season(default);
            return vec![Task::Season {
                tv_id,
                season: default,
            }];
        }
        Vec::new()
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Task> {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle a keypress at `now` (the debouncer's clock)
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Vec<Task> {
        // Any keypress dismisses the error popup
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Vec::new();
        }

        if self.player.open {
            return self.handle_player_key(key);
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key, now),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_player_key(&mut self, key: KeyEvent) -> Vec<Task> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => {
                self.close_player();
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char('o') => vec![Task::Launch {
                session: self.player.session.clone(),
            }],
            _ => Vec::new(),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Task> {
        let has_suggestions = !self.search.suggestions.is_empty();

        match key.code {
            KeyCode::Down if has_suggestions => self.search.suggestions.next(),
            KeyCode::Up if has_suggestions => self.search.suggestions.prev(),
            KeyCode::Enter if has_suggestions => {
                let Some(item) = self.search.suggestions.chosen().cloned() else {
                    return Vec::new();
                };
                self.search.reset(now);
                self.input_mode = InputMode::Normal;
                return self.activate(item);
            }
            KeyCode::Esc if has_suggestions => {
                self.search.suggestions.clear();
                self.search.in_flight = None;
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.search.suggestions.clear();
                self.search.in_flight = None;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c) => self.search.insert(c, now),
            KeyCode::Backspace => self.search.backspace(now),
            KeyCode::Delete => self.search.delete(now),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Home => self.search.cursor_home(),
            KeyCode::End => self.search.cursor_end(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Task> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return Vec::new();
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                return Vec::new();
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Vec::new();
            }
            KeyCode::Esc => {
                self.status = None;
                return Vec::new();
            }
            _ => {}
        }

        if self.focus == Focus::Explorer {
            return self.handle_explorer_key(key);
        }

        if key.code == KeyCode::Enter {
            return match self.focused_shelf().and_then(Shelf::selected).cloned() {
                Some(item) => self.activate(item),
                None => Vec::new(),
            };
        }

        // Shelves scroll horizontally; accept both axes
        let code = match key.code {
            KeyCode::Left | KeyCode::Char('h') => KeyCode::Up,
            KeyCode::Right | KeyCode::Char('l') => KeyCode::Down,
            other => other,
        };
        if let Some(shelf) = self.focused_shelf_mut() {
            shelf.list.handle_nav_key(code);
        }
        Vec::new()
    }

    fn handle_explorer_key(&mut self, key: KeyEvent) -> Vec<Task> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                match self.explorer.neighbour_season(false) {
                    Some(n) => self.select_season(n),
                    None => Vec::new(),
                }
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                match self.explorer.neighbour_season(true) {
                    Some(n) => self.select_season(n),
                    None => Vec::new(),
                }
            }
            KeyCode::Enter | KeyCode::Char('p') => self.play_selected_episode(),
            code => {
                self.explorer.list.handle_nav_key(code);
                Vec::new()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn launch(title: &str, url: &str) -> Task {
        Task::Launch {
            session: PlayerSession::new(title, Some(url.to_string())),
        }
    }

    fn movie(id: u64, title: &str) -> MediaItem {
        MediaItem {
            id,
            media_type: MediaType::Movie,
            title: title.to_string(),
            date: Some("2020-01-01".to_string()),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 7.0,
        }
    }

    fn series(id: u64, name: &str) -> MediaItem {
        MediaItem {
            media_type: MediaType::Tv,
            ..movie(id, name)
        }
    }

    fn detail(id: u64, seasons: &[u16]) -> TvDetail {
        TvDetail {
            id,
            name: "Show".to_string(),
            first_air_date: None,
            seasons: seasons
                .iter()
                .map(|&n| SeasonSummary {
                    id: None,
                    season_number: n,
                    name: None,
                    episode_count: 10,
                })
                .collect(),
            number_of_seasons: seasons.len() as u16,
            number_of_episodes: 10 * seasons.len() as u32,
            overview: String::new(),
            vote_average: 8.0,
            poster_path: None,
        }
    }

    fn episode(n: u16) -> Episode {
        Episode {
            id: n as u64,
            episode_number: n,
            name: format!("Episode {}", n),
            overview: String::new(),
            still_path: None,
        }
    }

    // -------------------------------------------------------------------------
    // ListState
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.down();
        list.down();
        assert_eq!(list.selected, 2);
        list.page_down(10);
        assert_eq!(list.selected, 4);
        list.down();
        assert_eq!(list.selected, 4);
        list.page_up(3);
        assert_eq!(list.selected, 1);
        list.first();
        assert_eq!(list.selected, 0);
        list.up();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_state_scroll_into_view() {
        let mut list = ListState::new(20);
        list.selected = 12;
        list.scroll_into_view(5);
        assert_eq!(list.offset, 8);
        list.selected = 3;
        list.scroll_into_view(5);
        assert_eq!(list.offset, 3);
    }

    #[test]
    fn test_list_state_empty() {
        let mut list = ListState::new(0);
        list.down();
        list.last();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::RecommendedSeries.next(), Focus::Explorer);
        assert_eq!(Focus::Explorer.prev(), Focus::RecommendedSeries);
        assert_eq!(Focus::PopularMovies.next(), Focus::RecommendedMovies);
    }

    // -------------------------------------------------------------------------
    // Bootstrap
    // -------------------------------------------------------------------------

    #[test]
    fn test_bootstrap_fills_shelves() {
        let mut app = App::default();
        assert_eq!(app.bootstrap(), vec![Task::Bootstrap]);
        assert!(app.popular_movies.loading.is_loading());

        app.apply(TaskResult::Home(Ok(HomeShelves {
            popular_movies: vec![movie(1, "A")],
            popular_tv: vec![series(2, "B")],
            trending_movies: vec![movie(3, "C")],
        })));
        assert_eq!(app.popular_movies.items[0].id, 1);
        assert_eq!(app.popular_series.items[0].id, 2);
        assert_eq!(app.recommended_movies.items[0].id, 3);
        assert!(app.recommended_series.is_empty());
    }

    #[test]
    fn test_bootstrap_failure_leaves_shelves_empty() {
        let mut app = App::default();
        app.bootstrap();
        app.apply(TaskResult::Home(Err("TMDB error 500".into())));
        assert!(app.popular_movies.is_empty());
        assert!(app.recommended_movies.loading.is_error());
        assert!(app.error.as_deref().unwrap_or("").contains("TMDB error 500"));
    }

    #[test]
    fn test_bootstrap_after_play_keeps_seed_recommendations() {
        let mut app = App::default();
        app.bootstrap();
        app.play_movie(movie(550, "Fight Club"));
        app.apply(TaskResult::MovieRecommendations {
            movie_id: 550,
            result: Ok(vec![movie(680, "Pulp Fiction")]),
        });
        app.apply(TaskResult::Home(Ok(HomeShelves {
            trending_movies: vec![movie(3, "C")],
            ..HomeShelves::default()
        })));
        assert_eq!(app.recommended_movies.items[0].id, 680);
    }

    // -------------------------------------------------------------------------
    // Player
    // -------------------------------------------------------------------------

    #[test]
    fn test_play_movie() {
        let mut app = App::default();
        let tasks = app.play_movie(movie(550, "Fight Club"));

        assert_eq!(
            tasks,
            vec![
                Task::MovieRecommendations { movie_id: 550 },
                launch("Fight Club", "https://vidlink.pro/movie/550"),
            ]
        );
        assert!(app.player.open);
        assert_eq!(app.player.session.title, "Fight Club");
        assert_eq!(app.seed_movie.as_ref().map(|m| m.id), Some(550));
    }

    #[test]
    fn test_play_movie_without_title_or_id() {
        let mut app = App::default();
        let tasks = app.play_movie(movie(0, ""));
        assert!(tasks.is_empty());
        assert_eq!(app.player.session.title, "Movie");
        assert_eq!(app.player.session.body(), "Missing TMDB id");

        // Reopening still goes through the launcher, which reports the missing id
        assert_eq!(
            app.handle_key(key(KeyCode::Char('o'))),
            vec![Task::Launch {
                session: PlayerSession::new("Movie", None)
            }]
        );
    }

    #[test]
    fn test_stale_movie_recommendations_discarded() {
        let mut app = App::default();
        app.play_movie(movie(1, "First"));
        app.play_movie(movie(2, "Second"));
        app.apply(TaskResult::MovieRecommendations {
            movie_id: 1,
            result: Ok(vec![movie(9, "Old")]),
        });
        assert!(app.recommended_movies.is_empty());
    }

    #[test]
    fn test_recommendation_failure_keeps_shelf() {
        let mut app = App::default();
        app.recommended_movies.set_items(vec![movie(3, "Trending")]);
        app.play_movie(movie(1, "First"));
        app.apply(TaskResult::MovieRecommendations {
            movie_id: 1,
            result: Err("TMDB error 500".into()),
        });
        assert_eq!(app.recommended_movies.items[0].id, 3);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_player_keys() {
        let mut app = App::default();
        app.play_movie(movie(550, "Fight Club"));

        // Modal swallows navigation keys
        assert!(app.handle_key(key(KeyCode::Tab)).is_empty());
        assert_eq!(app.focus, Focus::PopularMovies);

        assert_eq!(
            app.handle_key(key(KeyCode::Char('o'))),
            vec![launch("Fight Club", "https://vidlink.pro/movie/550")]
        );
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.player.open);
        assert!(app.running);
    }

    #[test]
    fn test_launch_result() {
        let mut app = App::default();
        app.apply(TaskResult::Launched {
            url: "u".into(),
            result: Ok("browser".into()),
        });
        assert_eq!(app.status.as_deref(), Some("Opened in browser"));

        app.apply(TaskResult::Launched {
            url: "u".into(),
            result: Err("Player 'mpv' not found. Install it first.".into()),
        });
        assert!(app.error.is_some());
    }

    // -------------------------------------------------------------------------
    // Series Explorer
    // -------------------------------------------------------------------------

    #[test]
    fn test_choose_tv() {
        let mut app = App::default();
        let tasks = app.choose_tv(series(1396, "Breaking Bad"));

        assert_eq!(app.focus, Focus::Explorer);
        assert_eq!(app.explorer.season, 1);
        assert_eq!(
            tasks,
            vec![
                Task::TvRecommendations { tv_id: 1396 },
                Task::TvDetail { tv_id: 1396 },
                Task::Season {
                    tv_id: 1396,
                    season: 1
                },
            ]
        );

        // Same series again: nothing to fetch
        assert!(app.choose_tv(series(1396, "Breaking Bad")).is_empty());
    }

    #[test]
    fn test_detail_with_default_season_one() {
        let mut app = App::default();
        app.choose_tv(series(1, "Show"));
        let tasks = app.apply(TaskResult::TvDetail {
            tv_id: 1,
            result: Ok(detail(1, &[0, 1, 2])),
        });
        assert!(tasks.is_empty());
        assert_eq!(app.explorer.seasons().len(), 2);
        assert!(app.explorer.series.as_ref().and_then(|s| s.detail()).is_some());
    }

    #[test]
    fn test_detail_switches_to_first_season_when_no_season_one() {
        let mut app = App::default();
        app.choose_tv(series(1, "Show"));
        let tasks = app.apply(TaskResult::TvDetail {
            tv_id: 1,
            result: Ok(detail(1, &[0, 2])),
        });
        // Specials come first and become the default even though hidden
        assert_eq!(app.explorer.season, 0);
        assert_eq!(tasks, vec![Task::Season { tv_id: 1, season: 0 }]);
        assert_eq!(app.explorer.seasons().len(), 1);
    }

    #[test]
    fn test_season_results_guarded() {
        let mut app = App::default();
        app.choose_tv(series(1, "Show"));
        app.apply(TaskResult::TvDetail {
            tv_id: 1,
            result: Ok(detail(1, &[1, 2])),
        });

        app.apply(TaskResult::Season {
            tv_id: 1,
            season: 2,
            result: Ok(vec![episode(1)]),
        });
        assert!(app.explorer.episodes.is_empty());

        app.apply(TaskResult::Season {
            tv_id: 1,
            season: 1,
            result: Ok(vec![episode(1), episode(2)]),
        });
        assert_eq!(app.explorer.episodes.len(), 2);

        app.apply(TaskResult::Season {
            tv_id: 99,
            season: 1,
            result: Ok(vec![]),
        });
        assert_eq!(app.explorer.episodes.len(), 2);
    }

    #[test]
    fn test_season_failure_empties_episodes() {
        let mut app = App::default();
        app.choose_tv(series(1, "Show"));
        app.explorer.set_episodes(vec![episode(1)]);
        app.apply(TaskResult::Season {
            tv_id: 1,
            season: 1,
            result: Err("TMDB error 500".into()),
        });
        assert!(app.explorer.episodes.is_empty());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_select_season_restricted_to_explorable() {
        let mut app = App::default();
        app.choose_tv(series(1, "Show"));
        // No detail yet
        assert!(app.select_season(2).is_empty());

        app.apply(TaskResult::TvDetail {
            tv_id: 1,
            result: Ok(detail(1, &[0, 1, 2])),
        });
        assert!(app.select_season(0).is_empty());
        assert!(app.select_season(7).is_empty());
        assert_eq!(app.select_season(2), vec![Task::Season { tv_id: 1, season: 2 }]);
        assert_eq!(app.explorer.season, 2);
    }

    #[test]
    fn test_explorer_keys() {
        let mut app = App::default();
        app.choose_tv(series(1396, "Breaking Bad"));
        app.apply(TaskResult::TvDetail {
            tv_id: 1396,
            result: Ok(detail(1396, &[1, 2])),
        });
        app.apply(TaskResult::Season {
            tv_id: 1396,
            season: 1,
            result: Ok(vec![episode(1), episode(2), episode(3)]),
        });

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        let tasks = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            tasks,
            vec![launch("Show - S1E3", "https://vidlink.pro/tv/1396-1-3")]
        );
        assert_eq!(app.player.session.title, "Show - S1E3");
        app.close_player();

        assert_eq!(
            app.handle_key(key(KeyCode::Right)),
            vec![Task::Season { tv_id: 1396, season: 2 }]
        );
        // Already on the last season
        assert!(app.handle_key(key(KeyCode::Right)).is_empty());
        assert_eq!(
            app.handle_key(key(KeyCode::Left)),
            vec![Task::Season { tv_id: 1396, season: 1 }]
        );
    }

    #[test]
    fn test_stale_tv_results_discarded() {
        let mut app = App::default();
        app.choose_tv(series(1, "First"));
        app.choose_tv(series(2, "Second"));
        app.apply(TaskResult::TvRecommendations {
            tv_id: 1,
            result: Ok(vec![series(5, "Other")]),
        });
        app.apply(TaskResult::TvDetail {
            tv_id: 1,
            result: Ok(detail(1, &[1])),
        });
        assert!(app.recommended_series.is_empty());
        assert_eq!(app.explorer.series_id(), Some(2));
        assert!(app.explorer.series.as_ref().and_then(|s| s.detail()).is_none());
    }

    // -------------------------------------------------------------------------
    // Shelves & Keys
    // -------------------------------------------------------------------------

    #[test]
    fn test_shelf_enter_routes_by_media_type() {
        let mut app = App::default();
        app.popular_series.set_items(vec![series(10, "S")]);
        app.focus = Focus::PopularSeries;
        let tasks = app.handle_key(key(KeyCode::Enter));
        assert_eq!(tasks.len(), 3);
        assert_eq!(app.focus, Focus::Explorer);

        app.popular_movies.set_items(vec![movie(1, "A"), movie(2, "B")]);
        app.focus = Focus::PopularMovies;
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.seed_movie.as_ref().map(|m| m.id), Some(2));
    }

    #[test]
    fn test_app_quit_keys() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = App::default();
        app.focus_search();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_typing_q_in_search_does_not_quit() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.search.query, "q");
    }

    #[test]
    fn test_suggestion_flow() {
        let start = Instant::now();
        let mut app = App::with_settings(EmbedUrls::default(), Duration::from_millis(250), 8);
        app.focus_search();
        for c in "bre".chars() {
            app.handle_key_at(key(KeyCode::Char(c)), start);
        }
        assert!(app.tick(start + Duration::from_millis(100)).is_empty());
        let tasks = app.tick(start + Duration::from_millis(300));
        assert_eq!(tasks, vec![Task::Search { query: "bre".into() }]);

        app.apply(TaskResult::Suggestions {
            query: "bre".into(),
            result: Ok(vec![movie(1, "Brazil"), series(1396, "Breaking Bad")]),
        });
        app.handle_key_at(key(KeyCode::Up), start);
        assert_eq!(app.search.suggestions.active(), Some(1));

        let tasks = app.handle_key_at(key(KeyCode::Enter), start);
        assert_eq!(tasks.len(), 3);
        assert_eq!(app.explorer.series_id(), Some(1396));
        assert!(app.search.suggestions.is_empty());
        assert_eq!(app.search.query, "");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_editing_nav_keys_ignored_without_suggestions() {
        let now = Instant::now();
        let mut app = App::default();
        app.focus_search();
        assert!(app.handle_key_at(key(KeyCode::Down), now).is_empty());
        assert!(app.handle_key_at(key(KeyCode::Enter), now).is_empty());
        assert_eq!(app.search.suggestions.active(), None);
        assert_eq!(app.input_mode, InputMode::Editing);

        app.handle_key_at(key(KeyCode::Esc), now);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_escape_clears_suggestions_first() {
        let now = Instant::now();
        let mut app = App::default();
        app.focus_search();
        app.search.suggestions.set(vec![movie(1, "A")]);

        app.handle_key_at(key(KeyCode::Esc), now);
        assert!(app.search.suggestions.is_empty());
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_tab_out_of_search_drops_pending_results() {
        let start = Instant::now();
        let mut app = App::default();
        app.focus_search();
        app.search.suggestions.set(vec![movie(1, "Brazil")]);
        app.handle_key_at(key(KeyCode::Char('b')), start);
        assert_eq!(app.tick(start + Duration::from_secs(1)).len(), 1);

        app.handle_key_at(key(KeyCode::Tab), start);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.search.suggestions.is_empty());
        assert!(app.search.in_flight.is_none());

        app.apply(TaskResult::Suggestions {
            query: "b".into(),
            result: Ok(vec![series(1396, "Breaking Bad")]),
        });
        assert!(app.search.suggestions.is_empty());
    }

    #[test]
    fn test_error_cleared_on_keypress() {
        let mut app = App::default();
        app.set_error("boom");
        app.handle_key(key(KeyCode::Down));
        assert!(app.error.is_none());
    }
}
