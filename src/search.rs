//! Search box state: text editing, debouncing and the suggestion list
//!
//! Typing feeds a [`Debouncer`]; once the text has been still for the
//! configured delay the settled query is searched and the top results fill
//! the [`Suggestions`] dropdown.

use std::time::{Duration, Instant};

use crate::app::LoadingState;
use crate::models::MediaItem;

// =============================================================================
// Debouncer
// =============================================================================

/// Emits a value once it has stopped changing for `delay`
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    settled: String,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            settled: String::new(),
        }
    }

    /// Record an edit; restarts the quiet period
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// Return the newly settled value, if the quiet period has elapsed and
    /// the value differs from the last one settled.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (_, at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*at) < self.delay {
            return None;
        }

        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }

    /// Last settled value
    pub fn settled(&self) -> &str {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

// =============================================================================
// Suggestions
// =============================================================================

/// Dropdown of top search results with a keyboard-driven active row
#[derive(Debug, Clone)]
pub struct Suggestions {
    items: Vec<MediaItem>,
    active: Option<usize>,
    limit: usize,
}

impl Default for Suggestions {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Suggestions {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            active: None,
            limit,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Replace the list with the first `limit` results
    pub fn set(&mut self, mut items: Vec<MediaItem>) {
        items.truncate(self.limit);
        self.items = items;
        self.active = None;
    }

    /// Drop all suggestions and the active row
    pub fn clear(&mut self) {
        self.items.clear();
        self.active = None;
    }

    /// Move the active row down, wrapping to the top
    pub fn next(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Move the active row up, wrapping to the bottom
    pub fn prev(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    /// The suggestion Enter would choose: the active row, else the first
    pub fn chosen(&self) -> Option<&MediaItem> {
        self.active
            .and_then(|i| self.items.get(i))
            .or_else(|| self.items.first())
    }
}

// =============================================================================
// Search State
// =============================================================================

/// Search box text, cursor, debouncer and suggestions
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
    pub debouncer: Debouncer,
    pub suggestions: Suggestions,
    /// Query whose results are awaited; older responses are discarded
    pub in_flight: Option<String>,
    pub loading: LoadingState,
}

impl SearchState {
    pub fn new(delay: Duration, limit: usize) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            suggestions: Suggestions::new(limit),
            ..Self::default()
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn edited(&mut self, now: Instant) {
        self.debouncer.input(self.query.clone(), now);
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char, now: Instant) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
        self.edited(now);
    }

    /// Delete character before cursor
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.query.remove(at);
            self.edited(now);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self, now: Instant) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.query.remove(at);
            self.edited(now);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query text (counts as an edit)
    pub fn clear(&mut self, now: Instant) {
        self.query.clear();
        self.cursor = 0;
        self.edited(now);
    }

    /// Query split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }

    /// Advance the debouncer. Returns the query to search, if any.
    /// A blank settled query clears the suggestions instead.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let settled = self.debouncer.poll(now)?;
        if settled.trim().is_empty() {
            self.suggestions.clear();
            self.in_flight = None;
            self.loading = LoadingState::Idle;
            return None;
        }
        self.in_flight = Some(settled.clone());
        self.loading = LoadingState::Loading(None);
        Some(settled)
    }

    /// Accept search results if they answer the awaited query
    pub fn receive(&mut self, query: &str, result: Result<Vec<MediaItem>, String>) -> bool {
        if self.in_flight.as_deref() != Some(query) {
            tracing::debug!(query, "Discarding stale suggestions");
            return false;
        }
        self.in_flight = None;
        self.loading = LoadingState::Idle;
        match result {
            Ok(items) => self.suggestions.set(items),
            Err(e) => {
                tracing::warn!(query, error = %e, "Search failed");
                self.suggestions.clear();
            }
        }
        true
    }

    /// Reset after a suggestion was chosen: no suggestions, empty text
    pub fn reset(&mut self, now: Instant) {
        self.suggestions.clear();
        self.in_flight = None;
        self.loading = LoadingState::Idle;
        self.clear(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn item(id: u64) -> MediaItem {
        MediaItem {
            id,
            media_type: MediaType::Movie,
            title: format!("Movie {}", id),
            date: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 5.0,
        }
    }

    // -------------------------------------------------------------------------
    // Debouncer
    // -------------------------------------------------------------------------

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(250));

        d.input("b", start);
        d.input("ba", start + Duration::from_millis(100));
        assert_eq!(d.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            d.poll(start + Duration::from_millis(350)),
            Some("ba".to_string())
        );
        // Emitted once
        assert_eq!(d.poll(start + Duration::from_millis(900)), None);
        assert_eq!(d.settled(), "ba");
    }

    #[test]
    fn test_debouncer_ignores_unchanged_value() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));

        d.input("dune", start);
        assert!(d.poll(start + Duration::from_millis(20)).is_some());

        // Edit then undo before settling
        d.input("dun", start + Duration::from_millis(30));
        d.input("dune", start + Duration::from_millis(35));
        assert_eq!(d.poll(start + Duration::from_millis(60)), None);
        assert!(!d.is_pending());
    }

    // -------------------------------------------------------------------------
    // Suggestions
    // -------------------------------------------------------------------------

    #[test]
    fn test_suggestions_truncate_to_limit() {
        let mut s = Suggestions::new(8);
        s.set((1..=20).map(item).collect());
        assert_eq!(s.len(), 8);
        assert_eq!(s.items()[7].id, 8);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn test_suggestions_wraparound() {
        let mut s = Suggestions::new(8);
        s.set(vec![item(1), item(2), item(3)]);

        s.next();
        assert_eq!(s.active(), Some(0));
        s.next();
        s.next();
        assert_eq!(s.active(), Some(2));
        s.next();
        assert_eq!(s.active(), Some(0));
        s.prev();
        assert_eq!(s.active(), Some(2));
    }

    #[test]
    fn test_suggestions_prev_from_none_goes_to_last() {
        let mut s = Suggestions::new(8);
        s.set(vec![item(1), item(2), item(3)]);
        s.prev();
        assert_eq!(s.active(), Some(2));
    }

    #[test]
    fn test_suggestions_navigation_on_empty_list() {
        let mut s = Suggestions::new(8);
        s.next();
        s.prev();
        assert_eq!(s.active(), None);
        assert!(s.chosen().is_none());
    }

    #[test]
    fn test_chosen_defaults_to_first() {
        let mut s = Suggestions::new(8);
        s.set(vec![item(1), item(2)]);
        assert_eq!(s.chosen().map(|i| i.id), Some(1));
        s.next();
        s.next();
        assert_eq!(s.chosen().map(|i| i.id), Some(2));
    }

    // -------------------------------------------------------------------------
    // SearchState
    // -------------------------------------------------------------------------

    #[test]
    fn test_search_state_editing() {
        let now = Instant::now();
        let mut search = SearchState::default();

        for c in "hello".chars() {
            search.insert(c, now);
        }
        assert_eq!(search.query, "hello");
        assert_eq!(search.cursor, 5);

        search.cursor_left();
        search.cursor_left();
        search.insert('X', now);
        assert_eq!(search.query, "helXlo");
        assert_eq!(search.cursor, 4);

        search.backspace(now);
        assert_eq!(search.query, "hello");

        search.cursor_home();
        search.delete(now);
        assert_eq!(search.query, "ello");

        search.cursor_end();
        assert_eq!(search.cursor, 4);
    }

    #[test]
    fn test_search_state_multibyte_cursor() {
        let now = Instant::now();
        let mut search = SearchState::default();
        for c in "amélie".chars() {
            search.insert(c, now);
        }
        search.cursor_left();
        search.cursor_left();
        search.cursor_left();
        assert_eq!(search.split_at_cursor(), ("amé", "lie"));
        search.backspace(now);
        assert_eq!(search.query, "amlie");
    }

    #[test]
    fn test_blank_query_clears_without_request() {
        let start = Instant::now();
        let mut search = SearchState::new(Duration::from_millis(10), 8);
        search.suggestions.set(vec![item(1)]);
        search.suggestions.next();

        search.insert(' ', start);
        assert_eq!(search.tick(start + Duration::from_millis(20)), None);
        assert!(search.suggestions.is_empty());
        assert_eq!(search.suggestions.active(), None);
    }

    #[test]
    fn test_tick_marks_query_in_flight() {
        let start = Instant::now();
        let mut search = SearchState::new(Duration::from_millis(10), 8);
        search.insert('x', start);

        assert_eq!(search.tick(start), None);
        assert_eq!(search.tick(start + Duration::from_millis(10)), Some("x".into()));
        assert_eq!(search.in_flight.as_deref(), Some("x"));
        assert!(search.loading.is_loading());
    }

    #[test]
    fn test_receive_discards_stale_results() {
        let mut search = SearchState::default();
        search.in_flight = Some("batman".to_string());

        assert!(!search.receive("bat", Ok(vec![item(1)])));
        assert!(search.suggestions.is_empty());

        assert!(search.receive("batman", Ok(vec![item(2)])));
        assert_eq!(search.suggestions.items()[0].id, 2);
        assert!(search.in_flight.is_none());
    }

    #[test]
    fn test_receive_error_empties_suggestions() {
        let mut search = SearchState::default();
        search.suggestions.set(vec![item(1)]);
        search.in_flight = Some("q".to_string());

        assert!(search.receive("q", Err("TMDB error 500".into())));
        assert!(search.suggestions.is_empty());
    }

    #[test]
    fn test_reset_clears_text_and_suggestions() {
        let now = Instant::now();
        let mut search = SearchState::default();
        search.insert('a', now);
        search.suggestions.set(vec![item(1)]);

        search.reset(now);
        assert_eq!(search.query, "");
        assert_eq!(search.cursor, 0);
        assert!(search.suggestions.is_empty());
        assert!(search.debouncer.is_pending());
    }
}
