//! Terminal UI components
//!
//! Built with ratatui. Layout from top to bottom: header with search box,
//! Series Explorer, four shelves, TMDB attribution, status bar. The
//! suggestion dropdown, player modal and error popup draw on top.

pub mod explorer;
pub mod player;
pub mod search;
pub mod shelf;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Focus, InputMode};

pub const ATTRIBUTION: &str =
    "This product uses the TMDB API but is not endorsed or certified by TMDB.";

/// Render the whole screen; keeps list scroll offsets in view
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                   // Header
            Constraint::Min(8),                      // Explorer
            Constraint::Length(shelf::SHELF_HEIGHT), // Popular movies
            Constraint::Length(shelf::SHELF_HEIGHT), // Recommended movies
            Constraint::Length(shelf::SHELF_HEIGHT), // Popular series
            Constraint::Length(shelf::SHELF_HEIGHT), // Recommended series
            Constraint::Length(1),                   // Attribution
            Constraint::Length(1),                   // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    let explorer_focused = app.focus == Focus::Explorer;
    explorer::render_explorer(frame, chunks[1], &mut app.explorer, explorer_focused);

    let seed = app.seed_movie.as_ref().map(|m| format!("Based on {}", m.title));
    let chosen = app
        .explorer
        .series
        .as_ref()
        .map(|s| format!("Because you chose {}", s.name()));

    let normal = app.input_mode == InputMode::Normal;
    shelf::render_shelf(
        frame,
        chunks[2],
        &mut app.popular_movies,
        None,
        normal && app.focus == Focus::PopularMovies,
    );
    shelf::render_shelf(
        frame,
        chunks[3],
        &mut app.recommended_movies,
        seed,
        normal && app.focus == Focus::RecommendedMovies,
    );
    shelf::render_shelf(
        frame,
        chunks[4],
        &mut app.popular_series,
        None,
        normal && app.focus == Focus::PopularSeries,
    );
    shelf::render_shelf(
        frame,
        chunks[5],
        &mut app.recommended_series,
        chosen,
        normal && app.focus == Focus::RecommendedSeries,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(ATTRIBUTION, Theme::dimmed())).alignment(Alignment::Center),
        chunks[6],
    );
    render_status_bar(frame, chunks[7], app);

    // Overlays
    let search_area = header_layout(chunks[0])[1];
    search::render_suggestions(frame, search_area, area, app);

    if app.player.open {
        player::render_player(frame, area, &app.player);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

fn header_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area)
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = header_layout(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("FLICK", Theme::title()),
        Span::styled("TUI", Theme::accent()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, chunks[0]);

    search::render_search_box(frame, chunks[1], app);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let focus = match app.focus {
        Focus::Explorer => "EXPLORER",
        Focus::PopularMovies => "POPULAR MOVIES",
        Focus::RecommendedMovies => "RECOMMENDED MOVIES",
        Focus::PopularSeries => "POPULAR SERIES",
        Focus::RecommendedSeries => "RECOMMENDED SERIES",
    };

    let help = match (app.input_mode.clone(), app.focus) {
        (InputMode::Editing, _) => " ↑↓:choose  ↵:open  esc:back ",
        (InputMode::Normal, Focus::Explorer) => " ←→:season  ↑↓:episode  ↵:play  tab:next  /:search  q:quit ",
        (InputMode::Normal, _) => " ←→:move  ↵:open  tab:next  /:search  q:quit ",
    };

    let mut spans = vec![
        mode_indicator,
        Span::styled(format!(" {} ", focus), Theme::dimmed()),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("│ {} ", status), Theme::success()));
    }
    spans.push(Span::styled("│", Theme::dimmed()));
    spans.push(Span::styled(help, Theme::dimmed()));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::status_bar()), area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = player::centered(area, 60, 5);
    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
