//! Series Explorer panel
//!
//! Season selector and episode list for the series chosen from a shelf or
//! the search box.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{ExplorerState, SelectedSeries};
use crate::ui::theme::{rating_style, Theme};

pub const PLACEHOLDER: &str = "Select a series from below to explore seasons and episodes.";

pub fn render_explorer(
    frame: &mut Frame,
    area: Rect,
    explorer: &mut ExplorerState,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" SERIES EXPLORER ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(series) = explorer.series.as_ref() else {
        let placeholder = Paragraph::new(Span::styled(PLACEHOLDER, Theme::dimmed()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name, badges, overview
            Constraint::Length(1), // Season selector
            Constraint::Min(1),    // Episodes
        ])
        .split(inner);

    render_heading(frame, chunks[0], series);
    render_season_selector(frame, chunks[1], explorer);
    render_episodes(frame, chunks[2], explorer, focused);
}

fn render_heading(frame: &mut Frame, area: Rect, series: &SelectedSeries) {
    let mut title = vec![Span::styled(series.name().to_string(), Theme::title())];

    let overview = match series {
        SelectedSeries::Summary(item) => {
            title.push(Span::styled("  ⟳", Theme::loading()));
            item.overview.as_str()
        }
        SelectedSeries::Detail(detail) => {
            title.extend([
                Span::raw("  "),
                Span::styled(format!(" {} ", detail.season_count_label()), Theme::badge()),
                Span::raw(" "),
                Span::styled(format!(" {} ", detail.episode_count_label()), Theme::badge()),
                Span::raw("  "),
                Span::styled(
                    format!("★ {}", crate::models::rating_badge(detail.vote_average)),
                    rating_style(detail.vote_average),
                ),
            ]);
            detail.overview.as_str()
        }
    };

    let text = vec![
        Line::from(title),
        Line::from(Span::styled(overview.to_string(), Theme::muted())),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

fn render_season_selector(frame: &mut Frame, area: Rect, explorer: &ExplorerState) {
    let seasons = explorer.seasons();
    if seasons.is_empty() {
        let label = format!("Season {}", explorer.season);
        frame.render_widget(Paragraph::new(Span::styled(label, Theme::dimmed())), area);
        return;
    }

    let mut spans = vec![Span::styled("◂ ", Theme::keybind())];
    for season in seasons {
        let style = if season.season_number == explorer.season {
            Theme::active()
        } else {
            Theme::badge()
        };
        spans.push(Span::styled(format!(" {} ", season.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("▸", Theme::keybind()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_episodes(frame: &mut Frame, area: Rect, explorer: &mut ExplorerState, focused: bool) {
    if explorer.episodes.is_empty() {
        let text = if explorer.loading.is_loading() {
            let msg = explorer.loading.message().unwrap_or("Loading episodes");
            Span::styled(format!("⟳ {}...", msg), Theme::loading())
        } else {
            Span::styled("No episodes", Theme::dimmed())
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
        return;
    }

    // Two lines per episode
    let visible = (area.height / 2).max(1) as usize;
    explorer.list.scroll_into_view(visible);
    let start = explorer.list.offset;
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = explorer
        .episodes
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, ep)| {
            let is_selected = focused && i == explorer.list.selected;
            let marker = if is_selected { "▸ " } else { "  " };
            let overview: String = ep.overview.chars().take(width).collect();

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Theme::accent()),
                    Span::styled(
                        ep.label(explorer.season),
                        if is_selected {
                            Theme::selected()
                        } else {
                            Theme::text()
                        },
                    ),
                ]),
                Line::from(vec![Span::raw("  "), Span::styled(overview, Theme::dimmed())]),
            ])
        })
        .collect();

    frame.render_widget(List::new(items), area);
}
