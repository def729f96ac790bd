//! Search box and suggestion dropdown

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode};
use crate::models::MediaItem;
use crate::ui::Theme;

/// Render the search input
pub fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let search = &app.search;

    let line = if editing {
        let (before, after) = search.split_at_cursor();
        Line::from(vec![
            Span::styled("⌕ ", Theme::accent()),
            Span::styled(before.to_string(), Theme::text()),
            Span::styled("│", Theme::accent()),
            Span::styled(after.to_string(), Theme::text()),
        ])
    } else if search.query.is_empty() {
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::styled("Search movies & series... (/)", Theme::dimmed()),
        ])
    } else {
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::styled(search.query.clone(), Theme::muted()),
        ])
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if editing {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" SEARCH ", Theme::title()));
    if search.loading.is_loading() {
        block = block.title_bottom(Line::from(Span::styled(" ⟳ ", Theme::loading())).right_aligned());
    }

    frame.render_widget(Paragraph::new(line).style(Theme::input()).block(block), area);
}

/// One suggestion row: title, badge, year
pub fn suggestion_line(item: &MediaItem, active: bool) -> Line<'_> {
    let marker = if active { "▸ " } else { "  " };
    let title_style = if active {
        Theme::active()
    } else {
        Theme::text()
    };

    let mut spans = vec![
        Span::styled(marker, Theme::accent()),
        Span::styled(item.title.as_str(), title_style),
        Span::raw("  "),
        Span::styled(format!(" {} ", item.media_type.badge()), Theme::badge()),
    ];
    if let Some(year) = item.year() {
        spans.push(Span::styled(format!("  {}", year), Theme::year()));
    }
    Line::from(spans)
}

/// Dropdown below the search box; drawn over the content while editing
pub fn render_suggestions(frame: &mut Frame, anchor: Rect, bounds: Rect, app: &App) {
    let suggestions = &app.search.suggestions;
    if app.input_mode != InputMode::Editing || suggestions.is_empty() {
        return;
    }

    let height = (suggestions.len() as u16 + 2).min(bounds.bottom().saturating_sub(anchor.bottom()));
    if height < 3 {
        return;
    }
    let area = Rect {
        x: anchor.x,
        y: anchor.bottom(),
        width: anchor.width,
        height,
    };

    let items: Vec<ListItem> = suggestions
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(suggestion_line(item, suggestions.active() == Some(i))))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .title(Span::styled(" ↑↓ choose · ↵ open · esc close ", Theme::dimmed()))
            .style(Theme::modal()),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(list, area);
}
