//! Shelves: titled rows of media cards
//!
//! Each card shows the title, year and rating badge. The row scrolls
//! horizontally to keep the selected card in view.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{LoadingState, Shelf};
use crate::models::MediaItem;
use crate::ui::theme::{rating_style, Theme};

/// Card width including its border
pub const CARD_WIDTH: u16 = 22;

/// Shelf height: shelf border plus a card with title and meta lines
pub const SHELF_HEIGHT: u16 = 6;

/// Cards that fit side by side in `width` columns
pub fn visible_cards(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// Render a shelf; `subtitle` is shown next to the title (e.g. "Based on ...")
pub fn render_shelf(
    frame: &mut Frame,
    area: Rect,
    shelf: &mut Shelf,
    subtitle: Option<String>,
    focused: bool,
) {
    let mut title = vec![Span::styled(format!(" {} ", shelf.title), Theme::title())];
    if let Some(sub) = subtitle {
        title.push(Span::styled(format!("{} ", sub), Theme::subtitle()));
    }
    if !shelf.is_empty() && focused {
        title.push(Span::styled(
            format!("({}/{}) ", shelf.list.selected + 1, shelf.items.len()),
            Theme::dimmed(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Line::from(title));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if shelf.is_empty() {
        let text = match &shelf.loading {
            LoadingState::Loading(_) => Span::styled("⟳ Loading...", Theme::loading()),
            LoadingState::Error(_) => Span::styled("Could not load this shelf", Theme::error()),
            LoadingState::Idle => Span::styled("Nothing here yet", Theme::dimmed()),
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        return;
    }

    let visible = visible_cards(inner.width);
    shelf.list.scroll_into_view(visible);
    let start = shelf.list.offset;

    for (slot, (index, item)) in shelf
        .items
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let card = Rect {
            x: inner.x + slot as u16 * CARD_WIDTH,
            y: inner.y,
            width: CARD_WIDTH.min(inner.width),
            height: inner.height,
        };
        render_card(frame, card, item, focused && index == shelf.list.selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &MediaItem, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(if selected {
            Theme::selected()
        } else {
            Style::default()
        });

    let meta = Line::from(vec![
        Span::styled(item.year().unwrap_or("----").to_string(), Theme::year()),
        Span::raw("  "),
        Span::styled(
            format!("★ {}", item.rating_badge()),
            rating_style(item.vote_average),
        ),
    ]);

    let text = vec![
        Line::from(Span::styled(item.title.clone(), Theme::title())),
        meta,
    ];

    // One line each; long titles are cut at the card edge
    frame.render_widget(Paragraph::new(text).block(block), area);
}
