//! Player modal
//!
//! Shows what is playing and the embed URL handed to the launcher.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::PlayerState;
use crate::ui::Theme;

/// Centered rect of `width` x `height`, clamped to `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_player(frame: &mut Frame, area: Rect, player: &PlayerState) {
    let popup = centered(area, 72, 9);
    frame.render_widget(Clear, popup);

    let session = &player.session;
    let url_line = match session.url.as_deref() {
        Some(url) => Span::styled(url.to_string(), Theme::link()),
        None => Span::styled(session.body().to_string(), Theme::error()),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(session.title.clone(), Theme::title())),
        Line::from(""),
        Line::from(url_line),
        Line::from(""),
    ];
    let mut keys = Vec::new();
    if session.url.is_some() {
        keys.push(Span::styled(" o ", Theme::keybind()));
        keys.push(Span::styled("open again  ", Theme::dimmed()));
    }
    keys.push(Span::styled(" esc ", Theme::keybind()));
    keys.push(Span::styled("close", Theme::dimmed()));
    lines.push(Line::from(keys));

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Theme::border_focused())
                .title(Span::styled(" ▶ NOW PLAYING ", Theme::accent()))
                .style(Theme::modal()),
        );

    frame.render_widget(modal, popup);
}
