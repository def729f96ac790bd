//! Dark cinema theme for FlickTUI
//!
//! Neutral near-black surfaces with translucent-white text tiers and
//! TMDB blue/green accents.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and style helpers
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0a0a0a (neutral-950)
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0a);

    /// Panels and cards: #171717 (neutral-900)
    pub const SURFACE: Color = Color::Rgb(0x17, 0x17, 0x17);

    /// Hovered / selected card: #262626
    pub const SURFACE_RAISED: Color = Color::Rgb(0x26, 0x26, 0x26);

    /// Primary accent: #01b4e4 (TMDB light blue)
    pub const PRIMARY: Color = Color::Rgb(0x01, 0xb4, 0xe4);

    /// Secondary accent: #90cea1 (TMDB green)
    pub const SECONDARY: Color = Color::Rgb(0x90, 0xce, 0xa1);

    /// Rating star: #f5c518
    pub const RATING: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Text: #ffffff
    pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Muted text, white at 70%: #b3b3b3
    pub const MUTED: Color = Color::Rgb(0xb3, 0xb3, 0xb3);

    /// Dim text, white at 50%: #808080
    pub const DIM: Color = Color::Rgb(0x80, 0x80, 0x80);

    /// Error: #f87171
    pub const ERROR: Color = Color::Rgb(0xf8, 0x71, 0x71);

    /// Success: #4ade80
    pub const SUCCESS: Color = Color::Rgb(0x4a, 0xde, 0x80);

    /// Border, white at 10%: #2b2b2b
    pub const BORDER: Color = Color::Rgb(0x2b, 0x2b, 0x2b);

    /// Border when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Subtitle under a shelf or panel title ("Based on ...")
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::DIM)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected card or row
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::SURFACE_RAISED)
            .add_modifier(Modifier::BOLD)
    }

    /// Active suggestion / season chip
    pub fn active() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge ("MOVIE", "TV", "5 seasons")
    pub fn badge() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::SURFACE_RAISED)
    }

    pub fn rating() -> Style {
        Style::default().fg(Self::RATING)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::SURFACE)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Player modal backdrop
    pub fn modal() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Player URL
    pub fn link() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance (https://www.w3.org/TR/WCAG20/#relativeluminancedef)
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// RGB tuple of a `Color::Rgb`
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

/// Rating text style: gold for good scores, dimmer below
pub fn rating_style(vote_average: f32) -> Style {
    if vote_average >= 7.0 {
        Theme::rating()
    } else if vote_average >= 5.0 {
        Theme::muted()
    } else {
        Theme::dimmed()
    }
}
