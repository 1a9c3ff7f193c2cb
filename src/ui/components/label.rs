//! Colored label chips.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::api::Label;

/// Background used when a label carries no usable color.
const FALLBACK_BG: Color = Color::DarkGray;

/// Parse a `rrggbb` color, with or without a leading `#`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Pick black or white text for readability on the given background.
pub fn contrast_fg((r, g, b): (u8, u8, u8)) -> Color {
    // ITU-R BT.601 luma
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 150.0 {
        Color::Black
    } else {
        Color::White
    }
}

/// Style for a label chip.
pub fn label_style(label: &Label) -> Style {
    match parse_hex_color(&label.color) {
        Some(rgb @ (r, g, b)) => Style::default().bg(Color::Rgb(r, g, b)).fg(contrast_fg(rgb)),
        None => Style::default().bg(FALLBACK_BG).fg(Color::White),
    }
}

/// Render a label as a padded, colored span.
pub fn label_span(label: &Label) -> Span<'static> {
    Span::styled(format!(" {} ", label.name), label_style(label))
}
