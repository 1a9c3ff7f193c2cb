//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent for titles and focused elements.
    pub accent: Color,
    /// Color for secondary text.
    pub muted: Color,
    /// Color for error text.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Style for the header title.
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for hints and secondary text.
    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the error banner.
    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for key names in the help line.
    pub fn key(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }
}
