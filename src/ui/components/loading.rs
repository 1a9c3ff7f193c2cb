//! Spinner line shown while a search is in flight.

use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Braille spinner frames, advanced once per tick.
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Text next to the spinner.
const LOADING_TEXT: &str = "Loading...";

/// An animated "Loading..." line.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    frame: usize,
    active: bool,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating from the first frame.
    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one frame. Does nothing while stopped.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    /// The line to display, empty while stopped.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", FRAMES[self.frame], LOADING_TEXT)
        } else {
            String::new()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style) {
        if self.active {
            frame.render_widget(Paragraph::new(self.text()).style(style), area);
        }
    }
}
