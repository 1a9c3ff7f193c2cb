//! Notification/toast component for user feedback.
//!
//! Transient messages that do not belong to the search state itself, such
//! as a failure to launch the browser.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ",
            Level::Error => "✗",
        }
    }

    fn color(self) -> Color {
        match self {
            Level::Info => Color::Blue,
            Level::Error => Color::Red,
        }
    }

    /// How long a toast of this level stays on screen.
    fn lifetime(self) -> Duration {
        match self {
            Level::Info => Duration::from_secs(3),
            Level::Error => Duration::from_secs(5),
        }
    }
}

/// A message that disappears on its own.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: Level,
    pub expires_at: Instant,
}

impl Notification {
    /// Create a toast posted at `now`, expiring after its level's lifetime.
    pub fn new(message: impl Into<String>, level: Level, now: Instant) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: now + level.lifetime(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Manages the visible notifications.
#[derive(Debug)]
pub struct NotificationManager {
    /// Queue of notifications, oldest first.
    notifications: VecDeque<Notification>,
    /// Maximum number of visible notifications.
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager.
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 3,
        }
    }

    /// Add a notification to the queue.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(Notification::new(message, Level::Info, now));
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(Notification::new(message, Level::Error, now));
    }

    /// Remove expired notifications.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get the number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Get an iterator over the notifications.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render notifications stacked in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 50.min(area.width.saturating_sub(2));
        let mut bottom = area.y + area.height;

        for notification in self.notifications.iter().rev() {
            let height = 3;
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            let x = area.x + area.width.saturating_sub(width + 1);
            render_notification(notification, frame, Rect::new(x, bottom, width, height));
        }
    }
}

/// Render a single notification.
fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.level.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.level.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
