//! Event handling for the application.
//!
//! This module turns terminal input into application events.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// Events processed by the application's update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The terminal window gained focus.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
    /// Periodic tick for timers and animations.
    Tick,
}
