//! User interface components.
//!
//! This module contains the TUI rendering pieces used by the application
//! view: the search input, the result dropdown and status widgets.

pub mod components;
pub mod theme;

pub use components::{
    dropdown_height, issue_line, label_span, render_dropdown, LoadingIndicator,
    NotificationManager, TextInput,
};
pub use theme::Theme;
