//! Reusable UI components.

mod dropdown;
mod input;
mod label;
mod loading;
mod notification;

pub use dropdown::{dropdown_height, issue_line, render_dropdown};
pub use input::TextInput;
pub use label::{contrast_fg, label_span, parse_hex_color};
pub use loading::LoadingIndicator;
pub use notification::{Level, Notification, NotificationManager};
