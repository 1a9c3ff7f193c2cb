//! The autocomplete core: debounced queries, tagged loads and selection.
//!
//! None of these types touch the terminal or the network. The application
//! feeds them key events, ticks and search responses.

mod debounce;
mod loader;
mod navigator;
mod visibility;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use loader::{IssueLoader, LoadRequest, LoadState};
pub use navigator::{NavOutcome, SelectionNavigator, SystemOpener, UrlOpener, WidgetId};
pub use visibility::DropdownState;
