//! LazyIssues - a terminal issue search with debounced autocomplete.
//!
//! Type into the search field and, after a short pause, the matching issues
//! of one GitHub repository drop down below it. Up and Down cycle through
//! them, Enter opens the selected issue in the browser.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod search;
pub mod tasks;
pub mod ui;
