//! Keyboard navigation over search results.
//!
//! The navigator tracks which issue is selected and reacts to Up, Down and
//! Enter. It only reacts to keys delivered to the input widget that owns it;
//! keys aimed at any other widget leave it untouched.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

use crate::api::Issue;

/// Identifies a focusable widget on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

/// Opens issue URLs outside the terminal.
pub trait UrlOpener {
    /// Open `url` in a new browser tab or window.
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    /// Spawns the launcher without waiting for it to exit.
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that_detached(url)
    }
}

/// What the navigator did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The key was not for the navigator; pass it on.
    Ignored,
    /// The selection moved to this index.
    Moved(usize),
    /// The selected issue's URL was opened.
    Opened(String),
    /// Opening the selected issue's URL failed.
    OpenFailed {
        /// The URL that could not be opened.
        url: String,
        /// Why it failed.
        error: String,
    },
}

impl NavOutcome {
    /// Whether the key was consumed and must not reach the text input.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, NavOutcome::Ignored)
    }
}

/// Selection state machine over a result list.
#[derive(Debug, Clone)]
pub struct SelectionNavigator {
    /// The input widget whose keys drive this navigator.
    owner: WidgetId,
    /// Index of the selected issue.
    selected: Option<usize>,
}

impl SelectionNavigator {
    /// Create a navigator seeded from the current list.
    pub fn new(owner: WidgetId, items: &[Issue]) -> Self {
        let mut navigator = Self {
            owner,
            selected: None,
        };
        navigator.reset(items);
        navigator
    }

    /// The owning widget.
    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    /// Reseed the selection for a new result list.
    ///
    /// Selects the first issue, or nothing if the list is empty.
    pub fn reset(&mut self, items: &[Issue]) {
        self.selected = if items.is_empty() { None } else { Some(0) };
    }

    /// Index of the selected issue.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected issue within `items`.
    pub fn selected_issue<'a>(&self, items: &'a [Issue]) -> Option<&'a Issue> {
        self.selected.and_then(|i| items.get(i))
    }

    /// Handle a key delivered to `target`.
    pub fn handle_key(
        &mut self,
        target: WidgetId,
        key: KeyEvent,
        items: &[Issue],
        opener: &dyn UrlOpener,
    ) -> NavOutcome {
        if target != self.owner {
            return NavOutcome::Ignored;
        }

        // A selection that fell outside the list counts as no selection
        let current = self.selected.filter(|&i| i < items.len());

        match key.code {
            KeyCode::Enter => {
                let Some(issue) = current.and_then(|i| items.get(i)) else {
                    return NavOutcome::Ignored;
                };
                debug!(issue_id = issue.id, url = %issue.url, "Opening issue");
                match opener.open(&issue.url) {
                    Ok(()) => NavOutcome::Opened(issue.url.clone()),
                    Err(e) => {
                        warn!(url = %issue.url, error = %e, "Failed to open issue");
                        NavOutcome::OpenFailed {
                            url: issue.url.clone(),
                            error: e.to_string(),
                        }
                    }
                }
            }
            KeyCode::Down if !items.is_empty() => {
                let next = next_index(current, items.len());
                self.selected = Some(next);
                NavOutcome::Moved(next)
            }
            KeyCode::Up if !items.is_empty() => {
                let previous = previous_index(current, items.len());
                self.selected = Some(previous);
                NavOutcome::Moved(previous)
            }
            _ => NavOutcome::Ignored,
        }
    }
}

/// Index after `current`, wrapping to the first item.
fn next_index(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    }
}

/// Index before `current`, wrapping to the last item.
fn previous_index(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(i) if i > 0 => i - 1,
        _ => len - 1,
    }
}
