//! Dropdown visibility tied to input focus.

/// Whether the dropdown, loading indicator and error banner may be shown.
///
/// Visible while the search input has focus, hidden otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    visible: bool,
}

impl DropdownState {
    /// Create a hidden dropdown state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The input gained focus.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// The input lost focus.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the dropdown may be shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
