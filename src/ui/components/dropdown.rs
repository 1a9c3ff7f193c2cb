//! Result dropdown shown under the search input.
//!
//! Each row shows the issue title followed by its label chips. The selected
//! row is highlighted; Enter on it opens the issue in the browser.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::label::label_span;
use crate::api::Issue;

/// Build the display line for one issue.
pub fn issue_line(issue: &Issue) -> Line<'_> {
    let mut spans = Vec::with_capacity(issue.labels.len() * 2 + 1);
    spans.push(Span::styled(
        issue.title.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::UNDERLINED),
    ));
    for label in &issue.labels {
        spans.push(Span::raw(" "));
        spans.push(label_span(label));
    }
    Line::from(spans)
}

/// Height needed to show `count` issues inside a bordered box.
pub fn dropdown_height(count: usize, max: u16) -> u16 {
    (count as u16).saturating_add(2).min(max)
}

/// Render the dropdown of issues.
pub fn render_dropdown(frame: &mut Frame, area: Rect, items: &[Issue], selected: Option<usize>) {
    if items.is_empty() || area.height == 0 {
        return;
    }

    frame.render_widget(Clear, area);

    let rows: Vec<ListItem> = items.iter().map(|i| ListItem::new(issue_line(i))).collect();

    let list = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}
