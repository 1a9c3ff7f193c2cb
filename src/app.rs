//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! into [`App::update`], state changes happen there, and [`App::view`]
//! renders the current state. Network work is never awaited here; a settled
//! query leaves a [`LoadRequest`] for the main loop to spawn, and the result
//! comes back through [`App::handle_api_message`].

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::events::Event;
use crate::search::{
    Debouncer, DropdownState, IssueLoader, LoadRequest, NavOutcome, SelectionNavigator,
    SystemOpener, UrlOpener, WidgetId,
};
use crate::tasks::ApiMessage;
use crate::ui::{
    dropdown_height, render_dropdown, LoadingIndicator, NotificationManager, TextInput, Theme,
};

/// The search input widget.
pub const SEARCH_INPUT: WidgetId = WidgetId(1);
/// The results summary pane.
pub const RESULTS_PANE: WidgetId = WidgetId(2);

/// Which widget receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search input.
    #[default]
    SearchInput,
    /// The results summary pane.
    Results,
}

impl Focus {
    /// The widget this focus corresponds to.
    pub fn widget(self) -> WidgetId {
        match self {
            Focus::SearchInput => SEARCH_INPUT,
            Focus::Results => RESULTS_PANE,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Focus::SearchInput => Focus::Results,
            Focus::Results => Focus::SearchInput,
        }
    }
}

/// The main application struct that holds all state.
pub struct App {
    /// Whether the application should quit.
    should_quit: bool,
    /// Repository being searched, for display.
    repo: String,
    /// The search field.
    input: TextInput,
    /// Focused widget.
    focus: Focus,
    /// Whether the terminal window itself has focus.
    terminal_focused: bool,
    /// Dropdown visibility, following input focus.
    dropdown: DropdownState,
    /// Debounces edits into settled queries.
    debouncer: Debouncer<String>,
    /// The current settled query.
    query: Option<String>,
    /// Search results state.
    loader: IssueLoader,
    /// Selection within the results.
    navigator: SelectionNavigator,
    /// A search waiting to be spawned by the main loop.
    pending_search: Option<LoadRequest>,
    /// Spinner shown while loading.
    spinner: LoadingIndicator,
    /// Toast messages.
    notifications: NotificationManager,
    /// Opens issue URLs.
    opener: Box<dyn UrlOpener>,
    /// Colors.
    theme: Theme,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: &Config) -> Self {
        Self::with_opener(config, Box::new(SystemOpener))
    }

    /// Create a new application instance with a custom URL opener.
    pub fn with_opener(config: &Config, opener: Box<dyn UrlOpener>) -> Self {
        debug!(repo = %config.repo, debounce_ms = config.debounce_ms, "Creating application");

        let mut input = TextInput::new();
        input.set_placeholder("Search issues");

        let mut app = Self {
            should_quit: false,
            repo: config.repo.clone(),
            input,
            focus: Focus::SearchInput,
            terminal_focused: true,
            dropdown: DropdownState::new(),
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            query: None,
            loader: IssueLoader::new(),
            navigator: SelectionNavigator::new(SEARCH_INPUT, &[]),
            pending_search: None,
            spinner: LoadingIndicator::new(),
            notifications: NotificationManager::new(),
            opener,
            theme: Theme::default(),
        };
        app.sync_visibility();
        app
    }

    /// Prefill the input and search for it immediately.
    pub fn set_initial_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.input.set_value(text.clone());
        self.debouncer.cancel();
        self.set_query(text);
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current settled query.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The search field.
    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// The focused widget.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Search results state.
    pub fn loader(&self) -> &IssueLoader {
        &self.loader
    }

    /// Selection state.
    pub fn navigator(&self) -> &SelectionNavigator {
        &self.navigator
    }

    /// Check if the dropdown may be shown.
    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown.is_visible()
    }

    /// Toast messages.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Take the search the main loop should spawn, if any.
    pub fn take_pending_search(&mut self) -> Option<LoadRequest> {
        self.pending_search.take()
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        self.update_at(event, Instant::now());
    }

    /// Update the application state based on an event that happened at `now`.
    pub fn update_at(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event, now);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::FocusGained => {
                self.terminal_focused = true;
                self.sync_visibility();
            }
            Event::FocusLost => {
                self.terminal_focused = false;
                self.sync_visibility();
            }
            Event::Tick => self.handle_tick(now),
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                info!("Quit requested");
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                self.set_focus(self.focus.toggle());
                return;
            }
            (KeyCode::Esc, _) => {
                match self.focus {
                    Focus::SearchInput => self.set_focus(Focus::Results),
                    Focus::Results => self.should_quit = true,
                }
                return;
            }
            (KeyCode::Char('q'), KeyModifiers::NONE) if self.focus == Focus::Results => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) if self.focus == Focus::Results => {
                self.set_focus(Focus::SearchInput);
                return;
            }
            _ => {}
        }

        let outcome = self.navigator.handle_key(
            self.focus.widget(),
            key,
            self.loader.items(),
            self.opener.as_ref(),
        );

        match outcome {
            NavOutcome::Ignored => {}
            NavOutcome::Moved(index) => {
                trace!(index, "Selection moved");
                return;
            }
            NavOutcome::Opened(url) => {
                info!(url = %url, "Opened issue in browser");
                self.notifications.info(format!("Opened {}", url), now);
                return;
            }
            NavOutcome::OpenFailed { url, error } => {
                self.notifications
                    .error(format!("Could not open {}: {}", url, error), now);
                return;
            }
        }

        if self.focus == Focus::SearchInput && self.input.handle_input(key) {
            self.on_input(now);
        }
    }

    /// The input text changed.
    fn on_input(&mut self, now: Instant) {
        self.debouncer.push(self.input.value().to_string(), now);
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self, now: Instant) {
        self.spinner.tick();
        self.notifications.tick(now);

        if let Some(text) = self.debouncer.poll(now) {
            self.set_query(text);
        }
    }

    /// Replace the settled query, starting a search if it changed.
    fn set_query(&mut self, text: String) {
        if self.query.as_deref() == Some(text.as_str()) {
            debug!("Settled query unchanged, not searching");
            return;
        }

        self.query = Some(text);
        if let Some(request) = self.loader.load(self.query.as_deref()) {
            self.spinner.start();
            self.pending_search = Some(request);
        }
    }

    /// Handle the result of a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::IssuesFetched { seq, query, result } => {
                let succeeded = result.is_ok();
                if !self.loader.complete(seq, result) {
                    debug!(seq, query = %query, "Ignoring superseded search result");
                    return;
                }

                self.spinner.stop();
                if succeeded {
                    self.navigator.reset(self.loader.items());
                }
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        debug!(?focus, "Focus changed");
        self.focus = focus;
        self.sync_visibility();
    }

    /// Show the dropdown exactly while the input has focus.
    fn sync_visibility(&mut self) {
        if self.focus == Focus::SearchInput && self.terminal_focused {
            self.dropdown.show();
        } else {
            self.dropdown.hide();
        }
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Dropdown / summary
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.input.render(
            frame,
            chunks[1],
            "Search issues",
            self.dropdown.is_visible(),
        );
        self.render_body(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);

        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" lazyissues ", self.theme.title()),
            Span::styled(self.repo.as_str(), self.theme.hint()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        if !self.dropdown.is_visible() {
            frame.render_widget(Paragraph::new(self.summary_line()), area);
            return;
        }

        let error = self.loader.error();
        let loading = self.loader.is_loading();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(error.is_some())),
                Constraint::Length(u16::from(loading)),
                Constraint::Min(0),
            ])
            .split(area);

        if let Some(message) = error {
            let banner = Line::from(vec![
                Span::styled("Error: ", self.theme.error()),
                Span::styled(message, self.theme.error()),
            ]);
            frame.render_widget(Paragraph::new(banner), chunks[0]);
        }

        if loading {
            self.spinner.render(frame, chunks[1], self.theme.title());
        }

        let items = self.loader.items();
        if !items.is_empty() && !loading && error.is_none() {
            let mut list_area = chunks[2];
            list_area.height = dropdown_height(items.len(), list_area.height);
            render_dropdown(frame, list_area, items, self.navigator.selected());
        }
    }

    /// One-line description of the current results.
    fn summary_line(&self) -> Line<'_> {
        match (self.query.as_deref(), self.loader.issues()) {
            (Some(query), Some(result)) => Line::from(Span::styled(
                format!(
                    " {} of {} issues matching \"{}\"",
                    result.items.len(),
                    result.total_count,
                    query
                ),
                self.theme.hint(),
            )),
            _ => Line::from(Span::styled(" No search yet", self.theme.hint())),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = self.theme.key();
        let help = match self.focus {
            Focus::SearchInput => Line::from(vec![
                Span::styled(" ↑/↓", key),
                Span::raw(": select  "),
                Span::styled("Enter", key),
                Span::raw(": open  "),
                Span::styled("Tab/Esc", key),
                Span::raw(": leave input  "),
                Span::styled("Ctrl+C", key),
                Span::raw(": quit"),
            ]),
            Focus::Results => Line::from(vec![
                Span::styled(" /", key),
                Span::raw(" or "),
                Span::styled("Tab", key),
                Span::raw(": search  "),
                Span::styled("q", key),
                Span::raw(": quit"),
            ]),
        };
        frame.render_widget(Paragraph::new(help), area);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::api::{Issue, Label, SearchResult};

    #[derive(Clone, Default)]
    struct RecordingOpener {
        opened: Rc<RefCell<Vec<String>>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &str) -> std::io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn create_app() -> (App, RecordingOpener) {
        let opener = RecordingOpener::default();
        let app = App::with_opener(&Config::default(), Box::new(opener.clone()));
        (app, opener)
    }

    fn result(ids: &[u64]) -> SearchResult {
        SearchResult {
            total_count: 42,
            items: ids
                .iter()
                .map(|&id| Issue {
                    id,
                    title: format!("Issue {}", id),
                    url: format!("https://github.com/facebook/react/issues/{}", id),
                    labels: vec![Label {
                        id: 1,
                        name: "Type: Bug".to_string(),
                        color: "b60205".to_string(),
                    }],
                })
                .collect(),
        }
    }

    fn type_at(app: &mut App, text: &str, start: Instant, gap: Duration) -> Instant {
        let mut at = start;
        for c in text.chars() {
            app.update_at(key(KeyCode::Char(c)), at);
            app.update_at(Event::Tick, at);
            at += gap;
        }
        at - gap
    }

    /// Search for `text` and deliver `result` for it.
    fn search_with(app: &mut App, text: &str, result: Result<SearchResult, String>) {
        app.set_initial_query(text);
        let request = app.take_pending_search().unwrap();
        app.handle_api_message(ApiMessage::IssuesFetched {
            seq: request.seq,
            query: request.query,
            result,
        });
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.view(f)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_app_new() {
        let (app, _) = create_app();
        assert!(!app.should_quit());
        assert_eq!(app.focus(), Focus::SearchInput);
        assert!(app.is_dropdown_visible());
        assert_eq!(app.query(), None);
        assert!(!app.loader().is_loading());
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let (mut app, _) = create_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_q_types_into_input_when_focused() {
        let (mut app, _) = create_app();
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.input().value(), "q");
    }

    #[test]
    fn test_q_quits_from_results_pane() {
        let (mut app, _) = create_app();
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_burst_of_keystrokes_searches_once() {
        let (mut app, _) = create_app();
        let start = Instant::now();

        let last = type_at(&mut app, "hooks", start, Duration::from_millis(50));
        assert_eq!(app.query(), None);
        assert!(app.take_pending_search().is_none());

        app.update_at(Event::Tick, last + Duration::from_millis(299));
        assert!(app.take_pending_search().is_none());

        app.update_at(Event::Tick, last + Duration::from_millis(300));
        assert_eq!(app.query(), Some("hooks"));
        let request = app.take_pending_search().unwrap();
        assert_eq!(request.query, "hooks");
        assert!(app.loader().is_loading());

        app.update_at(Event::Tick, last + Duration::from_millis(900));
        assert!(app.take_pending_search().is_none());
    }

    #[test]
    fn test_same_settled_query_does_not_search_again() {
        let (mut app, _) = create_app();
        let start = Instant::now();

        let last = type_at(&mut app, "ab", start, Duration::from_millis(10));
        app.update_at(Event::Tick, last + Duration::from_millis(300));
        assert!(app.take_pending_search().is_some());

        // Type and delete a character: the settled text is unchanged
        let t = last + Duration::from_millis(400);
        app.update_at(key(KeyCode::Char('c')), t);
        app.update_at(key(KeyCode::Backspace), t + Duration::from_millis(10));
        app.update_at(Event::Tick, t + Duration::from_millis(400));
        assert!(app.take_pending_search().is_none());
    }

    #[test]
    fn test_results_seed_selection() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2, 3])));

        assert!(!app.loader().is_loading());
        assert_eq!(app.navigator().selected(), Some(0));
    }

    #[test]
    fn test_arrows_cycle_and_do_not_edit_input() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2, 3])));

        app.update(key(KeyCode::Up));
        assert_eq!(app.navigator().selected(), Some(2));
        app.update(key(KeyCode::Down));
        assert_eq!(app.navigator().selected(), Some(0));
        assert_eq!(app.input().value(), "bug");
    }

    #[test]
    fn test_enter_opens_selected_issue() {
        let (mut app, opener) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2, 3])));

        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        assert_eq!(
            *opener.opened.borrow(),
            vec!["https://github.com/facebook/react/issues/2".to_string()]
        );
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_keys_in_results_pane_do_not_navigate() {
        let (mut app, opener) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2, 3])));

        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        assert_eq!(app.navigator().selected(), Some(0));
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn test_enter_without_results_does_nothing() {
        let (mut app, opener) = create_app();
        app.update(key(KeyCode::Enter));
        assert!(opener.opened.borrow().is_empty());
        assert!(app.notifications().is_empty());
    }

    #[test]
    fn test_focus_changes_visibility() {
        let (mut app, _) = create_app();

        app.update(key(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Results);
        assert!(!app.is_dropdown_visible());

        app.update(key(KeyCode::Char('/')));
        assert_eq!(app.focus(), Focus::SearchInput);
        assert!(app.is_dropdown_visible());

        app.update(Event::FocusLost);
        assert!(!app.is_dropdown_visible());
        app.update(Event::FocusGained);
        assert!(app.is_dropdown_visible());
    }

    #[test]
    fn test_esc_from_results_quits() {
        let (mut app, _) = create_app();
        app.update(key(KeyCode::Esc));
        app.update(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let (mut app, _) = create_app();
        app.set_initial_query("rea");
        let slow = app.take_pending_search().unwrap();
        app.set_initial_query("react");
        let fast = app.take_pending_search().unwrap();

        app.handle_api_message(ApiMessage::IssuesFetched {
            seq: fast.seq,
            query: fast.query,
            result: Ok(result(&[1, 2])),
        });
        app.update(key(KeyCode::Down));
        app.handle_api_message(ApiMessage::IssuesFetched {
            seq: slow.seq,
            query: slow.query,
            result: Ok(result(&[9])),
        });

        assert_eq!(app.loader().items().len(), 2);
        assert_eq!(app.navigator().selected(), Some(1));
    }

    #[test]
    fn test_error_keeps_selection() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2, 3])));
        app.update(key(KeyCode::Down));

        app.set_initial_query("bugs");
        let request = app.take_pending_search().unwrap();
        app.handle_api_message(ApiMessage::IssuesFetched {
            seq: request.seq,
            query: request.query,
            result: Err("Boom".to_string()),
        });

        assert_eq!(app.loader().error(), Some("Boom"));
        assert_eq!(app.navigator().selected(), Some(1));
    }

    #[test]
    fn test_view_renders_dropdown() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2])));

        let screen = render(&app);
        assert!(screen.contains("Issue 1"));
        assert!(screen.contains("Issue 2"));
        assert!(screen.contains("Type: Bug"));
        assert!(screen.contains("facebook/react"));
    }

    #[test]
    fn test_view_renders_error_banner() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Err("Boom".to_string()));

        let screen = render(&app);
        assert!(screen.contains("Error: Boom"));
    }

    #[test]
    fn test_view_renders_loading() {
        let (mut app, _) = create_app();
        app.set_initial_query("bug");

        let screen = render(&app);
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_view_hides_dropdown_without_focus() {
        let (mut app, _) = create_app();
        search_with(&mut app, "bug", Ok(result(&[1, 2])));
        app.update(key(KeyCode::Tab));

        let screen = render(&app);
        assert!(!screen.contains("Issue 1"));
        assert!(screen.contains("2 of 42 issues matching \"bug\""));
    }
}
