//! Application state management.

use quarry_client::{
    ClientError, Outcome, OutputContainer, Row, SearchSession, SearchTransport, Ticket,
};
use quarry_core::protocol::{SearchResponse, StatusReport};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main search mode
    Search,
    /// Help overlay
    Help,
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Search state
    pub search: SearchState,
    /// Base URL of the server, used to build result links
    pub server_url: String,
    /// Last status answer, `None` while the server is unreachable
    pub server_status: Option<StatusReport>,
    /// Whether to quit
    pub should_quit: bool,
    /// Last error message
    pub error: Option<String>,
    /// Link to print on exit
    pub print_on_exit: Option<String>,
}

impl AppState {
    pub fn new(server_url: &str) -> Self {
        Self {
            mode: AppMode::Search,
            search: SearchState::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            server_status: None,
            should_quit: false,
            error: None,
            print_on_exit: None,
        }
    }

    /// Mark `ticket` as the search the UI is waiting for.
    pub fn begin_search(&mut self, ticket: Ticket) {
        self.search.in_flight = Some(ticket);
        self.error = None;
    }

    /// Hand a worker answer to the session and update the UI accordingly.
    ///
    /// Stale answers are ignored. A failure keeps the current rows and shows
    /// a short message in the footer.
    pub fn apply_results<T: SearchTransport>(
        &mut self,
        session: &SearchSession<T>,
        ticket: Ticket,
        result: Result<SearchResponse, ClientError>,
    ) -> Outcome {
        let outcome = session.deliver(ticket, result, &mut self.search);
        match &outcome {
            Outcome::Rendered { .. } => {
                self.search.finish(ticket);
            }
            Outcome::Failed { error, .. } => {
                if session.is_current(ticket) {
                    self.search.finish(ticket);
                    self.error = Some(error.to_string());
                }
            }
            Outcome::Stale { .. } => {}
        }
        outcome
    }

    /// Full URL of the selected ranked row.
    pub fn selected_link(&self) -> Option<String> {
        match self.search.selected_row()? {
            Row::Ranked(row) => Some(format!("{}{}", self.server_url, row.href)),
            Row::Pair(_) => None,
        }
    }

    /// Check if should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Search,
            AppMode::Search => AppMode::Help,
        };
    }
}

/// Focus target in search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Input,
    Results,
}

/// Search state
pub struct SearchState {
    /// Current query
    pub query: String,
    /// Rendered rows of the latest answered search
    pub rows: Vec<Row>,
    /// Selected row index
    pub selected_index: usize,
    /// Cursor position in query input, in chars
    pub cursor_position: usize,
    /// Current focus target
    pub focus: FocusTarget,
    /// Ticket of the search the UI is waiting for
    pub in_flight: Option<Ticket>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            rows: Vec::new(),
            selected_index: 0,
            cursor_position: 0,
            focus: FocusTarget::Input,
            in_flight: None,
        }
    }

    /// Whether a submitted search has not answered yet.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    fn finish(&mut self, ticket: Ticket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    /// Toggle focus between input and results
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Input => FocusTarget::Results,
            FocusTarget::Results => FocusTarget::Input,
        };
    }

    pub fn is_input_focused(&self) -> bool {
        self.focus == FocusTarget::Input
    }

    pub fn is_results_focused(&self) -> bool {
        self.focus == FocusTarget::Results
    }

    /// Clear the query, keeping the rows on screen.
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.cursor_position = 0;
    }

    /// Add character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.query.insert(at, c);
        self.cursor_position += 1;
    }

    /// Remove character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let at = self.byte_offset(self.cursor_position);
        self.query.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.query.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.query
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.rows.len().saturating_sub(1);
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputContainer for SearchState {
    fn replace(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.selected_index = 0;
        if self.rows.is_empty() {
            self.focus = FocusTarget::Input;
        }
    }
}
