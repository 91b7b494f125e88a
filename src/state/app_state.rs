//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. It composes the
//! search controller with what only the terminal UI needs: focus, the two
//! text field buffers and the help overlay flag.
//!
//! # State Transitions
//!
//! - Focus: Query → Limit → Results → Query (via `cycle_focus`)
//! - Search: see `SearchState`; requests are returned to the caller, which
//!   hands them to the fetch source.
//! - Limit field edits go through the controller's validation. A rejected
//!   value leaves the field showing the current limit.

use crate::model::FlagStyle;
use crate::state::input_handler::InputField;
use crate::state::search::{SearchRequest, SearchState};

// ===== AppState =====

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search controller. Owns query, limit, results, status and page.
    pub search: SearchState,

    /// Which widget currently has keyboard focus.
    pub focus: FocusPane,

    /// Query text box. Its text is mirrored into `search` on every edit.
    query_field: InputField,

    /// Limit text box.
    limit_field: InputField,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    /// How country flags are rendered in the table.
    pub flag_style: FlagStyle,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchState::default(), FlagStyle::default())
    }
}

impl AppState {
    /// Create new AppState around a controller.
    ///
    /// Focus starts on the query field.
    pub fn new(search: SearchState, flag_style: FlagStyle) -> Self {
        let query_field = InputField::new(search.query());
        let limit_field = InputField::new(search.limit().to_string());
        Self {
            search,
            focus: FocusPane::Query,
            query_field,
            limit_field,
            help_visible: false,
            flag_style,
        }
    }

    /// Pre-fill the query box (and the controller's query).
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query_field = InputField::new(query);
        self.search.set_query(self.query_field.text());
        self
    }

    /// Query text box.
    pub fn query_field(&self) -> &InputField {
        &self.query_field
    }

    /// Limit text box.
    pub fn limit_field(&self) -> &InputField {
        &self.limit_field
    }

    // ----- focus -----

    /// Cycle focus forward: Query → Limit → Results → Query.
    pub fn cycle_focus(&mut self) {
        let next = match self.focus {
            FocusPane::Query => FocusPane::Limit,
            FocusPane::Limit => FocusPane::Results,
            FocusPane::Results => FocusPane::Query,
        };
        self.set_focus(next);
    }

    /// Cycle focus backward.
    pub fn cycle_focus_back(&mut self) {
        let prev = match self.focus {
            FocusPane::Query => FocusPane::Results,
            FocusPane::Limit => FocusPane::Query,
            FocusPane::Results => FocusPane::Limit,
        };
        self.set_focus(prev);
    }

    /// Move focus to `pane`.
    ///
    /// Leaving the limit field with unusable text restores it to the current
    /// limit.
    pub fn set_focus(&mut self, pane: FocusPane) {
        if self.focus == FocusPane::Limit && pane != FocusPane::Limit {
            self.sync_limit_field();
        }
        self.focus = pane;
    }

    // ----- editing -----

    /// Apply an edit to the query box and mirror it into the controller.
    pub fn edit_query(&mut self, edit: impl FnOnce(InputField) -> InputField) {
        self.query_field = edit(std::mem::take(&mut self.query_field));
        self.search.set_query(self.query_field.text());
    }

    /// Apply an edit to the limit box.
    ///
    /// Cursor-only edits and clearing the box are always allowed. Any other
    /// change is validated by the controller; if it is rejected the box shows
    /// the unchanged limit again.
    pub fn edit_limit(&mut self, edit: impl FnOnce(InputField) -> InputField) {
        let candidate = edit(self.limit_field.clone());

        if candidate.text() == self.limit_field.text() || candidate.is_empty() {
            self.limit_field = candidate;
            return;
        }

        if self.search.apply_limit_text(candidate.text()) {
            self.limit_field = candidate;
        } else {
            self.sync_limit_field();
        }
    }

    /// Step the limit by `delta` (Up/Down on the limit box).
    pub fn step_limit(&mut self, delta: i64) {
        let target = i64::from(self.search.limit()).saturating_add(delta);
        self.search.update_limit(target);
        self.sync_limit_field();
    }

    /// Reset the limit box text to the controller's limit.
    fn sync_limit_field(&mut self) {
        let current = self.search.limit().to_string();
        if self.limit_field.text() != current {
            self.limit_field = InputField::new(current);
        }
    }

    // ----- search -----

    /// Search with the current query.
    ///
    /// Returns the request to dispatch, if the controller issued one.
    pub fn submit_search(&mut self) -> Option<SearchRequest> {
        self.sync_limit_field();
        self.search.submit()
    }

    /// Request to run when the app starts.
    ///
    /// An empty query runs the one-time initial search. A pre-filled query
    /// is searched directly instead.
    pub fn initial_request(&mut self) -> Option<SearchRequest> {
        if self.search.query().is_empty() {
            self.search.initialize()
        } else {
            self.submit_search()
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

// ===== FocusPane =====

/// Widget that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    /// Free-text query box. Character keys edit the query.
    Query,

    /// Numeric limit box. Digits edit the limit; Up/Down step it.
    Limit,

    /// Results table. Key bindings drive pagination.
    Results,
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
