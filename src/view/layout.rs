//! Screen layout rendering.
//!
//! Pure layout logic: [`calculate_areas`] splits the frame, and
//! [`render_layout`] draws every widget into those areas. The event loop
//! keeps the areas from the last draw for mouse hit testing.

use crate::state::{AppState, FocusPane, SearchState, SearchStatus};
use crate::view::constants::{
    HEADER_HEIGHT, LIMIT_INPUT_WIDTH, PAGINATION_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT,
    WARNING_HEIGHT,
};
use crate::view::help::render_help_overlay;
use crate::view::pagination::Pagination;
use crate::view::results::ResultsTable;
use crate::view::search_input::{TextInput, WarningLine};
use crate::view::styles::SearchStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title shown in the header bar.
pub const APP_TITLE: &str = "City Search";

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    /// Title bar.
    pub header: Rect,
    /// Query text box.
    pub query: Rect,
    /// Limit text box, right of the query box.
    pub limit: Rect,
    /// Limit warning line.
    pub warning: Rect,
    /// Results table.
    pub table: Rect,
    /// Pagination buttons.
    pub pagination: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split `area` into the screen regions.
pub fn calculate_areas(area: Rect) -> LayoutAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Length(WARNING_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(LIMIT_INPUT_WIDTH)])
        .split(rows[1]);

    LayoutAreas {
        header: rows[0],
        query: inputs[0],
        limit: inputs[1],
        warning: rows[2],
        table: rows[3],
        pagination: rows[4],
        status: rows[5],
    }
}

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &SearchStyles) {
    let areas = calculate_areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(APP_TITLE, styles.header))),
        areas.header,
    );

    frame.render_widget(
        TextInput::new(state.query_field(), "Search", styles)
            .focused(state.focus == FocusPane::Query),
        areas.query,
    );
    frame.render_widget(
        TextInput::new(state.limit_field(), "Limit (1-10)", styles)
            .focused(state.focus == FocusPane::Limit),
        areas.limit,
    );
    frame.render_widget(
        WarningLine::new(state.search.warning(), styles),
        areas.warning,
    );

    frame.render_widget(
        ResultsTable::new(&state.search, state.flag_style, styles)
            .focused(state.focus == FocusPane::Results),
        areas.table,
    );
    frame.render_widget(Pagination::new(&state.search, styles), areas.pagination);

    render_status_bar(frame, areas.status, state, styles);

    if state.help_visible {
        render_help_overlay(frame, styles);
    }
}

/// Keyboard hints for the focused widget.
pub fn build_keyboard_hints(focus: FocusPane) -> &'static str {
    match focus {
        FocusPane::Query => "Enter: search | Tab: limit | Esc: results",
        FocusPane::Limit => "↑/↓: step | Enter: search | Tab: results",
        FocusPane::Results => "←/→: page | 1-9: go to page | /: query | q: quit | ?: help",
    }
}

/// Short description of the search state for the right of the status bar.
pub fn build_status_summary(search: &SearchState) -> String {
    match search.status() {
        SearchStatus::Idle => String::new(),
        SearchStatus::Loading => "Searching...".to_string(),
        SearchStatus::Error(failure) => failure.to_string(),
        SearchStatus::Loaded => format!(
            "Page {}/{} | {} results",
            search.current_page(),
            search.page_count(),
            search.results().len()
        ),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &SearchStyles) {
    let summary = build_status_summary(&state.search);
    let summary_width = u16::try_from(summary.chars().count()).unwrap_or(u16::MAX);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(summary_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            build_keyboard_hints(state.focus),
            styles.muted,
        ))),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            summary,
            styles.body_for(state.search.status()),
        ))),
        columns[1],
    );
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
