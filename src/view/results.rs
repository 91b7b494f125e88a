//! Results table widget.
//!
//! The body depends on the controller's status: a message while loading,
//! after a failure, or before the first search; otherwise the visible page
//! of rows, numbered from the first row on the page.

use crate::model::{City, FlagStyle};
use crate::state::{SearchState, SearchStatus};
use crate::view::styles::SearchStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Column headers, in display order.
pub const COLUMN_HEADERS: [&str; 3] = ["#", "Place Name", "Country"];

/// Shown before the first search completes.
pub const IDLE_MESSAGE: &str = "Start searching";

/// Shown while a search is outstanding.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Results table for one [`SearchState`].
pub struct ResultsTable<'a> {
    search: &'a SearchState,
    flag_style: FlagStyle,
    focused: bool,
    styles: &'a SearchStyles,
}

impl<'a> ResultsTable<'a> {
    /// Create new ResultsTable widget.
    pub fn new(search: &'a SearchState, flag_style: FlagStyle, styles: &'a SearchStyles) -> Self {
        Self {
            search,
            flag_style,
            focused: false,
            styles,
        }
    }

    /// Mark the table as having keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'static> {
        let title = match self.search.status() {
            SearchStatus::Loaded => format!(
                " Results ({}) ",
                self.search.results().len()
            ),
            _ => " Results ".to_string(),
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.styles.border_for(self.focused))
    }
}

/// Message shown in place of rows, or `None` when rows should be drawn.
pub fn body_message(status: SearchStatus) -> Option<String> {
    match status {
        SearchStatus::Idle => Some(IDLE_MESSAGE.to_string()),
        SearchStatus::Loading => Some(LOADING_MESSAGE.to_string()),
        SearchStatus::Error(failure) => Some(failure.to_string()),
        SearchStatus::Loaded => None,
    }
}

/// Cells for one row: number, name, country with flag.
pub fn row_cells(number: usize, city: &City, flag_style: FlagStyle) -> [String; 3] {
    [
        number.to_string(),
        city.name.clone(),
        format!("{} {}", city.country, flag_style.render(city)),
    ]
}

/// Column widths fitting `rows` and the headers.
///
/// The last column takes whatever space remains.
fn column_widths(rows: &[[String; 3]]) -> [Constraint; 3] {
    let widest = |column: usize| {
        rows.iter()
            .map(|cells| cells[column].width())
            .chain(std::iter::once(COLUMN_HEADERS[column].width()))
            .max()
            .unwrap_or(0)
    };
    let to_u16 = |width: usize| u16::try_from(width).unwrap_or(u16::MAX);

    [
        Constraint::Length(to_u16(widest(0))),
        Constraint::Length(to_u16(widest(1))),
        Constraint::Min(to_u16(widest(2))),
    ]
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();

        if let Some(message) = body_message(self.search.status()) {
            let inner = block.inner(area);
            block.render(area, buf);
            // Vertically center in the body.
            let offset = inner.height.saturating_sub(1) / 2;
            let line_area = Rect {
                y: inner.y.saturating_add(offset),
                height: inner.height.min(1),
                ..inner
            };
            Paragraph::new(Line::from(message))
                .style(self.styles.body_for(self.search.status()))
                .alignment(Alignment::Center)
                .render(line_area, buf);
            return;
        }

        let first = self.search.first_row_number();
        let rows: Vec<[String; 3]> = self
            .search
            .visible_rows()
            .iter()
            .enumerate()
            .map(|(offset, city)| row_cells(first + offset, city, self.flag_style))
            .collect();
        let widths = column_widths(&rows);

        let table = Table::new(rows.into_iter().map(Row::new), widths)
            .header(Row::new(COLUMN_HEADERS).style(self.styles.table_header))
            .column_spacing(2)
            .block(block);

        Widget::render(table, area, buf);
    }
}
