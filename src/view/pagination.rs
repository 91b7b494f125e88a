//! Pagination button row.
//!
//! Buttons are laid out by [`page_buttons`], which both rendering and mouse
//! hit testing use, so a click always lands on the button that was drawn.

use crate::state::{SearchState, SearchStatus};
use crate::view::constants::{PAGE_BUTTON_GAP, PAGINATION_LABEL};
use crate::view::styles::SearchStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

/// Screen area of one page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// 1-based page number.
    pub page: usize,
    /// Where the button is drawn.
    pub area: Rect,
}

/// Whether the button row is shown at all.
pub fn pagination_visible(search: &SearchState) -> bool {
    search.status() == SearchStatus::Loaded && !search.results().is_empty()
}

fn label(page: usize) -> String {
    format!("[{page}]")
}

/// Lay out buttons for `page_count` pages in `area`.
///
/// Buttons that do not fit entirely are omitted.
pub fn page_buttons(area: Rect, page_count: usize) -> Vec<PageButton> {
    let label_width = u16::try_from(PAGINATION_LABEL.len()).unwrap_or(u16::MAX);
    let mut x = area.x.saturating_add(label_width);
    let right = area.right();
    let mut buttons = Vec::with_capacity(page_count);

    for page in 1..=page_count {
        let width = u16::try_from(label(page).len()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > right {
            break;
        }
        buttons.push(PageButton {
            page,
            area: Rect::new(x, area.y, width, area.height.min(1)),
        });
        x = x.saturating_add(width).saturating_add(PAGE_BUTTON_GAP);
    }

    buttons
}

/// Page under `(column, row)`, if any.
pub fn page_at(buttons: &[PageButton], column: u16, row: u16) -> Option<usize> {
    buttons
        .iter()
        .find(|button| button.area.contains(Position::new(column, row)))
        .map(|button| button.page)
}

/// Pagination row for one [`SearchState`].
pub struct Pagination<'a> {
    search: &'a SearchState,
    styles: &'a SearchStyles,
}

impl<'a> Pagination<'a> {
    /// Create new Pagination widget.
    pub fn new(search: &'a SearchState, styles: &'a SearchStyles) -> Self {
        Self { search, styles }
    }
}

impl Widget for Pagination<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !pagination_visible(self.search) || area.height == 0 {
            return;
        }

        buf.set_string(area.x, area.y, PAGINATION_LABEL, self.styles.muted);

        let current = self.search.current_page();
        for button in page_buttons(area, self.search.page_count()) {
            let style = if button.page == current {
                self.styles.current_page
            } else {
                self.styles.page_button
            };
            buf.set_string(button.area.x, button.area.y, label(button.page), style);
        }
    }
}
