//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::SearchStyles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut sections: (title, [(keys, description)]).
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("Enter", "Search with the current query"),
            ("/", "Edit query"),
            ("l", "Edit limit"),
            ("↑/↓", "Step limit (in limit field)"),
        ],
    ),
    (
        "Focus",
        &[
            ("Tab", "Next field"),
            ("Shift+Tab", "Previous field"),
            ("Esc", "Leave text field"),
        ],
    ),
    (
        "Pages",
        &[
            ("→ n ]", "Next page"),
            ("← p [", "Previous page"),
            ("1-9", "Go to page"),
            ("g/G", "First/last page"),
            ("Click", "Go to clicked page"),
        ],
    ),
    (
        "Application",
        &[
            ("?", "Toggle this help (from results)"),
            ("q", "Quit (from results)"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Width of the key column.
const KEY_COLUMN_WIDTH: usize = 12;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &SearchStyles) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: popup_area.height.min(1),
    };

    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        styles.muted,
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content(styles: &SearchStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, (title, shortcuts)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, styles.section)));
        for (keys, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<width$}", width = KEY_COLUMN_WIDTH), styles.key),
                Span::raw(*description),
            ]));
        }
    }

    lines
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
