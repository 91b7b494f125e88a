//! Query and limit input widgets.

use crate::model::LimitWarning;
use crate::state::InputField;
use crate::view::styles::SearchStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line text box.
///
/// Shows a block cursor when focused.
pub struct TextInput<'a> {
    field: &'a InputField,
    title: &'a str,
    focused: bool,
    styles: &'a SearchStyles,
}

impl<'a> TextInput<'a> {
    /// Create new TextInput widget.
    pub fn new(field: &'a InputField, title: &'a str, styles: &'a SearchStyles) -> Self {
        Self {
            field,
            title,
            focused: false,
            styles,
        }
    }

    /// Mark the box as having keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line(&self) -> Line<'static> {
        let text = self.field.text();
        if !self.focused {
            return Line::from(text.to_string());
        }

        let cursor = self.field.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let cursor_char = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, self.styles.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.to_string())
            .border_style(self.styles.border_for(self.focused));

        Paragraph::new(self.line()).block(block).render(area, buf);
    }
}

/// One-line limit warning. Renders nothing without a warning.
pub struct WarningLine<'a> {
    warning: Option<LimitWarning>,
    styles: &'a SearchStyles,
}

impl<'a> WarningLine<'a> {
    /// Create new WarningLine widget.
    pub fn new(warning: Option<LimitWarning>, styles: &'a SearchStyles) -> Self {
        Self { warning, styles }
    }
}

impl Widget for WarningLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(warning) = self.warning {
            Paragraph::new(Line::from(Span::styled(
                format!("⚠ {warning}"),
                self.styles.warning,
            )))
            .render(area, buf);
        }
    }
}
