//! Text field editing (pure state transitions).
//!
//! `InputField` backs both the query box and the limit box. All functions
//! take the field by value and return the updated field, so they are
//! testable without a terminal. The cursor counts characters, not bytes.

/// Editable single-line text with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
    cursor: usize,
}

impl InputField {
    /// Field holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut field: InputField, ch: char) -> InputField {
    let at = field.byte_offset(field.cursor);
    field.text.insert(at, ch);
    field.cursor += 1;
    field
}

/// Insert a character only if it is an ASCII digit.
///
/// Used by the numeric limit field.
pub fn handle_digit_input(field: InputField, ch: char) -> InputField {
    if ch.is_ascii_digit() {
        handle_char_input(field, ch)
    } else {
        field
    }
}

/// Delete the character before the cursor.
/// No-op at position 0.
pub fn handle_backspace(mut field: InputField) -> InputField {
    if field.cursor == 0 {
        return field;
    }
    let at = field.byte_offset(field.cursor - 1);
    field.text.remove(at);
    field.cursor -= 1;
    field
}

/// Delete the character under the cursor.
/// No-op at the end of the text.
pub fn handle_delete(mut field: InputField) -> InputField {
    if field.cursor >= field.len() {
        return field;
    }
    let at = field.byte_offset(field.cursor);
    field.text.remove(at);
    field
}

/// Move cursor left by one position.
/// Saturates at 0 (does not wrap).
pub fn handle_cursor_left(mut field: InputField) -> InputField {
    field.cursor = field.cursor.saturating_sub(1);
    field
}

/// Move cursor right by one position.
/// Saturates at text length (does not wrap).
pub fn handle_cursor_right(mut field: InputField) -> InputField {
    field.cursor = (field.cursor + 1).min(field.len());
    field
}

/// Move cursor to the start.
pub fn handle_home(mut field: InputField) -> InputField {
    field.cursor = 0;
    field
}

/// Move cursor to the end.
pub fn handle_end(mut field: InputField) -> InputField {
    field.cursor = field.len();
    field
}

// ===== Tests =====

#[cfg(test)]
#[path = "input_handler_tests.rs"]
mod tests;
