//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Lookups ignore event kind and state, so a key reported with extra
/// metadata by the terminal still matches its binding.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `code` + `modifiers` to `action`, replacing any existing binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Search
        bindings.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::SubmitSearch);

        // Focus
        bindings.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::CycleFocus);
        bindings.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::CycleFocusBack);
        bindings.bind(KeyCode::BackTab, KeyModifiers::NONE, KeyAction::CycleFocusBack);
        bindings.bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::FocusQuery);
        bindings.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::FocusLimit);

        // Pagination
        bindings.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::NextPage);
        bindings.bind(KeyCode::Char('n'), KeyModifiers::NONE, KeyAction::NextPage);
        bindings.bind(KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextPage);
        bindings.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::PrevPage);
        bindings.bind(KeyCode::Char('p'), KeyModifiers::NONE, KeyAction::PrevPage);
        bindings.bind(KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevPage);
        bindings.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::FirstPage);
        bindings.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::FirstPage);
        bindings.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastPage);
        bindings.bind(KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::LastPage);
        bindings.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::LastPage);
        for page in 1..=9u8 {
            bindings.bind(
                KeyCode::Char(char::from(b'0' + page)),
                KeyModifiers::NONE,
                KeyAction::SelectPage(usize::from(page)),
            );
        }

        // Application controls
        // Terminals disagree on whether `?` carries SHIFT.
        bindings.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::ToggleHelp);
        bindings.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::ToggleHelp);
        bindings.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);

        bindings
    }
}
