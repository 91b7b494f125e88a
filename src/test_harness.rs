//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend, FakeLookup> with convenient methods for simulating
//! user interactions.

use crate::client::fake::FakeLookup;
use crate::config::keybindings::KeyBindings;
use crate::source::FetchSource;
use crate::state::AppState;
use crate::view::{calculate_areas, page_buttons, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::time::Duration;

/// How long the harness waits for outstanding fetches.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend, FakeLookup> to provide a clean API for
/// simulating user interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend, FakeLookup>,
    width: u16,
    height: u16,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Default 80x24 terminal backed by `lookup`.
    pub fn new(lookup: FakeLookup) -> Result<Self, TuiError> {
        Self::with_size(lookup, 80, 24)
    }

    /// Custom terminal size, default app state.
    pub fn with_size(lookup: FakeLookup, width: u16, height: u16) -> Result<Self, TuiError> {
        Self::with_state(lookup, AppState::default(), width, height)
    }

    /// Custom app state (e.g. a pre-filled query or limit).
    pub fn with_state(
        lookup: FakeLookup,
        app_state: AppState,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let source = FetchSource::new(lookup)?;
        let app = TuiApp::new_for_test(terminal, app_state, source, KeyBindings::default());

        Ok(Self {
            app,
            width,
            height,
            running: true,
        })
    }

    /// Dispatch the initial search and wait for it to land.
    pub fn start(&mut self) {
        self.app.start_test();
        self.settle();
    }

    /// Wait for every outstanding fetch and apply the outcomes.
    ///
    /// Returns how many outcomes were applied (stale ones don't count).
    pub fn settle(&mut self) -> usize {
        self.app.settle(SETTLE_TIMEOUT)
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text one character at a time into the focused field.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");

        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Send a left click at the given cell.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return;
        }

        // Render first so the app has areas to hit-test against
        let _ = self.app.render_test();

        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Click the `[page]` button. Does nothing if no such button is drawn.
    pub fn click_page(&mut self, page: usize) {
        let areas = calculate_areas(Rect::new(0, 0, self.width, self.height));
        let count = self.state().search.page_count();
        let target = page_buttons(areas.pagination, count)
            .into_iter()
            .find(|button| button.page == page);

        if let Some(button) = target {
            self.click_at(button.area.x, button.area.y);
        }
    }
}
