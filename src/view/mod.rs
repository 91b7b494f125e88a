//! TUI rendering and event loop (impure shell).

pub mod constants;
mod help;
mod layout;
mod oneshot;
mod pagination;
mod results;
mod search_input;
mod styles;

pub use help::render_help_overlay;
pub use layout::{calculate_areas, render_layout, LayoutAreas};
pub use oneshot::{format_rows, search_once};
pub use pagination::{page_at, page_buttons, pagination_visible, PageButton, Pagination};
pub use results::{body_message, row_cells, ResultsTable};
pub use search_input::{TextInput, WarningLine};
pub use styles::{ColorConfig, SearchStyles};

use crate::client::CityLookup;
use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, FetchError, FlagStyle, KeyAction};
use crate::source::FetchSource;
use crate::state::input_handler::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, handle_delete,
    handle_digit_input, handle_end, handle_home,
};
use crate::state::{AppState, FocusPane, InputField, SearchState};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Fetch source could not be started
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
            TuiError::Fetch(e) => AppError::Fetch(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// lookup so tests never touch the network.
pub struct TuiApp<B, L>
where
    B: ratatui::backend::Backend,
    L: CityLookup,
{
    terminal: Terminal<B>,
    app_state: AppState,
    source: FetchSource<L>,
    key_bindings: KeyBindings,
    styles: SearchStyles,
    /// Areas of the last draw (for mouse hit testing)
    last_areas: Option<LayoutAreas>,
}

impl<L: CityLookup> TuiApp<CrosstermBackend<Stdout>, L> {
    /// Create and initialize a new TUI application
    ///
    /// Starts the fetch source, then sets up the terminal in raw mode with
    /// alternate screen and mouse capture.
    pub fn new(lookup: L, app_state: AppState, styles: SearchStyles) -> Result<Self, TuiError> {
        let source = FetchSource::new(lookup)?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            source,
            key_bindings: KeyBindings::default(),
            styles,
            last_areas: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws on input, resize, or
    /// when a fetch outcome changes the state; otherwise idles.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Fetch completions are picked up at this rate.
        const TICK_INTERVAL: Duration = Duration::from_millis(100);

        self.start();
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        if self.handle_mouse(mouse) {
                            self.draw()?;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            if self.poll_source() {
                self.draw()?;
            }
        }
    }
}

impl<B, L> TuiApp<B, L>
where
    B: ratatui::backend::Backend,
    L: CityLookup,
{
    /// Dispatch the initial search.
    fn start(&mut self) {
        if let Some(request) = self.app_state.initial_request() {
            self.source.dispatch(request);
        }
    }

    /// Apply finished fetches. Returns true if the screen needs a redraw.
    fn poll_source(&mut self) -> bool {
        let mut changed = false;
        for outcome in self.source.poll() {
            changed |= self.app_state.search.apply_outcome(outcome);
        }
        changed
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Help overlay swallows everything except close and quit
        if self.app_state.help_visible {
            if key.code == KeyCode::Esc {
                self.app_state.help_visible = false;
                return false;
            }
            return match self.key_bindings.get(key) {
                Some(KeyAction::ToggleHelp) => {
                    self.app_state.toggle_help();
                    false
                }
                Some(KeyAction::Quit) => true,
                _ => false,
            };
        }

        if key.code == KeyCode::Esc {
            self.app_state.set_focus(FocusPane::Results);
            return false;
        }

        let consumed = match self.app_state.focus {
            FocusPane::Query => self.handle_query_key(key),
            FocusPane::Limit => self.handle_limit_key(key),
            FocusPane::Results => false,
        };
        if consumed {
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        if self.app_state.focus != FocusPane::Results && !action.applies_in_text_field() {
            return false;
        }

        self.dispatch_action(action)
    }

    /// Text editing in the query box. Returns true if the key was consumed.
    fn handle_query_key(&mut self, key: KeyEvent) -> bool {
        if let Some(ch) = typed_char(key) {
            self.app_state.edit_query(|field| handle_char_input(field, ch));
            return true;
        }
        match cursor_edit(key.code) {
            Some(edit) => {
                self.app_state.edit_query(edit);
                true
            }
            None => false,
        }
    }

    /// Text editing in the limit box. Returns true if the key was consumed.
    ///
    /// Every printable character is consumed; only digits change the text.
    fn handle_limit_key(&mut self, key: KeyEvent) -> bool {
        if let Some(ch) = typed_char(key) {
            self.app_state.edit_limit(|field| handle_digit_input(field, ch));
            return true;
        }
        match key.code {
            KeyCode::Up => {
                self.app_state.step_limit(1);
                true
            }
            KeyCode::Down => {
                self.app_state.step_limit(-1);
                true
            }
            code => match cursor_edit(code) {
                Some(edit) => {
                    self.app_state.edit_limit(edit);
                    true
                }
                None => false,
            },
        }
    }

    /// Perform a bound action. Returns true if app should quit.
    fn dispatch_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::SubmitSearch => {
                if let Some(request) = self.app_state.submit_search() {
                    self.source.dispatch(request);
                }
            }
            KeyAction::CycleFocus => self.app_state.cycle_focus(),
            KeyAction::CycleFocusBack => self.app_state.cycle_focus_back(),
            KeyAction::FocusQuery => self.app_state.set_focus(FocusPane::Query),
            KeyAction::FocusLimit => self.app_state.set_focus(FocusPane::Limit),
            KeyAction::NextPage => {
                self.app_state.search.next_page();
            }
            KeyAction::PrevPage => {
                self.app_state.search.prev_page();
            }
            KeyAction::FirstPage => {
                self.app_state.search.first_page();
            }
            KeyAction::LastPage => {
                self.app_state.search.last_page();
            }
            KeyAction::SelectPage(page) => {
                self.app_state.search.select_page(page);
            }
            KeyAction::ToggleHelp => self.app_state.toggle_help(),
            KeyAction::Quit => return true,
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Left click selects a page button or focuses the clicked widget; the
    /// scroll wheel over the table pages through results. Returns true if
    /// the screen needs a redraw.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(areas) = self.last_areas else {
            return false;
        };
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.app_state.help_visible {
                    self.app_state.help_visible = false;
                    return true;
                }

                if pagination_visible(&self.app_state.search) {
                    let buttons =
                        page_buttons(areas.pagination, self.app_state.search.page_count());
                    if let Some(page) = page_at(&buttons, mouse.column, mouse.row) {
                        self.app_state.search.select_page(page);
                        self.app_state.set_focus(FocusPane::Results);
                        return true;
                    }
                }

                let pane = if areas.query.contains(position) {
                    FocusPane::Query
                } else if areas.limit.contains(position) {
                    FocusPane::Limit
                } else if areas.table.contains(position) {
                    FocusPane::Results
                } else {
                    return false;
                };
                self.app_state.set_focus(pane);
                true
            }
            MouseEventKind::ScrollDown if areas.table.contains(position) => {
                self.app_state.search.next_page()
            }
            MouseEventKind::ScrollUp if areas.table.contains(position) => {
                self.app_state.search.prev_page()
            }
            _ => false,
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        self.last_areas = Some(calculate_areas(frame_area));

        self.terminal.draw(|frame| {
            render_layout(frame, &self.app_state, &self.styles);
        })?;

        Ok(())
    }
}

/// A printable character typed without Ctrl or Alt.
fn typed_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

/// Field edit for a cursor or deletion key.
fn cursor_edit(code: KeyCode) -> Option<fn(InputField) -> InputField> {
    let edit: fn(InputField) -> InputField = match code {
        KeyCode::Backspace => handle_backspace,
        KeyCode::Delete => handle_delete,
        KeyCode::Left => handle_cursor_left,
        KeyCode::Right => handle_cursor_right,
        KeyCode::Home => handle_home,
        KeyCode::End => handle_end,
        _ => return None,
    };
    Some(edit)
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B, L> TuiApp<B, L>
where
    B: ratatui::backend::Backend,
    L: CityLookup,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        source: FetchSource<L>,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            source,
            key_bindings,
            styles: SearchStyles::with_color_config(ColorConfig::enabled()),
            last_areas: None,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Dispatch the initial search (test-only accessor)
    pub(crate) fn start_test(&mut self) {
        self.start()
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) -> bool {
        self.handle_mouse(mouse)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Block until every dispatched fetch has come back, applying each.
    ///
    /// Returns the number of outcomes applied (stale ones are dropped).
    pub(crate) fn settle(&mut self, timeout: Duration) -> usize {
        let mut applied = 0;
        while self.source.pending() > 0 {
            match self.source.wait(timeout) {
                Some(outcome) => {
                    if self.app_state.search.apply_outcome(outcome) {
                        applied += 1;
                    }
                }
                None => break,
            }
        }
        applied
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Settings for the interactive UI, resolved by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Initial result limit (already validated).
    pub limit: u32,
    /// Pre-filled query from `--query`.
    pub query: Option<String>,
    /// How to render country flags.
    pub flag_style: FlagStyle,
    /// Disable colors (`--no-color`).
    pub no_color: bool,
}

impl CliArgs {
    /// Starting UI state for these settings.
    pub fn initial_state(&self) -> AppState {
        let state = AppState::new(SearchState::new(self.limit), self.flag_style);
        match &self.query {
            Some(query) => state.with_query(query.as_str()),
            None => state,
        }
    }
}

/// Initialize and run the TUI application.
///
/// This is the main entry point for the TUI. It handles terminal setup,
/// runs the event loop, and restores the terminal on exit, including after
/// an error.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_lookup<L: CityLookup>(lookup: L, args: CliArgs) -> Result<(), TuiError> {
    let styles = SearchStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));

    let mut app = match TuiApp::new(lookup, args.initial_state(), styles) {
        Ok(app) => app,
        Err(e) => {
            // Setup may have failed halfway into raw mode.
            let _ = restore_terminal();
            return Err(e);
        }
    };

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_app_tests.rs"]
mod tests;
