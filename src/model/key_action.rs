//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Search
    /// Run a search with the current query and limit. Default: Enter
    SubmitSearch,

    // Focus navigation
    /// Cycle focus Query → Limit → Results. Default: Tab
    CycleFocus,
    /// Cycle focus backwards. Default: Shift+Tab
    CycleFocusBack,
    /// Focus the query field. Default: /
    FocusQuery,
    /// Focus the limit field. Default: l
    FocusLimit,

    // Pagination
    /// Show the next page of results. Default: →/n/]
    NextPage,
    /// Show the previous page of results. Default: ←/p/[
    PrevPage,
    /// Jump to the first page. Default: g
    FirstPage,
    /// Jump to the last page. Default: G
    LastPage,
    /// Select a page by its 1-based number. Default: 1-9
    SelectPage(usize),

    // Application
    /// Show or hide the help overlay. Default: ?
    ToggleHelp,
    /// Exit the application. Default: q
    Quit,
}

impl KeyAction {
    /// Whether this action should also fire while a text field has focus.
    ///
    /// Character keys are consumed by the fields, so only actions bound to
    /// non-character keys (Enter, Tab, ...) pass through.
    pub fn applies_in_text_field(self) -> bool {
        matches!(
            self,
            KeyAction::SubmitSearch | KeyAction::CycleFocus | KeyAction::CycleFocusBack
        )
    }
}
