//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the query/limit input row in lines (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Width of the limit input box, including borders.
///
/// Fits the "Limit (1-10)" title.
pub const LIMIT_INPUT_WIDTH: u16 = 16;

/// Height of the limit warning line.
pub const WARNING_HEIGHT: u16 = 1;

/// Height of the pagination button row.
pub const PAGINATION_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Label drawn before the first pagination button.
pub const PAGINATION_LABEL: &str = "Pages: ";

/// Columns between adjacent pagination buttons.
pub const PAGE_BUTTON_GAP: u16 = 1;

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
