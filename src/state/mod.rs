//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod input_handler;
pub mod search;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use input_handler::InputField;
pub use search::{
    RequestId, SearchOutcome, SearchRequest, SearchState, SearchStatus, DEFAULT_LIMIT, MAX_LIMIT,
    MIN_LIMIT, PAGE_SIZE,
};
