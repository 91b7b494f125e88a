//! Domain model types (pure).
//!
//! All types in this module are plain data with no I/O.

pub mod city;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use city::{CitiesResponse, City, CityId, FlagStyle, FLAG_IMAGE_BASE};
pub use error::{AppError, FetchError, LimitWarning, SearchFailure};
pub use key_action::KeyAction;
