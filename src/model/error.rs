//! Error types for citysearch.
//!
//! This module defines the error taxonomy using `thiserror`. Two kinds of
//! failure exist and they are kept deliberately apart:
//!
//! - [`FetchError`] - the detailed transport-level failure produced by the HTTP
//!   client. It is logged, never shown to the user.
//! - [`SearchFailure`] and [`LimitWarning`] - the user-facing messages the
//!   search controller displays. Their `Display` output is the exact text shown
//!   in the UI.
//!
//! [`AppError`] wraps the fatal startup failures that propagate out of `main`.
//!
//! # Recovery Strategy
//!
//! Nothing that happens after startup is fatal except terminal I/O. Fetch
//! failures collapse into [`SearchFailure::Transport`] and validation problems
//! become a transient [`LimitWarning`]; the user recovers by correcting input
//! and searching again.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error for fatal startup failures.
///
/// Returned from the binary's setup path (configuration, logging, client
/// construction, terminal). All domain-specific errors convert via `From`,
/// so `?` composes cleanly.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// HTTP client or fetch runtime could not be created.
    #[error("Fetch setup error: {0}")]
    Fetch(#[from] FetchError),

    /// Terminal or stdout I/O failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures encountered while talking to the city-search API.
///
/// Every variant carries enough context for the log file. The search
/// controller does not distinguish between them: any `FetchError` is shown as
/// [`SearchFailure::Transport`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured base URL cannot be parsed or joined with the endpoint path.
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A configured credential cannot be sent as an HTTP header value.
    #[error("Invalid value for header '{header}'")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
    },

    /// The reqwest client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or the body could not be read
    /// (connection refused, DNS, TLS, timeout).
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("API returned HTTP {status}")]
    Status {
        /// Numeric status code.
        status: u16,
    },

    /// The body was not the expected `{ "data": [...] }` envelope.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The background runtime that drives requests is gone or could not start.
    #[error("Fetch runtime unavailable: {0}")]
    Runtime(String),
}

/// Terminal outcome of a search that did not produce rows.
///
/// Displayed in place of the table body. `NoResults` and `Transport` look the
/// same on screen but are distinct conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The API succeeded but returned zero cities.
    #[error("No result found")]
    NoResults,

    /// Network, status, or decode failure.
    #[error("Failed to fetch data")]
    Transport,
}

/// Transient validation message about the result limit.
///
/// Independent of the search status: a warning never clears results or errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitWarning {
    /// The user tried to set the limit above the maximum.
    #[error("Limit cannot exceed 10")]
    AboveMaximum,

    /// A search was attempted while the limit is above the maximum.
    #[error("You cannot fetch more than 10 items.")]
    FetchTooMany,

    /// The user tried to set the limit below 1.
    #[error("Limit must be at least 1")]
    BelowMinimum,
}
