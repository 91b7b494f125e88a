//! City Search (citysearch)
//!
//! Terminal UI for searching cities by name prefix against the GeoDB
//! Cities API, with a limit control and client-side pagination.
//!
//! Follows the Pure Core / Impure Shell architecture: `model` and `state`
//! are pure and testable without a terminal or network; `client`, `source`
//! and `view` are the shell.

pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
