//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive a full `TuiApp` over a
//! `TestBackend` and an in-memory city lookup.

mod acceptance_pagination;
mod help_overlay_tests;
