//! One-shot search for `--print`: same controller and fetch source as the
//! TUI, output as plain lines.

use crate::client::CityLookup;
use crate::model::FetchError;
use crate::source::FetchSource;
use crate::state::{AppState, SearchOutcome};
use crate::view::results::row_cells;
use crate::view::TuiError;
use std::time::Duration;
use tracing::warn;

/// Run the initial search for `state` and apply its outcome.
///
/// Blocks for at most `timeout`. If nothing comes back in time the search
/// is failed as a transport error. On return the controller is either
/// `Loaded` or `Error`.
///
/// # Errors
///
/// Returns `TuiError::Fetch` if the fetch source cannot be started.
pub fn search_once<L: CityLookup>(
    lookup: L,
    state: &mut AppState,
    timeout: Duration,
) -> Result<(), TuiError> {
    let Some(request) = state.initial_request() else {
        return Ok(());
    };
    let id = request.id;

    let mut source = FetchSource::new(lookup)?;
    source.dispatch(request);

    let outcome = source.wait(timeout).unwrap_or_else(|| {
        warn!(request = %id, ?timeout, "No search outcome before deadline");
        SearchOutcome {
            id,
            result: Err(FetchError::Runtime("search timed out".to_string())),
        }
    });
    state.search.apply_outcome(outcome);

    Ok(())
}

/// Every result as `#  name  country flag`, numbered from 1.
pub fn format_rows(state: &AppState) -> Vec<String> {
    state
        .search
        .results()
        .iter()
        .enumerate()
        .map(|(index, city)| row_cells(index + 1, city, state.flag_style).join("  "))
        .collect()
}
