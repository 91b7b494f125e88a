//! Search controller state machine.
//!
//! `SearchState` owns the query, the result limit, the last fetched cities and
//! the pagination cursor. Every operation is a pure state transition; the
//! network call itself happens elsewhere. `search` hands back a
//! [`SearchRequest`] for the fetch source to run, and the matching
//! [`SearchOutcome`] is fed back through [`SearchState::apply_outcome`].
//!
//! Status transitions: `Idle → Loading → {Loaded, Error}`, and back to
//! `Loading` only through a new search.

use crate::model::{City, FetchError, LimitWarning, SearchFailure};
use std::fmt;
use std::num::IntErrorKind;
use tracing::{debug, warn};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 3;

/// Smallest accepted result limit.
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted result limit.
pub const MAX_LIMIT: u32 = 10;

/// Result limit used when nothing else is configured.
pub const DEFAULT_LIMIT: u32 = 5;

// ===== Requests and outcomes =====

/// Monotonically increasing identifier of an issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Fence token; the outcome must carry the same id.
    pub id: RequestId,
    /// Name prefix to search for (may be empty).
    pub term: String,
    /// Maximum number of cities to return.
    pub limit: u32,
}

/// Result of running a [`SearchRequest`].
#[derive(Debug)]
pub struct SearchOutcome {
    /// Id of the request this answers.
    pub id: RequestId,
    /// Cities in API order, or the transport failure.
    pub result: Result<Vec<City>, FetchError>,
}

// ===== SearchStatus =====

/// Display mode of the results area. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Nothing fetched yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The last search produced no rows.
    Error(SearchFailure),
    /// The last search produced at least one row.
    Loaded,
}

// ===== SearchState =====

/// Search controller state.
#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    pub(crate) limit: u32,
    results: Vec<City>,
    status: SearchStatus,
    warning: Option<LimitWarning>,
    current_page: usize,
    next_request: u64,
    in_flight: Option<RequestId>,
    initialized: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl SearchState {
    /// Create an idle controller with the given starting limit.
    ///
    /// The limit is clamped into `MIN_LIMIT..=MAX_LIMIT`.
    pub fn new(limit: u32) -> Self {
        Self {
            query: String::new(),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
            results: Vec::new(),
            status: SearchStatus::Idle,
            warning: None,
            current_page: 1,
            next_request: 0,
            in_flight: None,
            initialized: false,
        }
    }

    // ----- accessors -----

    /// Current free-text query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Limit used by the next search.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Cities from the last successful search.
    pub fn results(&self) -> &[City] {
        &self.results
    }

    /// Current display mode.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Current validation warning, if any.
    pub fn warning(&self) -> Option<LimitWarning> {
        self.warning
    }

    /// 1-based pagination cursor.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Id of the request whose outcome will be applied next.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Whether a search is outstanding.
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    // ----- operations -----

    /// Replace the query text. Does not search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Issue the initial empty-query search.
    ///
    /// Returns a request only on the first call.
    pub fn initialize(&mut self) -> Option<SearchRequest> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        self.search("")
    }

    /// Set the limit for the next search.
    ///
    /// Values above `MAX_LIMIT` or below `MIN_LIMIT` leave the limit unchanged
    /// and set a warning; accepted values clear the warning.
    ///
    /// Returns whether the value was accepted.
    pub fn update_limit(&mut self, raw: i64) -> bool {
        if raw > i64::from(MAX_LIMIT) {
            self.warning = Some(LimitWarning::AboveMaximum);
            return false;
        }
        if raw < i64::from(MIN_LIMIT) {
            self.warning = Some(LimitWarning::BelowMinimum);
            return false;
        }
        self.warning = None;
        // In range, so the conversion cannot fail.
        self.limit = u32::try_from(raw).unwrap_or(self.limit);
        true
    }

    /// Parse limit text typed by the user and apply it.
    ///
    /// Empty or non-numeric text leaves both the limit and the warning alone.
    /// Numeric text too large for `i64` counts as above the maximum.
    ///
    /// Returns whether the limit now reflects `text`.
    pub fn apply_limit_text(&mut self, text: &str) -> bool {
        match text.trim().parse::<i64>() {
            Ok(value) => self.update_limit(value),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => self.update_limit(i64::MAX),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => self.update_limit(i64::MIN),
            Err(_) => false,
        }
    }

    /// Start a search for `term` with the current limit.
    ///
    /// If the limit is above the maximum, sets a warning and returns `None`
    /// without touching results or status. Otherwise switches to `Loading`,
    /// clears the warning and returns the request to run. A request issued
    /// here supersedes any still outstanding one.
    pub fn search(&mut self, term: &str) -> Option<SearchRequest> {
        if self.limit > MAX_LIMIT {
            self.warning = Some(LimitWarning::FetchTooMany);
            return None;
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight = Some(id);
        self.status = SearchStatus::Loading;
        self.warning = None;

        Some(SearchRequest {
            id,
            term: term.to_string(),
            limit: self.limit,
        })
    }

    /// Search with the stored query.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let term = self.query.clone();
        self.search(&term)
    }

    /// Apply a finished fetch.
    ///
    /// Outcomes for anything but the most recently issued request are
    /// discarded. Applying an outcome always leaves `Loading` and resets the
    /// page to 1.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if self.in_flight != Some(outcome.id) {
            debug!(
                request = outcome.id.value(),
                latest = ?self.in_flight.map(RequestId::value),
                "Discarding stale search response"
            );
            return false;
        }

        self.in_flight = None;
        self.current_page = 1;

        match outcome.result {
            Ok(cities) if cities.is_empty() => {
                self.status = SearchStatus::Error(SearchFailure::NoResults);
                self.results.clear();
            }
            Ok(cities) => {
                debug!(request = outcome.id.value(), count = cities.len(), "Search loaded");
                self.status = SearchStatus::Loaded;
                self.results = cities;
            }
            Err(err) => {
                warn!(request = outcome.id.value(), error = %err, "City search failed");
                self.status = SearchStatus::Error(SearchFailure::Transport);
                self.results.clear();
            }
        }

        true
    }

    // ----- pagination -----

    /// Move to `page` (1-based). No bounds checking.
    pub fn paginate(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Number of pages for the current results.
    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(PAGE_SIZE)
    }

    /// Go to `page` if it exists. Returns whether the page changed.
    pub fn select_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.page_count() || page == self.current_page {
            return false;
        }
        self.paginate(page);
        true
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) -> bool {
        self.select_page(self.current_page + 1)
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) -> bool {
        self.select_page(self.current_page.saturating_sub(1))
    }

    /// Jump to page 1.
    pub fn first_page(&mut self) -> bool {
        self.select_page(1)
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) -> bool {
        self.select_page(self.page_count())
    }

    /// Rows on the current page.
    ///
    /// Computed on every call. An out-of-range page yields an empty slice.
    pub fn visible_rows(&self) -> &[City] {
        let start = self.current_page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let end = start.saturating_add(PAGE_SIZE).min(self.results.len());
        self.results.get(start..end).unwrap_or(&[])
    }

    /// 1-based row number of the first visible row.
    pub fn first_row_number(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .saturating_add(1)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
