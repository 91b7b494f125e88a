//! Integration test: controller and fetch source working together through
//! the public API, backed by an in-memory lookup.

use citysearch::client::CityLookup;
use citysearch::model::{City, FetchError, FlagStyle, SearchFailure};
use citysearch::source::FetchSource;
use citysearch::state::{AppState, SearchState, SearchStatus};
use citysearch::view::{format_rows, search_once};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

/// Filters a fixed list by prefix and records every call.
#[derive(Clone, Default)]
struct Atlas {
    cities: Vec<City>,
    down: bool,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl Atlas {
    fn new() -> Self {
        Self {
            cities: vec![
                City::new("1", "Lagos", "Nigeria", "NG"),
                City::new("2", "Lahore", "Pakistan", "PK"),
                City::new("3", "La Paz", "Bolivia", "BO"),
                City::new("4", "Lausanne", "Switzerland", "CH"),
                City::new("5", "Lima", "Peru", "PE"),
                City::new("6", "Lisbon", "Portugal", "PT"),
                City::new("7", "London", "United Kingdom", "GB"),
            ],
            ..Self::default()
        }
    }

    fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CityLookup for Atlas {
    fn search_cities(
        &self,
        name_prefix: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<City>, FetchError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((name_prefix.to_string(), limit));
        let result = if self.down {
            Err(FetchError::Status { status: 502 })
        } else {
            Ok(self
                .cities
                .iter()
                .filter(|c| c.name.starts_with(name_prefix))
                .take(limit as usize)
                .cloned()
                .collect())
        };
        async move { result }
    }
}

#[test]
fn dispatch_and_wait_load_results() {
    let atlas = Atlas::new();
    let mut source = FetchSource::new(atlas.clone()).unwrap();
    let mut state = SearchState::new(4);

    source.dispatch(state.initialize().unwrap());
    let outcome = source.wait(WAIT).expect("outcome");

    assert!(state.apply_outcome(outcome));
    assert_eq!(atlas.calls(), vec![(String::new(), 4)]);
    assert_eq!(state.results().len(), 4);
    assert_eq!(state.page_count(), 2);
}

#[test]
fn superseded_request_is_discarded() {
    let mut source = FetchSource::new(Atlas::new()).unwrap();
    let mut state = SearchState::new(10);

    source.dispatch(state.search("La").unwrap());
    source.dispatch(state.search("Li").unwrap());

    let mut applied = 0;
    while source.pending() > 0 {
        let outcome = source.wait(WAIT).expect("outcome");
        if state.apply_outcome(outcome) {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    let names: Vec<_> = state.results().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Lima", "Lisbon"]);
}

#[test]
fn search_once_prints_all_rows_across_pages() {
    let mut state = AppState::new(SearchState::new(10), FlagStyle::Code).with_query("La");

    search_once(Atlas::new(), &mut state, WAIT).unwrap();

    assert_eq!(state.search.page_count(), 2);
    assert_eq!(
        format_rows(&state),
        vec![
            "1  Lagos  Nigeria NG",
            "2  Lahore  Pakistan PK",
            "3  La Paz  Bolivia BO",
            "4  Lausanne  Switzerland CH",
        ]
    );
}

#[test]
fn unreachable_backend_reports_transport_failure() {
    let mut state = AppState::default();

    search_once(Atlas::down(), &mut state, WAIT).unwrap();

    assert_eq!(
        state.search.status(),
        SearchStatus::Error(SearchFailure::Transport)
    );
    assert!(format_rows(&state).is_empty());
}
