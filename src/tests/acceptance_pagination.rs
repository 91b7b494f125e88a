//! Acceptance tests: paging through results.

use crate::client::fake::{numbered_cities, FakeLookup};
use crate::model::FlagStyle;
use crate::state::{AppState, SearchState};
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

/// Started harness with `n` results and focus on the table.
fn loaded(n: usize, limit: u32) -> AcceptanceTestHarness {
    let state = AppState::new(SearchState::new(limit), FlagStyle::Code);
    let mut harness =
        AcceptanceTestHarness::with_state(FakeLookup::with_cities(numbered_cities(n)), state, 80, 24)
            .unwrap();
    harness.start();
    harness.send_key(KeyCode::Esc);
    harness
}

#[test]
fn five_results_make_two_pages() {
    let mut harness = loaded(5, 5);

    assert_eq!(harness.state().search.page_count(), 2);

    harness.send_key(KeyCode::Char('2'));

    let rows: Vec<_> = harness
        .state()
        .search
        .visible_rows()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(rows, vec!["Town4", "Town5"]);
    let screen = harness.render_to_string();
    assert!(screen.contains("Page 2/2 | 5 results"));
}

#[test]
fn row_numbers_continue_across_pages() {
    let mut harness = loaded(6, 6);

    harness.send_key(KeyCode::Right);

    assert_eq!(harness.state().search.first_row_number(), 4);
    let screen = harness.render_to_string();
    assert!(screen.contains("Town6"));
    assert!(!screen.contains("Town3"));
}

#[test]
fn paging_stops_at_both_ends() {
    let mut harness = loaded(7, 7);

    harness.send_keys(&[KeyCode::Left]);
    assert_eq!(harness.state().search.current_page(), 1);

    harness.send_keys(&[KeyCode::Right, KeyCode::Right, KeyCode::Right]);
    assert_eq!(harness.state().search.current_page(), 3);
    assert_eq!(harness.state().search.visible_rows().len(), 1);
}

#[test]
fn home_and_end_jump_to_first_and_last() {
    let mut harness = loaded(10, 10);

    harness.send_key(KeyCode::End);
    assert_eq!(harness.state().search.current_page(), 4);

    harness.send_key(KeyCode::Home);
    assert_eq!(harness.state().search.current_page(), 1);

    harness.send_key_with_mods(KeyCode::Char('G'), KeyModifiers::SHIFT);
    assert_eq!(harness.state().search.current_page(), 4);
}

#[test]
fn selecting_missing_page_is_ignored() {
    let mut harness = loaded(4, 4);

    harness.send_key(KeyCode::Char('5'));

    assert_eq!(harness.state().search.current_page(), 1);
}

#[test]
fn clicking_page_button_selects_page() {
    let mut harness = loaded(9, 9);

    harness.click_page(3);
    assert_eq!(harness.state().search.current_page(), 3);

    harness.click_page(1);
    assert_eq!(harness.state().search.current_page(), 1);
}

#[test]
fn three_results_fit_one_page() {
    let mut harness = loaded(3, 5);

    assert_eq!(harness.state().search.page_count(), 1);
    let screen = harness.render_to_string();
    assert!(screen.contains("Pages: [1]"));
    assert!(!screen.contains("[2]"));
}
