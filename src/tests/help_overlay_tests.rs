//! Help overlay behavior through the full app.

use crate::client::fake::{numbered_cities, FakeLookup};
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

fn started() -> AcceptanceTestHarness {
    let mut harness =
        AcceptanceTestHarness::new(FakeLookup::with_cities(numbered_cities(6))).unwrap();
    harness.start();
    harness.send_key(KeyCode::Esc);
    harness
}

#[test]
fn question_mark_is_text_in_query_field() {
    let mut harness = started();
    harness.send_key(KeyCode::Char('/'));

    harness.send_key(KeyCode::Char('?'));

    assert!(!harness.state().help_visible);
    assert_eq!(harness.state().query_field().text(), "?");
}

#[test]
fn question_mark_opens_help_from_results() {
    let mut harness = started();

    harness.send_key(KeyCode::Char('?'));

    assert!(harness.state().help_visible);
    let screen = harness.render_to_string();
    assert!(screen.contains("Keyboard Shortcuts"));
    assert!(screen.contains("Press Esc or ? to close"));
}

#[test]
fn help_blocks_paging_and_typing() {
    let mut harness = started();
    harness.send_key(KeyCode::Char('?'));

    harness.send_keys(&[KeyCode::Right, KeyCode::Char('2'), KeyCode::Char('/')]);

    assert!(harness.state().help_visible);
    assert_eq!(harness.state().search.current_page(), 1);
}

#[test]
fn esc_and_question_mark_close_help() {
    let mut harness = started();

    harness.send_key(KeyCode::Char('?'));
    harness.send_key(KeyCode::Esc);
    assert!(!harness.state().help_visible);

    harness.send_key(KeyCode::Char('?'));
    harness.send_key(KeyCode::Char('?'));
    assert!(!harness.state().help_visible);
    assert!(!harness.render_to_string().contains("Keyboard Shortcuts"));
}

#[test]
fn q_quits_even_with_help_open() {
    let mut harness = started();
    harness.send_key(KeyCode::Char('?'));

    assert!(harness.send_key(KeyCode::Char('q')));
    assert!(!harness.is_running());
}

#[test]
fn click_closes_help_without_changing_page() {
    let mut harness = started();
    harness.send_key(KeyCode::Char('?'));

    harness.click_page(2);

    assert!(!harness.state().help_visible);
    assert_eq!(harness.state().search.current_page(), 1);
}
