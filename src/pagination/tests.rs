//! Tests for pagination module

use super::*;
use crate::types::{params, QueryParameters};
use serde_json::{json, Value};

fn search_root(next: Option<&str>) -> Value {
    let mut links = vec![json!({"@ref": "self", "@href": "https://api.example.com/p1"})];
    if let Some(href) = next {
        links.push(json!({"@ref": "next", "@href": href}));
    }
    json!({"entry": [], "link": links})
}

fn offset_root(start: u32, count: u32) -> Value {
    json!({
        "opensearch:startIndex": start.to_string(),
        "opensearch:itemsPerPage": count.to_string(),
        "link": [{
            "@ref": "self",
            "@href": format!("https://api.example.com/search?start={start}&count={count}&query=x")
        }]
    })
}

// ============================================================================
// NextPage / Continuation Tests
// ============================================================================

#[test]
fn test_next_page_with_param() {
    let next = NextPage::with_param("start", "200");
    assert!(next.is_continue());

    if let NextPage::Continue { query_params, url } = next {
        assert_eq!(query_params.get("start"), Some(&"200".to_string()));
        assert!(url.is_none());
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_next_page_with_url() {
    let next = NextPage::with_url("https://api.example.com/page2");
    if let NextPage::Continue { query_params, url } = next {
        assert!(query_params.is_empty());
        assert_eq!(url, Some("https://api.example.com/page2".to_string()));
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_continuation_default_not_started() {
    let c = Continuation::default();
    assert_eq!(c, Continuation::NotStarted);
    assert!(!c.is_done());
    assert!(c.next_url().is_none());
    assert_eq!(Continuation::NextUrl("u".into()).next_url(), Some("u"));
    assert!(Continuation::Done.is_done());
}

// ============================================================================
// None Strategy Tests
// ============================================================================

#[test]
fn test_none_always_done() {
    let strategy = PaginationStrategy::None;
    let mut state = PaginationState::new();

    let root = search_root(Some("https://api.example.com/p2"));
    let next = strategy.next_page(Some(&root), 25, &QueryParameters::new(), &mut state);
    assert!(next.is_done());

    let mut state = PaginationState::new();
    assert!(strategy
        .next_page(None, 0, &QueryParameters::new(), &mut state)
        .is_done());
}

// ============================================================================
// Link-based Strategy Tests
// ============================================================================

#[test]
fn test_link_based_follows_next() {
    let strategy = PaginationStrategy::link_based();
    let mut state = PaginationState::new();
    let root = search_root(Some("https://api.example.com/p2"));

    let next = strategy.next_page(Some(&root), 3, &QueryParameters::new(), &mut state);
    assert_eq!(next, NextPage::with_url("https://api.example.com/p2"));
    assert_eq!(state.pages, 1);
    assert_eq!(state.total_fetched, 3);
}

#[test]
fn test_link_based_done_without_next() {
    let strategy = PaginationStrategy::link_based();
    let mut state = PaginationState::new();
    let root = search_root(None);

    assert!(strategy
        .next_page(Some(&root), 3, &QueryParameters::new(), &mut state)
        .is_done());
}

#[test]
fn test_link_based_done_without_root() {
    let strategy = PaginationStrategy::link_based();
    let mut state = PaginationState::new();
    assert!(strategy
        .next_page(None, 0, &QueryParameters::new(), &mut state)
        .is_done());
}

// ============================================================================
// Offset-capped Strategy Tests
// ============================================================================

#[test]
fn test_page_size_from_params() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);
    assert_eq!(strategy.page_size(&QueryParameters::new()), Some(200));
    assert_eq!(strategy.page_size(&params([("count", "25")])), Some(25));
    assert_eq!(strategy.page_size(&params([("count", "abc")])), Some(200));
    assert_eq!(strategy.page_size(&params([("count", "0")])), Some(200));
    assert_eq!(PaginationStrategy::None.page_size(&QueryParameters::new()), None);
}

#[test]
fn test_initial_offset() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);
    assert_eq!(strategy.initial_offset(&QueryParameters::new()), 0);
    assert_eq!(strategy.initial_offset(&params([("start", "600")])), 600);
    assert_eq!(PaginationStrategy::link_based().initial_offset(&params([("start", "5")])), 0);
}

#[test]
fn test_offset_advances_from_self_link() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);
    let mut state = PaginationState::new();
    let root = offset_root(400, 200);

    let next = strategy.next_page(Some(&root), 200, &params([("count", "200")]), &mut state);
    assert_eq!(next, NextPage::with_param("start", "600"));
    assert_eq!(state.offset, 600);
}

#[test]
fn test_offset_falls_back_to_opensearch_fields() {
    let strategy = PaginationStrategy::offset_capped(100, 10_000);
    let mut state = PaginationState::new();
    let root = json!({"opensearch:startIndex": "100", "opensearch:itemsPerPage": 100});

    let next = strategy.next_page(Some(&root), 100, &QueryParameters::new(), &mut state);
    assert_eq!(next, NextPage::with_param("start", "200"));
}

#[test]
fn test_offset_falls_back_to_tracked_window() {
    let strategy = PaginationStrategy::offset_capped(50, 10_000);
    let mut state = PaginationState::new();
    state.set_offset(150);

    let next = strategy.next_page(Some(&json!({})), 50, &QueryParameters::new(), &mut state);
    assert_eq!(next, NextPage::with_param("start", "200"));
}

#[test]
fn test_offset_short_page_is_done() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);
    let mut state = PaginationState::new();
    let root = offset_root(0, 200);

    assert!(strategy
        .next_page(Some(&root), 199, &QueryParameters::new(), &mut state)
        .is_done());
}

#[test]
fn test_offset_missing_root_is_done() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);
    let mut state = PaginationState::new();
    assert!(strategy
        .next_page(None, 200, &QueryParameters::new(), &mut state)
        .is_done());
}

#[test]
fn test_offset_stops_at_ceiling() {
    let strategy = PaginationStrategy::offset_capped(200, 10_000);

    let mut state = PaginationState::new();
    let next = strategy.next_page(Some(&offset_root(9_600, 200)), 200, &QueryParameters::new(), &mut state);
    assert_eq!(next, NextPage::with_param("start", "9800"));

    let mut state = PaginationState::new();
    let next = strategy.next_page(Some(&offset_root(9_800, 200)), 200, &QueryParameters::new(), &mut state);
    assert!(next.is_done());
}

#[test]
fn test_current_window() {
    assert_eq!(current_window(&offset_root(40, 20), "start", "count"), Some((40, 20)));

    let no_start = json!({"link": [{"@ref": "self", "@href": "https://x/s?count=25"}]});
    assert_eq!(current_window(&no_start, "start", "count"), Some((0, 25)));

    assert_eq!(current_window(&json!({}), "start", "count"), None);
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::new();
    state.add_page(10);
    state.add_page(5);
    state.set_offset(200);
    assert_eq!(state.pages, 2);
    assert_eq!(state.total_fetched, 15);
    assert_eq!(state.offset, 200);

    state.reset();
    assert_eq!(state.pages, 0);
}
