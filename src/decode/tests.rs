//! Tests for decoder module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// PageDecoder Tests
// ============================================================================

#[test]
fn test_decode_entries_under_root() {
    let body = json!({
        "search-results": {
            "opensearch:totalResults": "2",
            "entry": [{"dc:title": "A"}, {"dc:title": "B"}],
            "link": []
        }
    })
    .to_string();

    let page = PageDecoder::new("search-results").decode(&body).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.entries[1]["dc:title"], "B");
    assert!(page.root.is_some());
}

#[test]
fn test_decode_missing_root_is_empty_page() {
    let body = json!({"something-else": {}}).to_string();
    let page = PageDecoder::new("search-results").decode(&body).unwrap();
    assert!(page.is_empty());
    assert!(page.root.is_none());
}

#[test]
fn test_decode_missing_entry_is_empty_page() {
    let body = json!({"search-results": {"link": []}}).to_string();
    let page = PageDecoder::new("search-results").decode(&body).unwrap();
    assert!(page.is_empty());
    assert!(page.root.is_some());
}

#[test]
fn test_decode_strict_missing_root_is_malformed() {
    let body = json!({"unexpected": true}).to_string();
    let err = PageDecoder::new("serial-metadata-response")
        .strict(true)
        .decode(&body)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_decode_strict_non_object_root_is_malformed() {
    let body = json!({"serial-metadata-response": "nope"}).to_string();
    let err = PageDecoder::new("serial-metadata-response")
        .strict(true)
        .decode(&body)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_decode_invalid_json_is_malformed() {
    let err = PageDecoder::new("search-results")
        .decode("<html>gateway</html>")
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_extract_single_object_entry() {
    let root = json!({"entry": {"dc:identifier": "SCOPUS_ID:1"}});
    assert_eq!(extract_entries(&root).len(), 1);
}

// ============================================================================
// Link Tests
// ============================================================================

#[test]
fn test_find_link_next() {
    let root = json!({
        "link": [
            {"@ref": "self", "@href": "https://api.example.com/p1"},
            {"@ref": "next", "@href": "https://api.example.com/p2"}
        ]
    });
    assert_eq!(
        find_link(&root, "next"),
        Some("https://api.example.com/p2".to_string())
    );
    assert_eq!(
        find_link(&root, "self"),
        Some("https://api.example.com/p1".to_string())
    );
    assert_eq!(find_link(&root, "prev"), None);
}

#[test]
fn test_find_link_single_object() {
    let root = json!({"link": {"@ref": "next", "@href": "https://x/2"}});
    assert_eq!(find_link(&root, "next"), Some("https://x/2".to_string()));
}

#[test]
fn test_find_link_absent_or_empty_href() {
    assert_eq!(find_link(&json!({}), "next"), None);
    assert_eq!(
        find_link(&json!({"link": [{"@ref": "next", "@href": ""}]}), "next"),
        None
    );
}

// ============================================================================
// Error Message Tests
// ============================================================================

#[test]
fn test_error_message_service_error() {
    let body = json!({
        "service-error": {
            "status": {"statusCode": "INVALID_INPUT", "statusText": "Invalid search query"}
        }
    })
    .to_string();
    assert_eq!(error_message(&body), "INVALID_INPUT: Invalid search query");
}

#[test]
fn test_error_message_error_response() {
    let body = json!({
        "error-response": {"error-code": "TOO_MANY_REQUESTS", "error-message": "Quota Exceeded"}
    })
    .to_string();
    assert_eq!(error_message(&body), "Quota Exceeded");
}

#[test]
fn test_error_message_plain_error() {
    let body = json!({"error": "Bad gateway"}).to_string();
    assert_eq!(error_message(&body), "Bad gateway");
}

#[test]
fn test_error_message_raw_body_fallback() {
    assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
    assert_eq!(error_message("   "), "empty response body");

    let long = "x".repeat(500);
    let msg = error_message(&long);
    assert!(msg.ends_with("..."));
    assert_eq!(msg.len(), 203);
}
