//! Request level tests
//!
//! Tests cover:
//! - Empty requests
//! - Leaf and branch sums
//! - Duplicate detection across the whole tree
//! - Request shape errors
//! - Output ordering and determinism

use serde_json::{json, Value};

use super::*;
use crate::testing::{binary_tree_request, binary_tree_result};

fn sums(request: &Value) -> Value {
    let payload = serde_json::to_vec(request).unwrap();

    serde_json::from_slice(&sum_facets(&payload).unwrap()).unwrap()
}

fn rejection(request: &str) -> SummaryError {
    match summarize_request(request.as_bytes()) {
        Ok(table) => panic!("request should be rejected, got {table:?}"),
        Err(err) => err,
    }
}

// ============================================================
// Valid Requests
// ============================================================

#[test]
fn test_empty_request() {
    assert_eq!(sum_facets(b"{}").unwrap(), br#"{"result":[]}"#);
    assert_eq!(sum_facets(br#"{"data": {}}"#).unwrap(), br#"{"result":[]}"#);
}

#[test]
fn test_single_leaf() {
    assert_eq!(
        sums(&json!({"data": {"facet1": {"count": 100}}})),
        json!({"result": [{"facet1": 100}]})
    );
}

#[test]
fn test_nested_tree() {
    let request = json!({"data": {
        "facet1": {"facet3": {
            "facet4": {"facet6": {"count": 20}, "facet7": {"count": 30}},
            "facet5": {"count": 50},
        }},
        "facet2": {"count": 0},
    }});

    assert_eq!(
        sums(&request),
        json!({"result": [
            {"facet1": 100},
            {"facet2": 0},
            {"facet3": 100},
            {"facet4": 50},
            {"facet5": 50},
            {"facet6": 20},
            {"facet7": 30},
        ]})
    );
}

#[test]
fn test_single_branch() {
    assert_eq!(
        sums(&json!({"data": {"facet4": {"facet6": {"count": 20}, "facet7": {"count": 30}}}})),
        json!({"result": [{"facet4": 50}, {"facet6": 20}, {"facet7": 30}]})
    );
}

#[test]
fn test_fractional_counts_are_rounded_before_summing() {
    assert_eq!(
        sums(&json!({"data": {"a": {"b": {"count": 2.6}, "c": {"count": 4.0}}}})),
        json!({"result": [{"a": 7}, {"b": 3}, {"c": 4}]})
    );
}

#[test]
fn test_negative_counts() {
    assert_eq!(
        sums(&json!({"data": {"a": {"b": {"count": -5}, "c": {"count": 3}}}})),
        json!({"result": [{"a": -2}, {"b": -5}, {"c": 3}]})
    );
}

#[test]
fn test_keys_besides_data_are_ignored() {
    assert_eq!(
        sums(&json!({"data": {"a": {"count": 1}}, "meta": "ignored"})),
        json!({"result": [{"a": 1}]})
    );
}

#[test]
fn test_top_level_facet_may_be_called_count() {
    assert_eq!(
        sums(&json!({"data": {"count": {"count": 3}}})),
        json!({"result": [{"count": 3}]})
    );
}

#[test]
fn test_binary_tree() {
    for height in 0..=6 {
        let expected: Value = serde_json::from_str(&binary_tree_result(height)).unwrap();
        let actual = sum_facets(binary_tree_request(height).as_bytes()).unwrap();

        assert_eq!(
            serde_json::from_slice::<Value>(&actual).unwrap(),
            expected,
            "binary tree of height {height}"
        );
    }
}

#[test]
fn test_branch_additivity() {
    let table = summarize_request(binary_tree_request(8).as_bytes()).unwrap();

    // facet n has children 2n and 2n + 1 down to the 128 leaves
    for parent in 1..128_u32 {
        let sum = |number: u32| table.get(&format!("facet{number:05}")).unwrap();

        assert_eq!(
            sum(parent),
            sum(parent * 2) + sum(parent * 2 + 1),
            "facet{parent:05} is the sum of its children"
        );
    }
}

#[test]
fn test_summarizing_is_deterministic() {
    let request = binary_tree_request(5);

    let first = summarize_request(request.as_bytes()).unwrap();
    let second = summarize_request(request.as_bytes()).unwrap();
    assert_eq!(first, second);

    assert_eq!(
        sum_facets(request.as_bytes()).unwrap(),
        sum_facets(request.as_bytes()).unwrap()
    );
}

#[test]
fn test_output_is_sorted_by_name() {
    let request = r#"{"data": {
        "zulu": {"count": 1},
        "alpha": {"yankee": {"count": 2}, "bravo": {"count": 3}},
        "mike": {"count": 4}
    }}"#;

    let output: Value = serde_json::from_slice(&sum_facets(request.as_bytes()).unwrap()).unwrap();
    let names: Vec<_> = output["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry.as_object().unwrap().keys().next().unwrap().clone())
        .collect();

    assert_eq!(names, ["alpha", "bravo", "mike", "yankee", "zulu"]);
}

// ============================================================
// Rejected Requests
// ============================================================

#[test]
fn test_invalid_json() {
    assert!(matches!(rejection(r#"{"data": "#), SummaryError::Decode(_)));
    assert!(matches!(rejection(""), SummaryError::Decode(_)));
}

#[test]
fn test_request_must_be_an_object() {
    assert!(matches!(rejection("[]"), SummaryError::RequestNotAnObject));
    assert!(matches!(rejection("42"), SummaryError::RequestNotAnObject));
}

#[test]
fn test_missing_data() {
    assert!(matches!(
        rejection(r#"{"facet1": {"count": 1}}"#),
        SummaryError::MissingData
    ));
}

#[test]
fn test_data_must_be_an_object() {
    assert!(matches!(rejection(r#"{"data": []}"#), SummaryError::DataNotAnObject));
    assert!(matches!(rejection(r#"{"data": 3}"#), SummaryError::DataNotAnObject));
}

#[test]
fn test_empty_facet_below_root() {
    let err = rejection(r#"{"data": {"a": {}}}"#);

    assert!(matches!(err, SummaryError::Empty { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("a"));
}

#[test]
fn test_malformed_leaf() {
    let err = rejection(r#"{"data": {"a": {"b": {"count": 5, "extra": 1}}}}"#);

    assert!(matches!(err, SummaryError::CountNotSole { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("b"));
    assert_eq!(err.to_string(), "malformed facet `b`: count must be the sole field");
}

#[test]
fn test_non_integer_count() {
    let err = rejection(r#"{"data": {"a": {"count": "abc"}}}"#);

    assert!(matches!(err, SummaryError::CountNotInteger { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("a"));
}

#[test]
fn test_duplicate_across_branches() {
    let err = rejection(
        r#"{"data": {
            "a": {"x": {"count": 1}},
            "b": {"x": {"count": 2}}
        }}"#,
    );

    assert!(matches!(err, SummaryError::DuplicateName { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("x"));
}

#[test]
fn test_duplicate_between_top_level_and_nested() {
    let err = rejection(r#"{"data": {"a": {"b": {"count": 1}}, "b": {"count": 2}}}"#);

    assert!(matches!(err, SummaryError::DuplicateName { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("b"));
}

#[test]
fn test_duplicate_between_branch_and_descendant() {
    let err = rejection(r#"{"data": {"a": {"b": {"a": {"count": 1}}}}}"#);

    assert!(matches!(err, SummaryError::DuplicateName { .. }), "got {err:?}");
    assert_eq!(err.facet(), Some("a"));
}

#[test]
fn test_validation_errors_are_classified_invalid() {
    let err = sum_facets(br#"{"data": {"a": {}}}"#).unwrap_err();

    assert!(matches!(err, FacetError::Invalid(SummaryError::Empty { .. })), "got {err:?}");
}
