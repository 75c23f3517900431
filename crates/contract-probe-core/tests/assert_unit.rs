// crates/contract-probe-core/tests/assert_unit.rs
// ============================================================================
// Module: Assertion Engine Unit Tests
// Description: Structural, emptiness, empty-body, and window assertions.
// Purpose: Pin the pass/fail semantics of every assertion rule.
// ============================================================================

//! ## Overview
//! Unit tests for the assertion engine over synthetic captured responses:
//! status checking against the installed expectation, document shape
//! parsing, scalar field equality, list emptiness classes, exactly-empty
//! bodies, and the timestamp format/window rules.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use contract_probe_core::ApiResponse;
use contract_probe_core::AssertionError;
use contract_probe_core::CallWindow;
use contract_probe_core::CreatedUser;
use contract_probe_core::ResponseSpecBuilder;
use contract_probe_core::UserPage;
use contract_probe_core::UserPayload;
use contract_probe_core::runtime::assert;
use time::macros::datetime;

/// Captures a response with the given status and body text.
fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse::capture(status, BTreeMap::new(), body.to_string())
}

// ============================================================================
// SECTION: Status
// ============================================================================

#[test]
fn status_matching_expectation_passes() {
    let spec = ResponseSpecBuilder::new().expect_status(200).build().unwrap();
    assert!(assert::check_status(&response(200, "{}"), &spec).is_ok());
}

#[test]
fn status_mismatch_is_a_hard_failure() {
    let spec = ResponseSpecBuilder::new().expect_status(200).build().unwrap();
    let err = assert::check_status(&response(404, "{}"), &spec).unwrap_err();
    assert_eq!(
        err,
        AssertionError::StatusMismatch {
            expected: 200,
            actual: 404
        }
    );
    assert_eq!(err.to_string(), "expected status 200, got 404");
}

// ============================================================================
// SECTION: Documents and Fields
// ============================================================================

#[test]
fn page_document_parses_and_matches() {
    let body = r#"{"page": 2, "data": [{"id": 7}]}"#;
    let page: UserPage = assert::parse_document(&response(200, body), "user page").unwrap();
    assert!(assert::check_page_number(&page, 2).is_ok());
}

#[test]
fn page_number_mismatch_reports_expected_and_actual() {
    let body = r#"{"page": 3, "data": []}"#;
    let page: UserPage = assert::parse_document(&response(200, body), "user page").unwrap();
    let err = assert::check_page_number(&page, 2).unwrap_err();
    assert_eq!(err.to_string(), "field `page`: expected `2`, got `3`");
}

#[test]
fn non_json_body_fails_shape_check() {
    let result: Result<UserPage, AssertionError> =
        assert::parse_document(&response(200, "not json"), "user page");
    assert!(matches!(result.unwrap_err(), AssertionError::Shape { .. }));
}

#[test]
fn missing_field_fails_shape_check() {
    let result: Result<UserPage, AssertionError> =
        assert::parse_document(&response(200, r#"{"data": []}"#), "user page");
    assert!(matches!(result.unwrap_err(), AssertionError::Shape { .. }));
}

#[test]
fn echo_check_is_case_sensitive() {
    let payload = UserPayload::new("Alex", "Tester");
    assert!(assert::check_echo("Alex", "Tester", &payload).is_ok());
    let err = assert::check_echo("alex", "Tester", &payload).unwrap_err();
    assert_eq!(err.to_string(), "field `name`: expected `Alex`, got `alex`");
}

#[test]
fn user_id_equality_is_exact() {
    assert!(assert::check_user_id(2, 2).is_ok());
    let err = assert::check_user_id(3, 2).unwrap_err();
    assert!(matches!(
        err,
        AssertionError::FieldMismatch {
            field: "data.id",
            ..
        }
    ));
}

// ============================================================================
// SECTION: Emptiness Classes
// ============================================================================

#[test]
fn empty_list_satisfies_expect_empty() {
    let page = UserPage {
        page: 99_999_999,
        data: vec![],
    };
    assert!(assert::check_list_emptiness(&page, true).is_ok());
}

#[test]
fn any_positive_length_satisfies_populated() {
    for len in [1_usize, 2, 6] {
        let page = UserPage {
            page: 2,
            data: vec![serde_json::json!({}); len],
        };
        assert!(assert::check_list_emptiness(&page, false).is_ok());
    }
}

#[test]
fn populated_list_violates_expect_empty() {
    let page = UserPage {
        page: 5,
        data: vec![serde_json::json!({})],
    };
    let err = assert::check_list_emptiness(&page, true).unwrap_err();
    assert_eq!(err.to_string(), "user list on page 5 should be empty, got 1 users");
}

#[test]
fn empty_list_violates_populated_expectation() {
    let page = UserPage {
        page: 2,
        data: vec![],
    };
    let err = assert::check_list_emptiness(&page, false).unwrap_err();
    assert_eq!(err.to_string(), "user list on page 2 should not be empty");
}

// ============================================================================
// SECTION: Empty Body
// ============================================================================

#[test]
fn empty_body_passes_delete_check() {
    assert!(assert::check_empty_body(&response(204, "")).is_ok());
}

#[test]
fn whitespace_body_is_not_empty() {
    let err = assert::check_empty_body(&response(204, " ")).unwrap_err();
    assert_eq!(
        err,
        AssertionError::BodyNotEmpty {
            len: 1
        }
    );
}

// ============================================================================
// SECTION: Timestamp Window
// ============================================================================

#[test]
fn timestamp_inside_window_passes() {
    let window = CallWindow::open_at(datetime!(2026-08-07 10:00:00.000 UTC))
        .close_at(datetime!(2026-08-07 10:00:01.000 UTC));
    assert!(
        assert::check_timestamp_window("createdAt", "2026-08-07T10:00:00.500Z", &window).is_ok()
    );
}

#[test]
fn timestamp_with_wrong_precision_is_a_format_failure() {
    let window = CallWindow::open_at(datetime!(2026-08-07 10:00:00.000 UTC))
        .close_at(datetime!(2026-08-07 10:00:01.000 UTC));
    let err =
        assert::check_timestamp_window("createdAt", "2026-08-07T10:00:00Z", &window).unwrap_err();
    assert!(matches!(
        err,
        AssertionError::Format {
            field: "createdAt",
            ..
        }
    ));
}

#[test]
fn timestamp_outside_window_is_a_window_violation() {
    let window = CallWindow::open_at(datetime!(2026-08-07 10:00:00.000 UTC))
        .close_at(datetime!(2026-08-07 10:00:01.000 UTC));
    let err = assert::check_timestamp_window("updatedAt", "2026-08-07T12:00:00.000Z", &window)
        .unwrap_err();
    assert!(matches!(
        err,
        AssertionError::WindowViolation {
            field: "updatedAt",
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("2026-08-07T12:00:00.000Z"), "{message}");
    assert!(message.contains("2026-08-07T09:59:00.000Z"), "{message}");
    assert!(message.contains("2026-08-07T10:01:00.000Z"), "{message}");
}

#[test]
fn created_user_document_round_trips_through_checks() {
    let body = r#"{"name": "Alex", "job": "Tester", "id": "712", "createdAt": "2026-08-07T10:00:00.250Z"}"#;
    let created: CreatedUser =
        assert::parse_document(&response(201, body), "created user").unwrap();
    let payload = UserPayload::new("Alex", "Tester");
    assert!(assert::check_echo(&created.name, &created.job, &payload).is_ok());
    let window = CallWindow::open_at(datetime!(2026-08-07 10:00:00.000 UTC))
        .close_at(datetime!(2026-08-07 10:00:01.000 UTC));
    assert!(assert::check_timestamp_window("createdAt", &created.created_at, &window).is_ok());
}
