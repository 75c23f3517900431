// crates/contract-probe-core/src/runtime/assert.rs
// ============================================================================
// Module: Response Assertion Engine
// Description: Structural, emptiness, and timestamp-window response checks.
// Purpose: Convert captured responses into pass/fail outcomes with diagnostics.
// Dependencies: crate::core, crate::interfaces, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The assertion engine validates captured responses against the declared
//! expectations of a case: exact scalar equality on asserted fields,
//! emptiness classes for list sizes, exactly-empty bodies for deletions, and
//! the time-window rule for server-generated timestamps. Every failure
//! carries expected and actual values so a report reader can diagnose the
//! mismatch without replaying the call.
//!
//! The engine checks the installed [`ResponseSpec`] status expectation
//! exactly once per case; the executor never does. A status mismatch is a
//! hard failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::spec::ResponseSpec;
use crate::core::user::UserPage;
use crate::core::user::UserPayload;
use crate::core::window::ClosedWindow;
use crate::core::window::ServerTimestampError;
use crate::core::window::format_server_timestamp;
use crate::core::window::parse_server_timestamp;
use crate::interfaces::ApiResponse;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Assertion failures with expected-vs-actual diagnostics.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages identify expected and actual values for the report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssertionError {
    /// Response status differed from the installed expectation.
    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Status code declared by the response specification.
        expected: u16,
        /// Status code actually observed.
        actual: u16,
    },
    /// Response body did not match the expected document shape.
    #[error("response body does not match the expected {document} document: {reason}")]
    Shape {
        /// Name of the expected document.
        document: &'static str,
        /// Deserializer diagnostic.
        reason: String,
    },
    /// A scalar field differed from its expected value.
    #[error("field `{field}`: expected `{expected}`, got `{actual}`")]
    FieldMismatch {
        /// Asserted field name.
        field: &'static str,
        /// Expected rendering.
        expected: String,
        /// Actual rendering.
        actual: String,
    },
    /// The user list was expected to be empty but was not.
    #[error("user list on page {page} should be empty, got {len} users")]
    ListNotEmpty {
        /// Requested page number.
        page: u64,
        /// Observed list length.
        len: usize,
    },
    /// The user list was expected to be populated but was empty.
    #[error("user list on page {page} should not be empty")]
    ListEmpty {
        /// Requested page number.
        page: u64,
    },
    /// The response body was expected to be exactly empty.
    #[error("response body should be empty, got {len} bytes")]
    BodyNotEmpty {
        /// Observed body length in bytes.
        len: usize,
    },
    /// A server timestamp deviated from the fixed wire pattern.
    #[error("field `{field}`: {source}")]
    Format {
        /// Asserted timestamp field name.
        field: &'static str,
        /// Parse failure detail.
        source: ServerTimestampError,
    },
    /// A server timestamp fell outside the call window.
    #[error("field `{field}`: timestamp {timestamp} outside the window {lower} ..= {upper}")]
    WindowViolation {
        /// Asserted timestamp field name.
        field: &'static str,
        /// Parsed timestamp in wire form.
        timestamp: String,
        /// Inclusive window lower bound in wire form.
        lower: String,
        /// Inclusive window upper bound in wire form.
        upper: String,
    },
}

// ============================================================================
// SECTION: Structural Checks
// ============================================================================

/// Checks the response status against the installed expectation.
///
/// # Errors
///
/// Returns [`AssertionError::StatusMismatch`] when the observed status
/// differs from the specification.
pub fn check_status(response: &ApiResponse, spec: &ResponseSpec) -> Result<(), AssertionError> {
    if response.status == spec.expected_status() {
        Ok(())
    } else {
        Err(AssertionError::StatusMismatch {
            expected: spec.expected_status(),
            actual: response.status,
        })
    }
}

/// Deserializes the response body into a typed document.
///
/// # Errors
///
/// Returns [`AssertionError::Shape`] when the body is missing or does not
/// deserialize into the document.
pub fn parse_document<T: DeserializeOwned>(
    response: &ApiResponse,
    document: &'static str,
) -> Result<T, AssertionError> {
    let Some(body) = &response.body else {
        return Err(AssertionError::Shape {
            document,
            reason: "body is not a json document".to_string(),
        });
    };
    serde_json::from_value(body.clone()).map_err(|err| AssertionError::Shape {
        document,
        reason: err.to_string(),
    })
}

/// Checks exact equality of the echoed page number.
///
/// # Errors
///
/// Returns [`AssertionError::FieldMismatch`] when the page differs.
pub fn check_page_number(page: &UserPage, expected: u64) -> Result<(), AssertionError> {
    check_u64("page", expected, page.page)
}

/// Classifies the user list length as empty or populated.
///
/// The engine asserts only the emptiness class, never an exact count.
///
/// # Errors
///
/// Returns [`AssertionError::ListNotEmpty`] or [`AssertionError::ListEmpty`]
/// when the observed class differs from the declared one.
pub fn check_list_emptiness(page: &UserPage, expect_empty: bool) -> Result<(), AssertionError> {
    let len = page.data.len();
    if expect_empty && len > 0 {
        return Err(AssertionError::ListNotEmpty {
            page: page.page,
            len,
        });
    }
    if !expect_empty && len == 0 {
        return Err(AssertionError::ListEmpty {
            page: page.page,
        });
    }
    Ok(())
}

/// Checks exact equality of a returned user identifier.
///
/// # Errors
///
/// Returns [`AssertionError::FieldMismatch`] when the identifier differs.
pub fn check_user_id(actual: u64, expected: u64) -> Result<(), AssertionError> {
    check_u64("data.id", expected, actual)
}

/// Checks that a mutating response echoes the submitted payload.
///
/// String comparison is case-sensitive and exact.
///
/// # Errors
///
/// Returns [`AssertionError::FieldMismatch`] on the first differing field.
pub fn check_echo(name: &str, job: &str, payload: &UserPayload) -> Result<(), AssertionError> {
    check_str("name", &payload.name, name)?;
    check_str("job", &payload.job, job)?;
    Ok(())
}

/// Checks that the response body is exactly empty.
///
/// # Errors
///
/// Returns [`AssertionError::BodyNotEmpty`] when any body bytes were
/// received.
pub fn check_empty_body(response: &ApiResponse) -> Result<(), AssertionError> {
    if response.raw_text.is_empty() {
        Ok(())
    } else {
        Err(AssertionError::BodyNotEmpty {
            len: response.raw_text.len(),
        })
    }
}

// ============================================================================
// SECTION: Timestamp Window Check
// ============================================================================

/// Validates a server timestamp against the wire pattern and call window.
///
/// # Errors
///
/// Returns [`AssertionError::Format`] when the text deviates from the fixed
/// millisecond-precision UTC pattern, or
/// [`AssertionError::WindowViolation`] when the parsed instant falls outside
/// the closed window.
pub fn check_timestamp_window(
    field: &'static str,
    raw: &str,
    window: &ClosedWindow,
) -> Result<(), AssertionError> {
    let parsed = parse_server_timestamp(raw).map_err(|source| AssertionError::Format {
        field,
        source,
    })?;
    if window.contains(parsed) {
        Ok(())
    } else {
        Err(AssertionError::WindowViolation {
            field,
            timestamp: raw.to_string(),
            lower: format_server_timestamp(window.lower()),
            upper: format_server_timestamp(window.upper()),
        })
    }
}

// ============================================================================
// SECTION: Scalar Helpers
// ============================================================================

/// Compares two integers under a named field.
fn check_u64(field: &'static str, expected: u64, actual: u64) -> Result<(), AssertionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionError::FieldMismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Compares two strings under a named field, case-sensitively.
fn check_str(field: &'static str, expected: &str, actual: &str) -> Result<(), AssertionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionError::FieldMismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
