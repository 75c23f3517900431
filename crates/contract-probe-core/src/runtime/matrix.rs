// crates/contract-probe-core/src/runtime/matrix.rs
// ============================================================================
// Module: Canonical Scenario Matrix
// Description: Static case tables driving the data-driven scenarios.
// Purpose: Declare the parameter tuples evaluated on every suite run.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The matrix is a fixed, statically declared sequence of parameter tuples
//! per scenario. Tables are constructed fresh for each run, consumed once,
//! and never mutated. Cases are independent: any evaluation order yields
//! the same per-case outcomes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::case::CreateCase;
use crate::core::case::DeleteCase;
use crate::core::case::ListCase;
use crate::core::case::ReadCase;
use crate::core::case::UpdateCase;
use crate::core::user::UserPayload;

// ============================================================================
// SECTION: Case Tables
// ============================================================================

/// List cases: a populated page and a page far past the resource's end.
#[must_use]
pub fn list_cases() -> Vec<ListCase> {
    vec![ListCase::new(2, false), ListCase::new(99_999_999, true)]
}

/// Read cases: an existing identifier and a missing one.
#[must_use]
pub fn read_cases() -> Vec<ReadCase> {
    vec![ReadCase::new(2, 200), ReadCase::new(23, 404)]
}

/// Create cases: one canonical payload.
#[must_use]
pub fn create_cases() -> Vec<CreateCase> {
    vec![CreateCase::new(UserPayload::new("Alex", "Tester"))]
}

/// Update cases: same target updated with two payload variants.
#[must_use]
pub fn update_cases() -> Vec<UpdateCase> {
    vec![
        UpdateCase::new(UserPayload::new("Alex", "Tester"), 2),
        UpdateCase::new(UserPayload::new("Alex", "Tester2"), 2),
    ]
}

/// Delete cases: three distinct identifiers.
#[must_use]
pub fn delete_cases() -> Vec<DeleteCase> {
    vec![DeleteCase::new(2), DeleteCase::new(3), DeleteCase::new(4)]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use super::*;

    #[test]
    fn list_table_covers_both_emptiness_classes() {
        let cases = list_cases();
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().any(|case| case.expect_empty));
        assert!(cases.iter().any(|case| !case.expect_empty));
    }

    #[test]
    fn read_table_covers_success_and_missing() {
        let cases = read_cases();
        assert_eq!(cases, vec![ReadCase::new(2, 200), ReadCase::new(23, 404)]);
    }

    #[test]
    fn update_table_reuses_the_same_target() {
        let cases = update_cases();
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|case| case.id == 2));
    }

    #[test]
    fn delete_table_lists_distinct_identifiers() {
        let cases = delete_cases();
        let ids: Vec<u64> = cases.iter().map(|case| case.id).collect();
        assert_eq!(ids, [2, 3, 4]);
    }
}
