// crates/contract-probe-core/src/runtime/runner.rs
// ============================================================================
// Module: Parameterized Case Runner
// Description: Data-driven case evaluation with isolated failure capture.
// Purpose: Produce one independent report per case tuple, never halting a batch.
// Dependencies: crate::core, crate::interfaces, crate::runtime, serde, thiserror
// ============================================================================

//! ## Overview
//! The runner evaluates a fixed sequence of typed case tuples against a case
//! function, producing one independent result per tuple. Failure capture is
//! isolated at the case boundary: a failing case is recorded with its
//! diagnostic and the batch continues. No failure is ever swallowed to let a
//! batch pass; the aggregate report counts every outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::case::Case;
use crate::core::case::CaseDescriptor;
use crate::core::case::ScenarioKind;
use crate::core::spec::SpecError;
use crate::core::template::TemplateError;
use crate::interfaces::AttachmentSink;
use crate::interfaces::Transport;
use crate::interfaces::TransportError;
use crate::runtime::assert::AssertionError;
use crate::runtime::matrix;
use crate::runtime::scenarios;

// ============================================================================
// SECTION: Case Failure
// ============================================================================

/// One case's failure, spanning the full error taxonomy.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - A failure belongs to exactly one case and never affects another.
#[derive(Debug, Error)]
pub enum CaseFailure {
    /// Specification construction was invalid.
    #[error("specification error: {0}")]
    Spec(#[from] SpecError),
    /// Path template substitution mismatched.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    /// The HTTP layer failed; surfaced uncaught, never retried.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// A response assertion failed.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionError),
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Outcome of one evaluated case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every assertion held.
    Passed,
    /// The case failed; the rendered diagnostic identifies the cause.
    Failed {
        /// Human-readable failure diagnostic.
        reason: String,
    },
}

/// Report for one evaluated case.
///
/// # Invariants
/// - `descriptor` is reporting metadata only; it never drove control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Scenario the case belongs to.
    pub scenario: ScenarioKind,
    /// Reporting descriptor of the case.
    pub descriptor: CaseDescriptor,
    /// Evaluated outcome.
    pub outcome: CaseOutcome,
}

impl CaseReport {
    /// Returns true when the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }
}

/// Aggregate report over an entire run.
///
/// # Invariants
/// - `total == passed + failed` and `total == cases.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Number of evaluated cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Per-case reports in evaluation order.
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    /// Aggregates per-case reports into a run report.
    #[must_use]
    pub fn from_cases(cases: Vec<CaseReport>) -> Self {
        let passed = cases.iter().filter(|case| case.passed()).count();
        Self {
            total: cases.len(),
            passed,
            failed: cases.len() - passed,
            cases,
        }
    }

    /// Returns true when every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// SECTION: Case Runner
// ============================================================================

/// Evaluates a fixed sequence of case tuples with isolated failure capture.
///
/// Each tuple is evaluated independently; a failure is recorded in that
/// case's report and the remaining tuples still run.
pub fn run_cases<C: Case>(
    scenario: ScenarioKind,
    cases: &[C],
    case_fn: impl Fn(&C) -> Result<(), CaseFailure>,
) -> Vec<CaseReport> {
    cases
        .iter()
        .map(|case| {
            let outcome = match case_fn(case) {
                Ok(()) => CaseOutcome::Passed,
                Err(failure) => CaseOutcome::Failed {
                    reason: failure.to_string(),
                },
            };
            CaseReport {
                scenario,
                descriptor: case.descriptor(),
                outcome,
            }
        })
        .collect()
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Runs the selected scenarios of the canonical matrix.
///
/// Scenarios run in canonical order; cases within a scenario run in table
/// order. Both orders are reporting conveniences, not dependencies.
#[must_use]
pub fn run_scenarios(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    kinds: &[ScenarioKind],
) -> RunReport {
    let mut reports = Vec::new();
    for kind in kinds {
        match kind {
            ScenarioKind::List => {
                reports.extend(run_cases(*kind, &matrix::list_cases(), |case| {
                    scenarios::list_users(transport, sink, base_uri, case)
                }));
            }
            ScenarioKind::Read => {
                reports.extend(run_cases(*kind, &matrix::read_cases(), |case| {
                    scenarios::read_user(transport, sink, base_uri, case)
                }));
            }
            ScenarioKind::Create => {
                reports.extend(run_cases(*kind, &matrix::create_cases(), |case| {
                    scenarios::create_user(transport, sink, base_uri, case)
                }));
            }
            ScenarioKind::Update => {
                reports.extend(run_cases(*kind, &matrix::update_cases(), |case| {
                    scenarios::update_user(transport, sink, base_uri, case)
                }));
            }
            ScenarioKind::Delete => {
                reports.extend(run_cases(*kind, &matrix::delete_cases(), |case| {
                    scenarios::delete_user(transport, sink, base_uri, case)
                }));
            }
        }
    }
    RunReport::from_cases(reports)
}

/// Runs the full canonical matrix across all five scenarios.
#[must_use]
pub fn run_suite(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
) -> RunReport {
    run_scenarios(transport, sink, base_uri, &ScenarioKind::ALL)
}
