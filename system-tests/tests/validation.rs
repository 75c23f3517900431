// system-tests/tests/validation.rs
// ============================================================================
// Module: End-to-End Failure Classification
// Description: Misbehaving servers produce the expected failure classes.
// Purpose: Verify assertions catch real wire-level contract violations.
// ============================================================================

//! ## Overview
//! Runs scenarios against misbehaving server modes over real HTTP and checks
//! that each broken contract rule surfaces as its own failure class while
//! unrelated cases keep passing: stale timestamps violate the call window,
//! distorted echoes fail field equality case-sensitively, chatty deletes
//! fail the empty-body rule, and an unreachable target surfaces transport
//! errors per case.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

use contract_probe_core::ScenarioKind;
use contract_probe_core::run_scenarios;
use contract_probe_core::run_suite;
use contract_probe_report::MemorySink;
use contract_probe_transport::HttpTransport;
use contract_probe_transport::HttpTransportConfig;
use system_tests::FakeUsersServer;
use system_tests::ServerMode;

/// Creates a transport that may talk cleartext HTTP to the local server.
fn local_transport() -> HttpTransport {
    HttpTransport::new(HttpTransportConfig {
        allow_http: true,
        ..HttpTransportConfig::default()
    })
    .unwrap()
}

#[test]
fn stale_timestamps_fail_only_the_mutating_scenarios() {
    let server = FakeUsersServer::start(ServerMode::StaleTimestamps);
    let transport = local_transport();
    let sink = MemorySink::new();

    let report = run_suite(&transport, &sink, server.base_url());

    assert_eq!(report.total, 9);
    assert_eq!(report.failed, 3, "{:?}", report.cases);
    for case in &report.cases {
        match case.scenario {
            ScenarioKind::Create | ScenarioKind::Update => {
                assert!(!case.passed(), "{case:?}");
            }
            ScenarioKind::List | ScenarioKind::Read | ScenarioKind::Delete => {
                assert!(case.passed(), "{case:?}");
            }
        }
    }
    let failed_reasons: Vec<&str> = report
        .cases
        .iter()
        .filter_map(|case| match &case.outcome {
            contract_probe_core::CaseOutcome::Failed {
                reason,
            } => Some(reason.as_str()),
            contract_probe_core::CaseOutcome::Passed => None,
        })
        .collect();
    assert!(failed_reasons.iter().all(|reason| reason.contains("outside the window")));
}

#[test]
fn distorted_echo_fails_case_sensitive_equality() {
    let server = FakeUsersServer::start(ServerMode::LowercaseEcho);
    let transport = local_transport();
    let sink = MemorySink::new();

    let report = run_scenarios(
        &transport,
        &sink,
        server.base_url(),
        &[ScenarioKind::Create, ScenarioKind::Update],
    );

    assert_eq!(report.total, 3);
    assert_eq!(report.failed, 3, "{:?}", report.cases);
    for case in &report.cases {
        if let contract_probe_core::CaseOutcome::Failed {
            reason,
        } = &case.outcome
        {
            assert!(reason.contains("field `name`"), "{reason}");
            assert!(reason.contains("expected `Alex`, got `alex`"), "{reason}");
        }
    }
}

#[test]
fn chatty_delete_fails_the_empty_body_rule() {
    let server = FakeUsersServer::start(ServerMode::ChattyDelete);
    let transport = local_transport();
    let sink = MemorySink::new();

    let report = run_scenarios(&transport, &sink, server.base_url(), &[ScenarioKind::Delete]);

    assert_eq!(report.total, 3);
    assert_eq!(report.failed, 3);
    for case in &report.cases {
        if let contract_probe_core::CaseOutcome::Failed {
            reason,
        } = &case.outcome
        {
            assert!(reason.contains("should be empty"), "{reason}");
        }
    }
}

#[test]
fn unreachable_target_fails_every_case_with_a_transport_error() {
    let transport = local_transport();
    let sink = MemorySink::new();

    let report = run_scenarios(
        &transport,
        &sink,
        "http://127.0.0.1:1/",
        &[ScenarioKind::Read],
    );

    assert_eq!(report.total, 2);
    assert_eq!(report.failed, 2);
    for case in &report.cases {
        if let contract_probe_core::CaseOutcome::Failed {
            reason,
        } = &case.outcome
        {
            assert!(reason.contains("transport error"), "{reason}");
        }
    }
}
