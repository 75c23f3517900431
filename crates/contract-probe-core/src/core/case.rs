// crates/contract-probe-core/src/core/case.rs
// ============================================================================
// Module: Scenario Cases
// Description: Typed parameter tuples and reporting descriptors per scenario.
// Purpose: Declare data-driven cases consumed once per run, never mutated.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A scenario is one parameterized, independently reportable test case
//! exercising one endpoint and its assertions. Each case type is an ordered
//! tuple of input parameters plus expected outcomes, constructed statically
//! before execution. Ownership, severity, and narrative description are
//! plain descriptor data attached for reporting; they never influence
//! control flow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::user::UserPayload;

// ============================================================================
// SECTION: Reporting Metadata
// ============================================================================

/// Case severity reported alongside outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failure blocks the resource contract.
    Critical,
    /// Failure degrades the resource contract.
    Normal,
    /// Failure is cosmetic.
    Minor,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "critical",
            Self::Normal => "normal",
            Self::Minor => "minor",
        };
        f.write_str(label)
    }
}

/// Reporting descriptor attached to every case.
///
/// # Invariants
/// - Pure reporting data; the runner never branches on descriptor fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDescriptor {
    /// Short case title shown in reports.
    pub title: String,
    /// Case severity.
    pub severity: Severity,
    /// One-line narrative of what the case verifies.
    pub narrative: String,
}

impl CaseDescriptor {
    /// Creates a descriptor with the given title, severity, and narrative.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        severity: Severity,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            severity,
            narrative: narrative.into(),
        }
    }
}

/// A scenario case that can describe itself for reporting.
pub trait Case {
    /// Returns the reporting descriptor for this case.
    fn descriptor(&self) -> CaseDescriptor;
}

// ============================================================================
// SECTION: Scenario Kinds
// ============================================================================

/// The five canonical scenarios covering the users CRUD surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Page listing with emptiness classification.
    List,
    /// Read by identifier with per-case expected status.
    Read,
    /// Create with echo and creation-timestamp window.
    Create,
    /// Update with echo and update-timestamp window.
    Update,
    /// Delete with empty-body check.
    Delete,
}

impl ScenarioKind {
    /// All scenario kinds in canonical execution order.
    pub const ALL: [Self; 5] = [Self::List, Self::Read, Self::Create, Self::Update, Self::Delete];
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::List => "list",
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Case Tuples
// ============================================================================

/// List scenario case: page number plus expected emptiness class.
///
/// # Invariants
/// - `expect_empty` is the boolean source of truth for the emptiness check;
///   there is no string indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCase {
    /// Page number to request.
    pub page: u64,
    /// True when the page must contain zero users.
    pub expect_empty: bool,
}

impl ListCase {
    /// Creates a list case.
    #[must_use]
    pub const fn new(page: u64, expect_empty: bool) -> Self {
        Self {
            page,
            expect_empty,
        }
    }
}

impl Case for ListCase {
    fn descriptor(&self) -> CaseDescriptor {
        let class = if self.expect_empty { "empty" } else { "populated" };
        CaseDescriptor::new(
            format!("list page {} ({class})", self.page),
            Severity::Critical,
            "user list on the requested page matches the expected emptiness class",
        )
    }
}

/// Read scenario case: identifier plus expected status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCase {
    /// User identifier to request.
    pub id: u64,
    /// Status code the response must carry.
    pub expected_status: u16,
}

impl ReadCase {
    /// Creates a read case.
    #[must_use]
    pub const fn new(id: u64, expected_status: u16) -> Self {
        Self {
            id,
            expected_status,
        }
    }
}

impl Case for ReadCase {
    fn descriptor(&self) -> CaseDescriptor {
        CaseDescriptor::new(
            format!("read user {} expecting {}", self.id, self.expected_status),
            Severity::Normal,
            "user data is returned for valid identifiers and absent otherwise",
        )
    }
}

/// Create scenario case: the payload to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCase {
    /// Payload submitted as the request body.
    pub payload: UserPayload,
}

impl CreateCase {
    /// Creates a create case.
    #[must_use]
    pub const fn new(payload: UserPayload) -> Self {
        Self {
            payload,
        }
    }
}

impl Case for CreateCase {
    fn descriptor(&self) -> CaseDescriptor {
        CaseDescriptor::new(
            format!("create user {}/{}", self.payload.name, self.payload.job),
            Severity::Normal,
            "created user echoes the payload and carries a fresh creation timestamp",
        )
    }
}

/// Update scenario case: the payload plus the target identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCase {
    /// Payload submitted as the request body.
    pub payload: UserPayload,
    /// User identifier to update.
    pub id: u64,
}

impl UpdateCase {
    /// Creates an update case.
    #[must_use]
    pub const fn new(payload: UserPayload, id: u64) -> Self {
        Self {
            payload,
            id,
        }
    }
}

impl Case for UpdateCase {
    fn descriptor(&self) -> CaseDescriptor {
        CaseDescriptor::new(
            format!("update user {} to {}/{}", self.id, self.payload.name, self.payload.job),
            Severity::Normal,
            "updated user echoes the payload and carries a fresh update timestamp",
        )
    }
}

/// Delete scenario case: the target identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCase {
    /// User identifier to delete.
    pub id: u64,
}

impl DeleteCase {
    /// Creates a delete case.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
        }
    }
}

impl Case for DeleteCase {
    fn descriptor(&self) -> CaseDescriptor {
        CaseDescriptor::new(
            format!("delete user {}", self.id),
            Severity::Normal,
            "deletion yields no content and an exactly empty body",
        )
    }
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
    fn list_descriptor_names_emptiness_class() {
        let populated = ListCase::new(2, false).descriptor();
        assert_eq!(populated.title, "list page 2 (populated)");
        let empty = ListCase::new(99_999_999, true).descriptor();
        assert_eq!(empty.title, "list page 99999999 (empty)");
    }

    #[test]
    fn list_cases_are_critical() {
        assert_eq!(ListCase::new(2, false).descriptor().severity, Severity::Critical);
    }

    #[test]
    fn scenario_kinds_render_lowercase() {
        let labels: Vec<String> = ScenarioKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["list", "read", "create", "update", "delete"]);
    }
}
