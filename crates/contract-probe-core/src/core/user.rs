// crates/contract-probe-core/src/core/user.rs
// ============================================================================
// Module: Users Resource Wire Documents
// Description: Request payload and response documents for the users resource.
// Purpose: Provide typed views of the users API wire format for assertions.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The users resource exchanges a small set of JSON documents: a create or
//! update request carries `{name, job}`, a list response carries
//! `{page, data: [...]}`, a read response wraps one record under `data`, and
//! mutating responses echo the payload plus a server-generated timestamp.
//! Field names are serialized verbatim; timestamps keep their camelCase wire
//! names. Unknown response fields are ignored so the documents stay stable
//! as the resource grows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Request Payload
// ============================================================================

/// User payload sent as the request body for create and update calls.
///
/// # Invariants
/// - Value type without identity; field names are serialized verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    /// User name echoed back by the resource.
    pub name: String,
    /// User job title echoed back by the resource.
    pub job: String,
}

impl UserPayload {
    /// Creates a payload with the given name and job.
    #[must_use]
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

// ============================================================================
// SECTION: Response Documents
// ============================================================================

/// One user record inside list and read responses.
///
/// Only the identifier participates in assertions; the remaining record
/// fields stay opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned user identifier.
    pub id: u64,
}

/// A page of users returned by the list endpoint.
///
/// # Invariants
/// - `page` echoes the requested page number.
/// - `data` length is only classified as empty or non-empty, never counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    /// Page number echoed by the resource.
    pub page: u64,
    /// Records on this page; entries stay opaque to the assertion engine.
    pub data: Vec<Value>,
}

/// Envelope wrapping a single user record in a read response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The requested user record.
    pub data: UserRecord,
}

/// Response document for a successful create call.
///
/// # Invariants
/// - `created_at` is a server-generated timestamp in millisecond-precision
///   UTC wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    /// Echoed user name.
    pub name: String,
    /// Echoed user job title.
    pub job: String,
    /// Server-generated creation timestamp, verbatim wire text.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response document for a successful update call.
///
/// # Invariants
/// - `updated_at` is a server-generated timestamp in millisecond-precision
///   UTC wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedUser {
    /// Echoed user name.
    pub name: String,
    /// Echoed user job title.
    pub job: String,
    /// Server-generated update timestamp, verbatim wire text.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
