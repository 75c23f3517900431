// crates/contract-probe-core/src/runtime/executor.rs
// ============================================================================
// Module: Request Executor
// Description: Verb-per-operation request issuing under installed specs.
// Purpose: Prepare, send, and record one HTTP call per CRUD operation.
// Dependencies: crate::core, crate::interfaces, serde_json, url
// ============================================================================

//! ## Overview
//! The executor issues one synchronous HTTP call per CRUD verb against the
//! users resource. For each operation it expands the endpoint path template,
//! serializes the body with verbatim field names, resolves the full URL
//! against the installed base URI, applies the specification's content type
//! and default headers, performs the call through the transport, and
//! forwards the raw response body to the attachment sink.
//!
//! The executor never asserts: the installed status-code expectation is
//! declarative metadata checked by the assertion engine, and transport
//! failures propagate uncaught without retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::core::spec::SpecError;
use crate::core::spec::Specs;
use crate::core::template::expand_template;
use crate::core::user::UserPayload;
use crate::interfaces::ApiRequest;
use crate::interfaces::ApiResponse;
use crate::interfaces::AttachmentSink;
use crate::interfaces::Method;
use crate::interfaces::Transport;
use crate::interfaces::TransportError;
use crate::runtime::runner::CaseFailure;

// ============================================================================
// SECTION: Endpoint Templates
// ============================================================================

/// Path template for the users listing endpoint.
const USERS_PATH: &str = "api/users";

/// Path template for a single user endpoint.
const USER_BY_ID_PATH: &str = "api/users/{id}";

/// Path template for the create endpoint; the trailing slash is part of the
/// resource contract.
const USERS_CREATE_PATH: &str = "api/users/";

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Issues requests for one scenario case under an installed spec pair.
///
/// # Invariants
/// - Borrows its collaborators; owns no connection state of its own.
/// - Attachment delivery is fire-and-forget and never fails the case.
pub struct Executor<'a> {
    /// Transport performing the HTTP exchange.
    transport: &'a dyn Transport,
    /// Sink receiving raw response bodies.
    sink: &'a dyn AttachmentSink,
    /// Installed request/response specification pair.
    specs: &'a Specs,
}

impl<'a> Executor<'a> {
    /// Creates an executor over the given collaborators and specs.
    #[must_use]
    pub const fn new(
        transport: &'a dyn Transport,
        sink: &'a dyn AttachmentSink,
        specs: &'a Specs,
    ) -> Self {
        Self {
            transport,
            sink,
            specs,
        }
    }

    /// Fetches one page of the users listing.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] on template, URL, or transport failures.
    pub fn list_users(&self, page: u64) -> Result<ApiResponse, CaseFailure> {
        let query = vec![("page".to_string(), page.to_string())];
        self.call(Method::Get, USERS_PATH, &BTreeMap::new(), &query, None)
    }

    /// Fetches one user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] on template, URL, or transport failures.
    pub fn user_by_id(&self, id: u64) -> Result<ApiResponse, CaseFailure> {
        let params = path_params(&[("id", id)]);
        self.call(Method::Get, USER_BY_ID_PATH, &params, &[], None)
    }

    /// Creates a user from the payload.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] on template, URL, serialization, or transport
    /// failures.
    pub fn create_user(&self, payload: &UserPayload) -> Result<ApiResponse, CaseFailure> {
        let body = serialize_payload(payload)?;
        self.call(Method::Post, USERS_CREATE_PATH, &BTreeMap::new(), &[], Some(body))
    }

    /// Updates a user with the payload.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] on template, URL, serialization, or transport
    /// failures.
    pub fn update_user(&self, id: u64, payload: &UserPayload) -> Result<ApiResponse, CaseFailure> {
        let params = path_params(&[("id", id)]);
        let body = serialize_payload(payload)?;
        self.call(Method::Put, USER_BY_ID_PATH, &params, &[], Some(body))
    }

    /// Deletes a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CaseFailure`] on template, URL, or transport failures.
    pub fn delete_user(&self, id: u64) -> Result<ApiResponse, CaseFailure> {
        let params = path_params(&[("id", id)]);
        self.call(Method::Delete, USER_BY_ID_PATH, &params, &[], None)
    }

    /// Prepares, sends, and records one call.
    fn call(
        &self,
        method: Method,
        template: &str,
        params: &BTreeMap<String, String>,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<ApiResponse, CaseFailure> {
        let path = expand_template(template, params)?;
        let url = self.resolve(&path, query)?;
        let request = ApiRequest {
            method,
            url,
            headers: self.headers(),
            body,
        };
        let response = self.transport.execute(&request)?;
        let label = format!("{method} {}", request.url);
        let _ = self.sink.attach(&label, &response.raw_text);
        Ok(response)
    }

    /// Resolves the expanded path and query against the installed base URI.
    fn resolve(&self, path: &str, query: &[(String, String)]) -> Result<Url, SpecError> {
        let mut url =
            self.specs.request.base_uri().join(path).map_err(|err| SpecError::PathRejected {
                path: path.to_string(),
                reason: err.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Builds the header map from the installed request specification.
    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.specs.request.default_headers().clone();
        headers
            .insert("content-type".to_string(), self.specs.request.content_type().mime().to_string());
        headers
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a path-parameter map from integer values.
fn path_params(pairs: &[(&str, u64)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(name, value)| ((*name).to_string(), value.to_string())).collect()
}

/// Serializes a payload body with verbatim field names.
fn serialize_payload(payload: &UserPayload) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(|err| TransportError::InvalidBody {
        reason: err.to_string(),
    })
}
