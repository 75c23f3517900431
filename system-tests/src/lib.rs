// system-tests/src/lib.rs
// ============================================================================
// Module: System Test Harness
// Description: In-process fake users API served over real HTTP.
// Purpose: Drive the full suite end-to-end without the external resource.
// Dependencies: contract-probe-core, serde_json, time, tiny_http
// ============================================================================

//! ## Overview
//! A fake users API speaking the resource's wire contract over a local
//! `tiny_http` server. The faithful mode mirrors the real resource: two
//! populated pages of six users, reads for known identifiers, created and
//! updated echoes with fresh millisecond-precision UTC timestamps, and
//! empty delete bodies. Misbehaving modes break exactly one contract rule
//! each so suites can observe specific failure classes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use contract_probe_core::format_server_timestamp;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Server Modes
// ============================================================================

/// Behavior of the fake users API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    /// Mirrors the real resource contract.
    Faithful,
    /// Returns timestamps far outside any call window.
    StaleTimestamps,
    /// Echoes payload strings lowercased.
    LowercaseEcho,
    /// Returns a body on delete.
    ChattyDelete,
}

// ============================================================================
// SECTION: Fake Server
// ============================================================================

/// An in-process users API bound to a loopback port.
///
/// # Invariants
/// - The server answers until dropped; shutdown joins the worker thread.
pub struct FakeUsersServer {
    /// Base URL of the running server, with a trailing slash.
    base_url: String,
    /// Underlying HTTP server handle used for shutdown.
    server: Arc<Server>,
    /// Worker thread draining incoming requests.
    worker: Option<JoinHandle<()>>,
}

impl FakeUsersServer {
    /// Starts a fake users API in the given mode.
    ///
    /// # Panics
    ///
    /// Panics when no loopback port can be bound; system tests cannot
    /// proceed without one.
    #[must_use]
    #[allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test harness startup failures must abort the suite."
    )]
    pub fn start(mode: ServerMode) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind loopback"));
        let addr = server.server_addr().to_ip().expect("loopback addr");
        let base_url = format!("http://{addr}/");
        let worker_server = Arc::clone(&server);
        let worker = thread::spawn(move || {
            for request in worker_server.incoming_requests() {
                handle(request, mode);
            }
        });
        Self {
            base_url,
            server,
            worker: Some(worker),
        }
    }

    /// Returns the base URL of the running server.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for FakeUsersServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// ============================================================================
// SECTION: Routing
// ============================================================================

/// Routes one request to the contract response for the mode.
fn handle(mut request: Request, mode: ServerMode) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let (path, query) = split_url(&url);

    let mut body_text = String::new();
    let _ = request.as_reader().read_to_string(&mut body_text);
    let sent: Value = serde_json::from_str(&body_text).unwrap_or(Value::Null);

    let (status, body) = match (method.as_str(), path) {
        ("GET", "/api/users") => list_response(&query),
        ("GET", other) if other.starts_with("/api/users/") => read_response(other),
        ("POST", _) => mutate_response(&sent, "createdAt", mode, 201),
        ("PUT", _) => mutate_response(&sent, "updatedAt", mode, 200),
        ("DELETE", _) => delete_response(mode),
        _ => (404, Some(json!({}))),
    };

    respond(request, status, body);
}

/// Splits a request URL into path and raw query.
fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Extracts the requested page number from the query string.
fn page_number(query: Option<&str>) -> u64 {
    query
        .into_iter()
        .flat_map(|raw| raw.split('&'))
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
        .unwrap_or(1)
}

/// Builds the list response: pages 1 and 2 carry six users each.
fn list_response(query: &Option<&str>) -> (u16, Option<Value>) {
    let page = page_number(*query);
    let data: Vec<Value> = if page <= 2 {
        (1_u64 ..= 6).map(|offset| json!({"id": (page - 1) * 6 + offset})).collect()
    } else {
        Vec::new()
    };
    (200, Some(json!({"page": page, "per_page": 6, "total": 12, "data": data})))
}

/// Builds the read response: identifiers 1..=12 exist.
fn read_response(path: &str) -> (u16, Option<Value>) {
    let id: Option<u64> = path.trim_start_matches("/api/users/").parse().ok();
    match id {
        Some(id) if (1 ..= 12).contains(&id) => {
            (200, Some(json!({"data": {"id": id, "email": format!("user{id}@users.test")}})))
        }
        _ => (404, Some(json!({}))),
    }
}

/// Builds the create/update response echoing the payload with a timestamp.
fn mutate_response(sent: &Value, field: &str, mode: ServerMode, status: u16) -> (u16, Option<Value>) {
    let stamp = match mode {
        ServerMode::StaleTimestamps => "2020-01-01T00:00:00.000Z".to_string(),
        _ => format_server_timestamp(OffsetDateTime::now_utc()),
    };
    let name = echo_field(sent, "name", mode);
    let job = echo_field(sent, "job", mode);
    let mut body = json!({"name": name, "job": job, field: stamp});
    if field == "createdAt"
        && let Some(object) = body.as_object_mut()
    {
        object.insert("id".to_string(), json!("712"));
    }
    (status, Some(body))
}

/// Echoes one payload field, applying the mode's distortion.
fn echo_field(sent: &Value, field: &str, mode: ServerMode) -> String {
    let value = sent[field].as_str().unwrap_or_default();
    if mode == ServerMode::LowercaseEcho { value.to_lowercase() } else { value.to_string() }
}

/// Builds the delete response for the mode.
fn delete_response(mode: ServerMode) -> (u16, Option<Value>) {
    if mode == ServerMode::ChattyDelete {
        (204, Some(json!({"deleted": true})))
    } else {
        (204, None)
    }
}

/// Sends the response with a JSON content type when a body is present.
fn respond(request: Request, status: u16, body: Option<Value>) {
    match body {
        Some(body) => {
            let response = Response::from_string(body.to_string()).with_status_code(status);
            let response = match Header::from_bytes(&b"content-type"[..], &b"application/json"[..])
            {
                Ok(header) => response.with_header(header),
                Err(()) => response,
            };
            let _ = request.respond(response);
        }
        None => {
            let _ = request.respond(Response::empty(status));
        }
    }
}
