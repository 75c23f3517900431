// crates/contract-probe-transport/tests/http_transport_unit.rs
// ============================================================================
// Module: HTTP Transport Unit Tests
// Description: Exchange capture, limits, and policy checks over a local server.
// Purpose: Pin the transport contract without touching the real resource.
// ============================================================================

//! ## Overview
//! Unit tests for the blocking transport against local `tiny_http` servers:
//! status and body capture, verbatim JSON body transmission, header
//! forwarding, redirect non-following, cleartext policy, size limits, and
//! error surfacing for unreachable endpoints.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::thread;

use contract_probe_core::ApiRequest;
use contract_probe_core::Method;
use contract_probe_core::Transport;
use contract_probe_core::TransportError;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

use contract_probe_transport::HttpTransport;
use contract_probe_transport::HttpTransportConfig;

/// Creates a transport that accepts cleartext HTTP to the local server.
fn local_transport() -> HttpTransport {
    HttpTransport::new(HttpTransportConfig {
        allow_http: true,
        ..HttpTransportConfig::default()
    })
    .unwrap()
}

/// Creates a transport with a custom response size limit.
fn size_limited_transport(max_bytes: usize) -> HttpTransport {
    HttpTransport::new(HttpTransportConfig {
        allow_http: true,
        max_response_bytes: max_bytes,
        ..HttpTransportConfig::default()
    })
    .unwrap()
}

/// Builds a GET request for the given URL text.
fn get_request(url: &str) -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        url: Url::parse(url).unwrap(),
        headers: BTreeMap::new(),
        body: None,
    }
}

// ============================================================================
// SECTION: Exchange Capture
// ============================================================================

#[test]
fn captures_status_and_parsed_body() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string(r#"{"page": 2, "data": []}"#));
        }
    });

    let transport = local_transport();
    let response = transport.execute(&get_request(&format!("http://{addr}/api/users"))).unwrap();
    handle.join().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!({"page": 2, "data": []})));
    assert_eq!(response.raw_text, r#"{"page": 2, "data": []}"#);
}

#[test]
fn sends_json_body_verbatim() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut received = String::new();
            let _ = std::io::Read::read_to_string(request.as_reader(), &mut received);
            let _ = request.respond(Response::from_string(received).with_status_code(201));
        }
    });

    let transport = local_transport();
    let request = ApiRequest {
        method: Method::Post,
        url: Url::parse(&format!("http://{addr}/api/users/")).unwrap(),
        headers: BTreeMap::new(),
        body: Some(json!({"name": "Alex", "job": "Tester"})),
    };
    let response = transport.execute(&request).unwrap();
    handle.join().unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, Some(json!({"name": "Alex", "job": "Tester"})));
}

#[test]
fn forwards_prepared_headers() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let echoed = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("content-type"))
                .map(|header| header.value.as_str().to_string())
                .unwrap_or_default();
            let _ = request.respond(Response::from_string(echoed));
        }
    });

    let transport = local_transport();
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    let request = ApiRequest {
        method: Method::Get,
        url: Url::parse(&format!("http://{addr}/api/users")).unwrap(),
        headers,
        body: None,
    };
    let response = transport.execute(&request).unwrap();
    handle.join().unwrap();

    assert_eq!(response.raw_text, "application/json");
}

#[test]
fn captures_response_headers() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let header = Header::from_bytes(&b"x-request-id"[..], &b"42"[..]).unwrap();
            let _ = request.respond(Response::from_string("{}").with_header(header));
        }
    });

    let transport = local_transport();
    let response = transport.execute(&get_request(&format!("http://{addr}/"))).unwrap();
    handle.join().unwrap();

    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("42"));
}

#[test]
fn empty_body_stays_empty() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::empty(204));
        }
    });

    let transport = local_transport();
    let response = transport.execute(&get_request(&format!("http://{addr}/api/users/2"))).unwrap();
    handle.join().unwrap();

    assert_eq!(response.status, 204);
    assert!(response.raw_text.is_empty());
    assert_eq!(response.body, None);
}

// ============================================================================
// SECTION: Policy
// ============================================================================

#[test]
fn rejects_cleartext_when_disallowed() {
    let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
    let err = transport.execute(&get_request("http://127.0.0.1:1/")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("cleartext http is not allowed"), "{message}");
}

#[test]
fn does_not_follow_redirects() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let header = Header::from_bytes(&b"location"[..], &b"/elsewhere"[..]).unwrap();
            let _ = request.respond(Response::empty(302).with_header(header));
        }
    });

    let transport = local_transport();
    let response = transport.execute(&get_request(&format!("http://{addr}/"))).unwrap();
    handle.join().unwrap();

    assert_eq!(response.status, 302);
    assert_eq!(response.headers.get("location").map(String::as_str), Some("/elsewhere"));
}

// ============================================================================
// SECTION: Limits and Failures
// ============================================================================

#[test]
fn rejects_bodies_over_the_size_limit() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string("x".repeat(2048)));
        }
    });

    let transport = size_limited_transport(1024);
    let err = transport.execute(&get_request(&format!("http://{addr}/"))).unwrap_err();
    handle.join().unwrap();

    assert!(matches!(
        err,
        TransportError::ResponseTooLarge {
            limit_bytes: 1024
        }
    ));
}

#[test]
fn accepts_bodies_at_the_exact_size_limit() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string("x".repeat(1024)));
        }
    });

    let transport = size_limited_transport(1024);
    let response = transport.execute(&get_request(&format!("http://{addr}/"))).unwrap();
    handle.join().unwrap();

    assert_eq!(response.raw_text.len(), 1024);
}

#[test]
fn surfaces_connection_failures_uncaught() {
    let transport = local_transport();
    let err = transport.execute(&get_request("http://127.0.0.1:1/")).unwrap_err();
    assert!(matches!(err, TransportError::Request { .. }));
}
