// crates/contract-probe-transport/src/http.rs
// ============================================================================
// Module: Blocking HTTP Transport
// Description: reqwest-based synchronous transport with strict limits.
// Purpose: Perform one HTTP exchange per call and capture the full response.
// Dependencies: contract-probe-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The HTTP transport executes prepared requests over a blocking client.
//! Redirects are disabled so assertions observe the first response; the
//! timeout applies to the full request lifecycle; response bodies are read
//! against a hard byte limit with truncation detection. Cleartext HTTP is
//! rejected unless explicitly allowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Read;
use std::time::Duration;

use contract_probe_core::ApiRequest;
use contract_probe_core::ApiResponse;
use contract_probe_core::Method;
use contract_probe_core::Transport;
use contract_probe_core::TransportError;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde::Deserialize;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the blocking HTTP transport.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` URLs.
/// - `max_response_bytes` is enforced as a hard upper bound on bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpTransportConfig {
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: 10_000,
            max_response_bytes: 1024 * 1024,
            user_agent: "contract-probe/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Transport Implementation
// ============================================================================

/// Blocking HTTP transport over a shared client.
///
/// # Invariants
/// - Redirects are not followed; 3xx responses are captured as-is.
/// - Requests are never retried.
pub struct HttpTransport {
    /// Transport configuration, including limits and policy.
    config: HttpTransportConfig,
    /// Shared blocking client used for outbound requests.
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::ClientBuild {
                reason: err.to_string(),
            })?;
        Ok(Self {
            config,
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        if request.url.scheme() == "http" && !self.config.allow_http {
            return Err(TransportError::Request {
                url: request.url.to_string(),
                reason: "cleartext http is not allowed".to_string(),
            });
        }

        let method = map_method(request.method);
        let mut builder = self.client.request(method, request.url.clone());
        builder = builder.headers(build_headers(&request.headers, request.url.as_str())?);
        if let Some(body) = &request.body {
            let text = serde_json::to_string(body).map_err(|err| TransportError::InvalidBody {
                reason: err.to_string(),
            })?;
            builder = builder.body(text);
        }

        let response = builder.send().map_err(|err| TransportError::Request {
            url: request.url.to_string(),
            reason: err.to_string(),
        })?;

        let status = response.status().as_u16();
        let headers = capture_headers(response.headers());
        let raw_text = read_body_limited(response, self.config.max_response_bytes)?;
        Ok(ApiResponse::capture(status, headers, raw_text))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps the core method onto the client's method type.
fn map_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Builds the outbound header map from the prepared request.
fn build_headers(
    headers: &BTreeMap<String, String>,
    url: &str,
) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| TransportError::Request {
                url: url.to_string(),
                reason: format!("invalid header name `{name}`: {err}"),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|err| TransportError::Request {
                url: url.to_string(),
                reason: format!("invalid header value for `{name}`: {err}"),
            })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Captures response headers into an ordered map; non-text values are
/// rendered as an opaque marker.
fn capture_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut captured = BTreeMap::new();
    for (name, value) in headers {
        let rendered = value.to_str().unwrap_or("<binary>").to_string();
        captured.insert(name.as_str().to_string(), rendered);
    }
    captured
}

/// Reads the response body while enforcing a byte limit.
///
/// A body larger than the limit fails closed; a body shorter than the
/// advertised content length is reported as truncated.
fn read_body_limited(
    response: reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<String, TransportError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(TransportError::ResponseTooLarge {
            limit_bytes: max_bytes,
        });
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|err| TransportError::BodyRead {
        reason: err.to_string(),
    })?;
    if buf.len() > max_bytes {
        return Err(TransportError::ResponseTooLarge {
            limit_bytes: max_bytes,
        });
    }
    if let Some(expected) = expected_len
        && u64::try_from(buf.len()).unwrap_or(u64::MAX) < expected
    {
        return Err(TransportError::BodyRead {
            reason: "response body truncated".to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
