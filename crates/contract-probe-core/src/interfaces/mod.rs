// crates/contract-probe-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contract Probe Interfaces
// Description: Backend-agnostic interfaces for transport and report delivery.
// Purpose: Define the contract surfaces used by the Contract Probe runtime.
// Dependencies: crate::core, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Interfaces define how the harness reaches the network and the report
//! store without embedding client-specific details. The runtime depends only
//! on these contracts: a [`Transport`] executes one prepared request and
//! returns the captured response; an [`AttachmentSink`] receives raw
//! response bodies for reporting. Implementations must surface failures
//! instead of retrying; assertions must observe the real, unretried outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Request Exchange
// ============================================================================

/// HTTP methods used by the users CRUD surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Retrieve a listing or a record.
    Get,
    /// Create a record.
    Post,
    /// Replace a record.
    Put,
    /// Remove a record.
    Delete,
}

impl Method {
    /// Returns the wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully prepared HTTP request handed to the transport.
///
/// # Invariants
/// - `url` is absolute with path and query parameters already substituted;
///   the transport performs no further templating.
/// - `body` is serialized as JSON when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Headers attached to the request.
    pub headers: BTreeMap<String, String>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

/// One captured HTTP response, produced once per call and read-only after.
///
/// # Invariants
/// - `raw_text` is the body exactly as received.
/// - `body` is the parsed JSON document when the body parses, `None`
///   otherwise; non-JSON bodies are not an error at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Raw body text as received.
    pub raw_text: String,
    /// Parsed JSON body when the raw text is a JSON document.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Captures a response from its status, headers, and raw body text.
    #[must_use]
    pub fn capture(status: u16, headers: BTreeMap<String, String>, raw_text: String) -> Self {
        let body = serde_json::from_str(&raw_text).ok();
        Self {
            status,
            headers,
            raw_text,
            body,
        }
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Transport errors for HTTP execution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Errors are surfaced uncaught; the harness never retries.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("http client build failed: {reason}")]
    ClientBuild {
        /// Builder diagnostic.
        reason: String,
    },
    /// The request body could not be serialized.
    #[error("request body serialization failed: {reason}")]
    InvalidBody {
        /// Serializer diagnostic.
        reason: String,
    },
    /// The request failed at the connection or protocol layer.
    #[error("request to `{url}` failed: {reason}")]
    Request {
        /// Target URL.
        url: String,
        /// Underlying cause.
        reason: String,
    },
    /// The response body could not be read.
    #[error("response body read failed: {reason}")]
    BodyRead {
        /// Underlying cause.
        reason: String,
    },
    /// The response body exceeded the configured size limit.
    #[error("response body exceeds the {limit_bytes} byte limit")]
    ResponseTooLarge {
        /// Configured limit in bytes.
        limit_bytes: usize,
    },
}

/// Backend-agnostic synchronous HTTP transport.
pub trait Transport: Send + Sync {
    /// Executes one prepared request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be built, sent, or
    /// its response read. Implementations must not retry.
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

// ============================================================================
// SECTION: Attachment Sink
// ============================================================================

/// Report delivery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The attachment could not be written.
    #[error("attachment write failed: {reason}")]
    WriteFailed {
        /// Underlying cause.
        reason: String,
    },
}

/// Receives opaque text attachments, one per executed call.
///
/// The executor treats delivery as fire-and-forget: a sink failure never
/// fails the case, and no return value flows back into assertions.
pub trait AttachmentSink: Send + Sync {
    /// Records one attachment under the given label.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the attachment cannot be recorded.
    fn attach(&self, label: &str, content: &str) -> Result<(), ReportError>;
}

// ============================================================================
// SECTION: Tests
// ============================================================================
