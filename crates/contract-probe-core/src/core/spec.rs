// crates/contract-probe-core/src/core/spec.rs
// ============================================================================
// Module: Request and Response Specifications
// Description: Reusable request/response specification bundles and builders.
// Purpose: Validate and freeze per-call defaults for the request executor.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! Specifications are immutable bundles of default request or response
//! parameters applied to subsequent calls. A [`RequestSpec`] fixes the base
//! URI, content type, and default headers; a [`ResponseSpec`] fixes exactly
//! one expected status code. Both are write-once: builders validate their
//! inputs and the built values never mutate.
//!
//! The installed pair is an explicit [`Specs`] value constructed per case
//! and passed into each executor call. There is no process-wide mutable
//! default configuration, so concurrently running cases cannot observe each
//! other's specifications.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Specification construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Base URI was empty.
    #[error("base uri must not be empty")]
    EmptyBaseUri,
    /// Base URI was not a valid absolute URI.
    #[error("base uri `{uri}` is not a valid absolute uri: {reason}")]
    InvalidBaseUri {
        /// Rejected base URI.
        uri: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Expected status code was outside the valid HTTP range.
    #[error("expected status code {code} is outside the valid range 100..=599")]
    StatusCodeOutOfRange {
        /// Rejected status code.
        code: u16,
    },
    /// Expanded endpoint path could not be resolved against the base URI.
    #[error("path `{path}` cannot be resolved against the base uri: {reason}")]
    PathRejected {
        /// Rejected endpoint path.
        path: String,
        /// Resolver diagnostic.
        reason: String,
    },
}

// ============================================================================
// SECTION: Content Type
// ============================================================================

/// Request content types supported by the harness.
///
/// # Invariants
/// - The wire value is a stable MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// JSON request and response bodies.
    Json,
}

impl ContentType {
    /// Returns the MIME type sent on the wire.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

// ============================================================================
// SECTION: Request Specification
// ============================================================================

/// Reusable request configuration applied to every call of one scenario case.
///
/// # Invariants
/// - `base_uri` is a valid absolute URI.
/// - Immutable once built; reused across calls within one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Base URI for all requests issued under this specification.
    base_uri: Url,
    /// Content type forced on request bodies.
    content_type: ContentType,
    /// Default headers attached to every request.
    default_headers: BTreeMap<String, String>,
}

impl RequestSpec {
    /// Starts a builder for a request specification with the given base URI.
    #[must_use]
    pub fn builder(base_uri: impl Into<String>) -> RequestSpecBuilder {
        RequestSpecBuilder::new(base_uri)
    }

    /// Returns the base URI.
    #[must_use]
    pub const fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Returns the content type.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }
}

/// Builder for [`RequestSpec`] values.
///
/// # Invariants
/// - `build` validates the base URI; invalid input never produces a spec.
#[derive(Debug, Clone)]
pub struct RequestSpecBuilder {
    /// Candidate base URI, validated at build time.
    base_uri: String,
    /// Default headers collected so far.
    default_headers: BTreeMap<String, String>,
}

impl RequestSpecBuilder {
    /// Creates a builder with the given base URI and JSON content type.
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            default_headers: BTreeMap::new(),
        }
    }

    /// Adds a default header attached to every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Validates the inputs and builds the immutable specification.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the base URI is empty or not absolute.
    pub fn build(self) -> Result<RequestSpec, SpecError> {
        if self.base_uri.is_empty() {
            return Err(SpecError::EmptyBaseUri);
        }
        let base_uri = Url::parse(&self.base_uri).map_err(|err| SpecError::InvalidBaseUri {
            uri: self.base_uri.clone(),
            reason: err.to_string(),
        })?;
        if base_uri.cannot_be_a_base() {
            return Err(SpecError::InvalidBaseUri {
                uri: self.base_uri,
                reason: "uri cannot serve as a request base".to_string(),
            });
        }
        Ok(RequestSpec {
            base_uri,
            content_type: ContentType::Json,
            default_headers: self.default_headers,
        })
    }
}

// ============================================================================
// SECTION: Response Specification
// ============================================================================

/// Reusable response expectation holding exactly one expected status code.
///
/// # Invariants
/// - `expected_status` is within 100..=599.
/// - Immutable; one instance per scenario invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Status code the assertion engine must observe for the case.
    expected_status: u16,
}

impl ResponseSpec {
    /// Starts a builder for a response specification.
    #[must_use]
    pub const fn builder() -> ResponseSpecBuilder {
        ResponseSpecBuilder::new()
    }

    /// Returns the expected status code.
    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }
}

/// Builder for [`ResponseSpec`] values.
///
/// # Invariants
/// - `build` rejects status codes outside 100..=599.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSpecBuilder {
    /// Candidate expected status code.
    expected_status: Option<u16>,
}

impl ResponseSpecBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expected_status: None,
        }
    }

    /// Sets the expected status code for the case.
    #[must_use]
    pub const fn expect_status(mut self, code: u16) -> Self {
        self.expected_status = Some(code);
        self
    }

    /// Validates the status code and builds the immutable expectation.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when no status code was set or the code is
    /// outside the valid HTTP range.
    pub fn build(self) -> Result<ResponseSpec, SpecError> {
        let code = self.expected_status.unwrap_or(0);
        if !(100 ..= 599).contains(&code) {
            return Err(SpecError::StatusCodeOutOfRange {
                code,
            });
        }
        Ok(ResponseSpec {
            expected_status: code,
        })
    }
}

// ============================================================================
// SECTION: Installed Pair
// ============================================================================

/// The active request/response specification pair for one call sequence.
///
/// Historically this pair lived in process-wide mutable defaults that each
/// case overwrote before use. It is now an explicit value: each case builds
/// its own pair and hands it to the executor, so no state leaks between
/// cases and cases may run in parallel.
///
/// # Invariants
/// - The response expectation is declarative metadata; the executor never
///   asserts against it. The assertion engine checks it exactly once per
///   case.
#[derive(Debug, Clone)]
pub struct Specs {
    /// Request defaults applied to every call.
    pub request: RequestSpec,
    /// Declared response expectation checked by the assertion engine.
    pub response: ResponseSpec,
}

impl Specs {
    /// Installs a request/response pair as the active specs for one case.
    #[must_use]
    pub const fn install(request: RequestSpec, response: ResponseSpec) -> Self {
        Self {
            request,
            response,
        }
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
    fn request_spec_accepts_absolute_uri() {
        let spec = RequestSpecBuilder::new("https://reqres.in/").build().unwrap();
        assert_eq!(spec.base_uri().as_str(), "https://reqres.in/");
        assert_eq!(spec.content_type().mime(), "application/json");
    }

    #[test]
    fn request_spec_rejects_empty_uri() {
        let err = RequestSpecBuilder::new("").build().unwrap_err();
        assert!(matches!(err, SpecError::EmptyBaseUri));
    }

    #[test]
    fn request_spec_rejects_relative_uri() {
        let err = RequestSpecBuilder::new("api/users").build().unwrap_err();
        assert!(matches!(err, SpecError::InvalidBaseUri { .. }));
    }

    #[test]
    fn request_spec_keeps_default_headers() {
        let spec = RequestSpecBuilder::new("https://reqres.in/")
            .header("x-api-key", "reqres-free")
            .build()
            .unwrap();
        assert_eq!(spec.default_headers().get("x-api-key").map(String::as_str), Some("reqres-free"));
    }

    #[test]
    fn response_spec_accepts_valid_codes() {
        for code in [100_u16, 200, 204, 404, 599] {
            let spec = ResponseSpecBuilder::new().expect_status(code).build().unwrap();
            assert_eq!(spec.expected_status(), code);
        }
    }

    #[test]
    fn response_spec_rejects_out_of_range_codes() {
        for code in [0_u16, 99, 600, 1000] {
            let err = ResponseSpecBuilder::new().expect_status(code).build().unwrap_err();
            assert!(matches!(err, SpecError::StatusCodeOutOfRange { .. }));
        }
    }

    #[test]
    fn response_spec_requires_a_code() {
        let err = ResponseSpecBuilder::new().build().unwrap_err();
        assert!(matches!(
            err,
            SpecError::StatusCodeOutOfRange {
                code: 0
            }
        ));
    }
}
