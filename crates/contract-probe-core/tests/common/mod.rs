// crates/contract-probe-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: In-memory transport and sink fakes for runtime tests.
// Purpose: Drive scenarios without a network.
// Dependencies: contract-probe-core, serde_json
// ============================================================================

//! ## Overview
//! Test doubles for the core interfaces: a scripted transport answering from
//! a responder closure and a recording sink capturing attachments in memory.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Test-only helpers; not every test uses every helper."
)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use contract_probe_core::ApiRequest;
use contract_probe_core::ApiResponse;
use contract_probe_core::AttachmentSink;
use contract_probe_core::ReportError;
use contract_probe_core::Transport;
use contract_probe_core::TransportError;

/// Responder signature mapping a request to a captured response.
type Responder = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync>;

/// Scripted transport answering every request from a responder closure.
pub struct FakeTransport {
    /// Responder producing the scripted response.
    responder: Responder,
}

impl FakeTransport {
    /// Creates a transport answering from the given responder.
    pub fn new(
        responder: impl Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
        }
    }

    /// Creates a transport answering every request with one fixed response.
    pub fn always(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(ApiResponse::capture(status, BTreeMap::new(), body.clone())))
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (self.responder)(request)
    }
}

/// Sink recording every attachment in memory.
#[derive(Default)]
pub struct RecordingSink {
    /// Recorded (label, content) pairs in delivery order.
    attachments: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded attachments.
    pub fn recorded(&self) -> Vec<(String, String)> {
        self.attachments.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl AttachmentSink for RecordingSink {
    fn attach(&self, label: &str, content: &str) -> Result<(), ReportError> {
        let mut guard = self.attachments.lock().map_err(|_| ReportError::WriteFailed {
            reason: "attachment store poisoned".to_string(),
        })?;
        guard.push((label.to_string(), content.to_string()));
        Ok(())
    }
}

/// Sink rejecting every attachment, for fire-and-forget checks.
pub struct FailingSink;

impl AttachmentSink for FailingSink {
    fn attach(&self, _label: &str, _content: &str) -> Result<(), ReportError> {
        Err(ReportError::WriteFailed {
            reason: "sink unavailable".to_string(),
        })
    }
}
