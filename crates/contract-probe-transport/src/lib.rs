// crates/contract-probe-transport/src/lib.rs
// ============================================================================
// Module: Contract Probe Transport
// Description: Blocking HTTP transport implementation and configuration.
// Purpose: Execute prepared requests synchronously with strict limits.
// Dependencies: contract-probe-core, reqwest, serde
// ============================================================================

//! ## Overview
//! This crate ships the blocking HTTP implementation of the core
//! [`contract_probe_core::Transport`] interface. The client follows no
//! redirects, enforces a request timeout and a hard response-size limit, and
//! restricts cleartext HTTP behind an explicit opt-in. Failures surface as
//! [`contract_probe_core::TransportError`] values without retries; the
//! harness must observe the real, unretried outcome.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpTransport;
pub use http::HttpTransportConfig;
