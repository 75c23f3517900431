// crates/contract-probe-report/src/lib.rs
// ============================================================================
// Module: Contract Probe Report Sinks
// Description: Attachment sink implementations for report delivery.
// Purpose: Record raw response bodies alongside case reports.
// Dependencies: contract-probe-core
// ============================================================================

//! ## Overview
//! This crate ships reference implementations of the core
//! [`contract_probe_core::AttachmentSink`] interface. The executor delivers
//! one raw response body per call; sinks record it in memory, on disk, or
//! nowhere. Delivery is fire-and-forget from the executor's point of view,
//! but sinks themselves fail closed: a write error is reported, never
//! silently dropped inside the sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod sink;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use sink::Attachment;
pub use sink::FileSink;
pub use sink::MemorySink;
pub use sink::NullSink;
