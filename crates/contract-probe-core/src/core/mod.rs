// crates/contract-probe-core/src/core/mod.rs
// ============================================================================
// Module: Contract Probe Core Types
// Description: Canonical specification, payload, case, and window structures.
// Purpose: Provide stable, serializable types for contract scenarios and reports.
// Dependencies: serde, thiserror, time, url
// ============================================================================

//! ## Overview
//! Contract Probe core types define request/response specifications, the
//! users-resource wire documents, typed scenario cases with reporting
//! descriptors, path templates, and the call window used for timestamp
//! assertions. These types are the canonical source of truth for the
//! runtime and for any derived report surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod case;
pub mod spec;
pub mod template;
pub mod user;
pub mod window;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use case::Case;
pub use case::CaseDescriptor;
pub use case::CreateCase;
pub use case::DeleteCase;
pub use case::ListCase;
pub use case::ReadCase;
pub use case::ScenarioKind;
pub use case::Severity;
pub use case::UpdateCase;
pub use spec::ContentType;
pub use spec::RequestSpec;
pub use spec::RequestSpecBuilder;
pub use spec::ResponseSpec;
pub use spec::ResponseSpecBuilder;
pub use spec::SpecError;
pub use spec::Specs;
pub use template::TemplateError;
pub use template::expand_template;
pub use user::CreatedUser;
pub use user::UpdatedUser;
pub use user::UserEnvelope;
pub use user::UserPage;
pub use user::UserPayload;
pub use user::UserRecord;
pub use window::CallWindow;
pub use window::ClosedWindow;
pub use window::ServerTimestampError;
pub use window::format_server_timestamp;
pub use window::parse_server_timestamp;
