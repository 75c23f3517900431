// crates/contract-probe-core/src/runtime/scenarios.rs
// ============================================================================
// Module: Canonical Scenarios
// Description: The five CRUD scenarios over the users resource.
// Purpose: Compose specs, executor calls, and assertions per case.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! Each scenario is a pure function of its typed case: it installs a fresh
//! request/response specification pair, issues the call through the
//! executor, and hands the captured response to the assertion engine. Cases
//! share no state; every invocation builds its own specs, so scenarios can
//! run in any order.
//!
//! For mutating scenarios the call window opens before the request and
//! closes after the response, bracketing the server-generated timestamp
//! with one minute of clock-skew slack on each side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::case::CreateCase;
use crate::core::case::DeleteCase;
use crate::core::case::ListCase;
use crate::core::case::ReadCase;
use crate::core::case::UpdateCase;
use crate::core::spec::RequestSpecBuilder;
use crate::core::spec::ResponseSpecBuilder;
use crate::core::spec::Specs;
use crate::core::user::CreatedUser;
use crate::core::user::UpdatedUser;
use crate::core::user::UserEnvelope;
use crate::core::user::UserPage;
use crate::core::window::CallWindow;
use crate::interfaces::AttachmentSink;
use crate::interfaces::Transport;
use crate::runtime::assert;
use crate::runtime::executor::Executor;
use crate::runtime::runner::CaseFailure;

// ============================================================================
// SECTION: Spec Installation
// ============================================================================

/// Installs a fresh spec pair for one case.
fn install(base_uri: &str, expected_status: u16) -> Result<Specs, CaseFailure> {
    let request = RequestSpecBuilder::new(base_uri).build()?;
    let response = ResponseSpecBuilder::new().expect_status(expected_status).build()?;
    Ok(Specs::install(request, response))
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// List scenario: the requested page echoes its number and matches the
/// declared emptiness class.
///
/// # Errors
///
/// Returns [`CaseFailure`] on any spec, transport, or assertion failure.
pub fn list_users(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    case: &ListCase,
) -> Result<(), CaseFailure> {
    let specs = install(base_uri, 200)?;
    let executor = Executor::new(transport, sink, &specs);
    let response = executor.list_users(case.page)?;
    assert::check_status(&response, &specs.response)?;
    let page: UserPage = assert::parse_document(&response, "user page")?;
    assert::check_page_number(&page, case.page)?;
    assert::check_list_emptiness(&page, case.expect_empty)?;
    Ok(())
}

/// Read scenario: a valid identifier returns its record; an invalid one
/// returns only the expected status, with no body shape assumed.
///
/// # Errors
///
/// Returns [`CaseFailure`] on any spec, transport, or assertion failure.
pub fn read_user(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    case: &ReadCase,
) -> Result<(), CaseFailure> {
    let specs = install(base_uri, case.expected_status)?;
    let executor = Executor::new(transport, sink, &specs);
    let response = executor.user_by_id(case.id)?;
    assert::check_status(&response, &specs.response)?;
    if case.expected_status == 200 {
        let envelope: UserEnvelope = assert::parse_document(&response, "user envelope")?;
        assert::check_user_id(envelope.data.id, case.id)?;
    }
    Ok(())
}

/// Create scenario: the response echoes the payload and carries a freshly
/// generated creation timestamp inside the call window.
///
/// # Errors
///
/// Returns [`CaseFailure`] on any spec, transport, or assertion failure.
pub fn create_user(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    case: &CreateCase,
) -> Result<(), CaseFailure> {
    let specs = install(base_uri, 201)?;
    let executor = Executor::new(transport, sink, &specs);
    let opened = CallWindow::open();
    let response = executor.create_user(&case.payload)?;
    let window = opened.close();
    assert::check_status(&response, &specs.response)?;
    let created: CreatedUser = assert::parse_document(&response, "created user")?;
    assert::check_timestamp_window("createdAt", &created.created_at, &window)?;
    assert::check_echo(&created.name, &created.job, &case.payload)?;
    Ok(())
}

/// Update scenario: the response echoes the payload and carries a freshly
/// generated update timestamp inside the call window.
///
/// # Errors
///
/// Returns [`CaseFailure`] on any spec, transport, or assertion failure.
pub fn update_user(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    case: &UpdateCase,
) -> Result<(), CaseFailure> {
    let specs = install(base_uri, 200)?;
    let executor = Executor::new(transport, sink, &specs);
    let opened = CallWindow::open();
    let response = executor.update_user(case.id, &case.payload)?;
    let window = opened.close();
    assert::check_status(&response, &specs.response)?;
    let updated: UpdatedUser = assert::parse_document(&response, "updated user")?;
    assert::check_timestamp_window("updatedAt", &updated.updated_at, &window)?;
    assert::check_echo(&updated.name, &updated.job, &case.payload)?;
    Ok(())
}

/// Delete scenario: deletion yields no content and an exactly empty body.
///
/// # Errors
///
/// Returns [`CaseFailure`] on any spec, transport, or assertion failure.
pub fn delete_user(
    transport: &dyn Transport,
    sink: &dyn AttachmentSink,
    base_uri: &str,
    case: &DeleteCase,
) -> Result<(), CaseFailure> {
    let specs = install(base_uri, 204)?;
    let executor = Executor::new(transport, sink, &specs);
    let response = executor.delete_user(case.id)?;
    assert::check_status(&response, &specs.response)?;
    assert::check_empty_body(&response)?;
    Ok(())
}
