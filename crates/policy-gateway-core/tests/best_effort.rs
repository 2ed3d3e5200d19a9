// crates/policy-gateway-core/tests/best_effort.rs
// ============================================================================
// Module: Fire-and-Forget Tests
// Description: Best-effort variants that discard their outcome.
// Purpose: Ensure backend faults are swallowed and the call returns normally.
// Dependencies: policy-gateway-core
// ============================================================================
//! ## Overview
//! Best-effort variants invoke the same backend primitive as their callback
//! counterparts. Failures are discarded and only visible in the audit trail.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use policy_gateway_core::BackendCall;
use policy_gateway_core::BackendError;
use policy_gateway_core::CallMode;
use policy_gateway_core::CallOutcome;
use policy_gateway_core::Continuation;
use policy_gateway_core::DevicePolicyGateway;
use policy_gateway_core::GatewayErrorKind;
use policy_gateway_core::PolicyGateway;
use policy_gateway_core::RestrictionKey;

use crate::common::ScriptedBackend;
use crate::common::in_memory_gateway;

#[test]
fn best_effort_restriction_applies_on_success() {
    let (gateway, backend, _) = in_memory_gateway();
    let key = RestrictionKey::new("no_config_wifi");

    gateway.set_user_restriction_best_effort(&key, true);
    assert!(gateway.has_user_restriction(&key));

    gateway.set_user_restriction_best_effort(&key, false);
    assert!(!gateway.has_user_restriction(&key));
    assert_eq!(
        backend.calls(),
        vec![BackendCall::AddUserRestriction, BackendCall::ClearUserRestriction]
    );
}

#[test]
fn best_effort_restriction_swallows_fault() {
    let (gateway, backend, audit) = in_memory_gateway();
    backend.inject_fault(
        BackendCall::AddUserRestriction,
        BackendError::PermissionDenied("not an admin".to_string()),
    );
    let key = RestrictionKey::new("no_usb_file_transfer");

    gateway.set_user_restriction_best_effort(&key, true);

    assert!(!gateway.has_user_restriction(&key));
    let events = audit.events();
    let call = events.iter().find(|event| event.mode == CallMode::BestEffort).unwrap();
    assert_eq!(call.outcome, CallOutcome::Error);
    assert_eq!(call.error_kind, Some(GatewayErrorKind::BackendFault));
    assert!(call.swallowed);
}

#[test]
fn best_effort_network_logging_swallows_fault() {
    let backend = ScriptedBackend::faulting(BackendError::IllegalState("no owner".to_string()));
    let gateway = DevicePolicyGateway::new(backend);

    gateway.set_network_logging_best_effort(true);

    assert_eq!(gateway.backend().calls(), vec!["set_network_logging_enabled"]);
}

#[test]
fn best_effort_network_logging_applies_on_success() {
    let (gateway, backend, _) = in_memory_gateway();

    gateway.set_network_logging_best_effort(true);
    assert!(backend.network_logging_enabled());

    gateway.set_network_logging_best_effort(false);
    assert!(!backend.network_logging_enabled());
}

#[test]
fn ignoring_continuation_discards_failure() {
    let backend = ScriptedBackend::faulting(BackendError::Failed("binder died".to_string()));
    let gateway = DevicePolicyGateway::new(backend);

    Continuation::ignoring().complete(gateway.lock_now());

    assert_eq!(gateway.backend().calls(), vec!["lock_now"]);
}
