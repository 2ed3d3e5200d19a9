// crates/policy-gateway-core/src/lib.rs
// ============================================================================
// Module: Policy Gateway Core Library
// Description: Public API surface for the policy-management gateway.
// Purpose: Expose core types, the backend interface, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Policy Gateway wraps a device's administrative control surface (user
//! lifecycle, restrictions, lock, wipe, bug reports, network logging) behind
//! one call contract. Each operation delegates to an [`AdminBackend`] and
//! reports failure as a classified [`GatewayError`]: backend faults pass
//! through unchanged, and semantically invalid return values become
//! [`InvalidResult`] diagnostics synthesized by the gateway.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AdminBackend;
pub use runtime::BackendCall;
pub use runtime::CallMode;
pub use runtime::CallOutcome;
pub use runtime::Continuation;
pub use runtime::DEFAULT_MEMORY_AUDIT_CAPACITY;
pub use runtime::DevicePolicyGateway;
pub use runtime::FileAuditSink;
pub use runtime::GatewayAuditEvent;
pub use runtime::GatewayAuditSink;
pub use runtime::InMemoryAdminBackend;
pub use runtime::MAX_CALL_LOG_ENTRIES;
pub use runtime::ManagedUser;
pub use runtime::MemoryAuditSink;
pub use runtime::NoopAuditSink;
pub use runtime::PolicyGateway;
pub use runtime::StderrAuditSink;
pub use runtime::resolve;
