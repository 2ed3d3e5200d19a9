// crates/policy-gateway-core/src/runtime/mod.rs
// ============================================================================
// Module: Policy Gateway Runtime
// Description: Gateway implementation, continuations, audit, and backends.
// Purpose: Provide the executable side of the gateway contract.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime wires the gateway contract to an administrative backend and an
//! audit sink. It performs no scheduling of its own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod backend;
pub mod continuation;
pub mod gateway;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::CallMode;
pub use audit::CallOutcome;
pub use audit::DEFAULT_MEMORY_AUDIT_CAPACITY;
pub use audit::FileAuditSink;
pub use audit::GatewayAuditEvent;
pub use audit::GatewayAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use backend::BackendCall;
pub use backend::DEFAULT_MAX_USERS;
pub use backend::InMemoryAdminBackend;
pub use backend::MAX_CALL_LOG_ENTRIES;
pub use backend::ManagedUser;
pub use continuation::Continuation;
pub use continuation::resolve;
pub use gateway::DevicePolicyGateway;
pub use gateway::PolicyGateway;
