// crates/policy-gateway-config/src/lib.rs
// ============================================================================
// Module: Policy Gateway Config Library
// Description: Canonical config model, validation, and runtime wiring.
// Purpose: Single source of truth for policy-gateway.toml semantics.
// Dependencies: policy-gateway-core, serde, toml
// ============================================================================

//! ## Overview
//! `policy-gateway-config` defines the configuration model for the policy
//! gateway: namespace label, audit sink selection, and the in-memory
//! reference backend. Validation is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
