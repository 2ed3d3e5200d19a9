// crates/policy-gateway-core/src/core/mod.rs
// ============================================================================
// Module: Policy Gateway Core Types
// Description: Identifiers, method identity, and the error taxonomy.
// Purpose: Group the value types shared by interfaces and runtime.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain values with no behavior beyond formatting and
//! classification. They are re-exported at the crate root.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod identifiers;
pub mod method;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::*;
pub use identifiers::*;
pub use method::*;
