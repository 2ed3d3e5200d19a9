// crates/policy-gateway-core/src/runtime/continuation.rs
// ============================================================================
// Module: Gateway Continuations
// Description: Success/error callback pair for callers that consume outcomes.
// Purpose: Route a gateway result to exactly one callback, exactly once.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Gateway operations return `Result<T, GatewayError>`. Call sites built
//! around a callback pair wrap them in a [`Continuation`], which owns one
//! `FnOnce` per branch. [`Continuation::complete`] consumes the pair, so a
//! continuation can fire at most once and always fires exactly one branch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GatewayError;

// ============================================================================
// SECTION: Continuation
// ============================================================================

/// Boxed success callback.
type SuccessFn<T> = Box<dyn FnOnce(T)>;
/// Boxed error callback.
type ErrorFn = Box<dyn FnOnce(GatewayError)>;

/// Success/error callback pair for a single gateway operation.
pub struct Continuation<T> {
    /// Called with the payload when the operation succeeds.
    on_success: SuccessFn<T>,
    /// Called with the classified error when the operation fails.
    on_error: ErrorFn,
}

impl<T: 'static> Continuation<T> {
    /// Creates a continuation from a callback pair.
    #[must_use]
    pub fn new(
        on_success: impl FnOnce(T) + 'static,
        on_error: impl FnOnce(GatewayError) + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    /// Creates a continuation that discards both outcomes.
    #[must_use]
    pub fn ignoring() -> Self {
        Self::new(|_| {}, |_| {})
    }

    /// Fires exactly one callback with the operation result.
    pub fn complete(self, result: Result<T, GatewayError>) {
        match result {
            Ok(value) => (self.on_success)(value),
            Err(err) => (self.on_error)(err),
        }
    }
}

/// Runs `operation` and routes its result through a callback pair.
pub fn resolve<T: 'static>(
    operation: impl FnOnce() -> Result<T, GatewayError>,
    on_success: impl FnOnce(T) + 'static,
    on_error: impl FnOnce(GatewayError) + 'static,
) {
    Continuation::new(on_success, on_error).complete(operation());
}
