// crates/policy-gateway-core/src/core/error.rs
// ============================================================================
// Module: Gateway Error Taxonomy
// Description: Backend faults and gateway-synthesized invalid results.
// Purpose: Classify every failure a gateway operation can report.
// Dependencies: crate::core::method, serde, thiserror
// ============================================================================

//! ## Overview
//! A gateway operation fails in one of two ways. Either the backend raised a
//! [`BackendError`], which is passed through unchanged, or the backend
//! returned a value the operation treats as invalid, in which case the gateway
//! synthesizes an [`InvalidResult`]. Invalid results never originate from the
//! backend. They carry the rendered call and the raw result so a diagnostic
//! can be rebuilt without re-querying the backend:
//!
//! ```text
//! DPM.removeUser(UserHandle{11}) returned false
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::UserHandle;
use crate::core::identifiers::UserSerialNumber;
use crate::core::method::GatewayMethod;
use crate::core::method::NULL_LITERAL;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default namespace label prefixed to invalid-result diagnostics.
pub const DEFAULT_NAMESPACE: &str = "DPM";

/// Raw result recorded for boolean-contract calls that returned `false`.
pub const FALSE_LITERAL: &str = "false";

// ============================================================================
// SECTION: Backend Errors
// ============================================================================

/// Fault raised by the administrative backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Caller lacks the privilege required for the call.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Device or user is not in a state that allows the call.
    #[error("illegal state: {0}")]
    IllegalState(String),
    /// Backend rejected an argument.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    /// Call is not supported on this device.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    /// Any other backend failure.
    #[error("backend failure: {0}")]
    Failed(String),
}

// ============================================================================
// SECTION: Invalid Results
// ============================================================================

/// Classification of a gateway-synthesized invalid result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidResultKind {
    /// Backend returned a semantically wrong value.
    InvalidValue,
    /// Boolean-contract call returned `false`.
    FailedOperation,
    /// Serial-number lookup found no live user.
    UnresolvedUser,
}

/// Backend value rejected by the gateway.
///
/// # Invariants
/// - `FailedOperation` results always carry [`FALSE_LITERAL`].
/// - `UnresolvedUser` results always name the serial-number lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidResult {
    /// Namespace label prefixed to the diagnostic.
    namespace: String,
    /// Call that produced the result.
    method: GatewayMethod,
    /// Raw result in string form.
    result: String,
    /// Classification.
    kind: InvalidResultKind,
}

impl InvalidResult {
    /// Builds an invalid result for a semantically wrong return value.
    #[must_use]
    pub fn invalid_value(
        namespace: impl Into<String>,
        method: GatewayMethod,
        result: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            method,
            result: result.into(),
            kind: InvalidResultKind::InvalidValue,
        }
    }

    /// Builds a failed-operation result for a boolean call that returned `false`.
    #[must_use]
    pub fn failed_operation(namespace: impl Into<String>, method: GatewayMethod) -> Self {
        Self {
            namespace: namespace.into(),
            method,
            result: FALSE_LITERAL.to_string(),
            kind: InvalidResultKind::FailedOperation,
        }
    }

    /// Builds a resolution failure for a serial number with no live user.
    ///
    /// `result` is the lookup's raw return value, `None` when it returned no handle.
    #[must_use]
    pub fn unresolved_user(
        namespace: impl Into<String>,
        serial: UserSerialNumber,
        result: Option<UserHandle>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            method: GatewayMethod::GetUserForSerialNumber {
                serial,
            },
            result: result.map_or_else(|| NULL_LITERAL.to_string(), |handle| handle.to_string()),
            kind: InvalidResultKind::UnresolvedUser,
        }
    }

    /// Returns the namespace label.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the call that produced the result.
    #[must_use]
    pub const fn method(&self) -> &GatewayMethod {
        &self.method
    }

    /// Returns the raw result in string form.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Returns the classification.
    #[must_use]
    pub const fn kind(&self) -> InvalidResultKind {
        self.kind
    }
}

impl fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} returned {}", self.namespace, self.method, self.result)
    }
}

impl std::error::Error for InvalidResult {}

// ============================================================================
// SECTION: Gateway Errors
// ============================================================================

/// Failure reported by a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Backend raised an error; passed through unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Gateway rejected a backend return value.
    #[error(transparent)]
    InvalidResult(#[from] InvalidResult),
}

impl GatewayError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::Backend(_) => GatewayErrorKind::BackendFault,
            Self::InvalidResult(invalid) => match invalid.kind {
                InvalidResultKind::InvalidValue => GatewayErrorKind::InvalidResult,
                InvalidResultKind::FailedOperation => GatewayErrorKind::FailedOperation,
                InvalidResultKind::UnresolvedUser => GatewayErrorKind::ResolutionFailure,
            },
        }
    }

    /// Returns the backend fault, if this error is one.
    #[must_use]
    pub const fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(err) => Some(err),
            Self::InvalidResult(_) => None,
        }
    }

    /// Returns the invalid result, if this error is one.
    #[must_use]
    pub const fn invalid_result(&self) -> Option<&InvalidResult> {
        match self {
            Self::Backend(_) => None,
            Self::InvalidResult(invalid) => Some(invalid),
        }
    }
}

/// Flat error classification used for assertions and audit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorKind {
    /// Backend raised an error.
    BackendFault,
    /// Backend returned a semantically wrong value.
    InvalidResult,
    /// Boolean-contract call returned `false`.
    FailedOperation,
    /// Serial-number lookup found no live user.
    ResolutionFailure,
}

impl GatewayErrorKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BackendFault => "backend_fault",
            Self::InvalidResult => "invalid_result",
            Self::FailedOperation => "failed_operation",
            Self::ResolutionFailure => "resolution_failure",
        }
    }
}
