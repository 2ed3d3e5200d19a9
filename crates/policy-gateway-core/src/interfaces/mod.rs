// crates/policy-gateway-core/src/interfaces/mod.rs
// ============================================================================
// Module: Policy Gateway Interfaces
// Description: Contract of the privileged administrative backend.
// Purpose: Define the primitives the gateway delegates to.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The administrative backend performs the actual device-management actions.
//! The gateway calls it synchronously and classifies what comes back; it never
//! interprets device semantics itself. Backends own all concurrency safety for
//! the device state they manage.
//!
//! Restriction queries are infallible in this contract. A backend that cannot
//! be reached to answer them is a process-level fault for the backend to
//! surface, not a classified gateway error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::BackendError;
use crate::core::CreateUserFlags;
use crate::core::RestrictionKey;
use crate::core::UserHandle;
use crate::core::UserSerialNumber;
use crate::core::WipeFlags;

// ============================================================================
// SECTION: Administrative Backend
// ============================================================================

/// Privileged device-administration primitives.
pub trait AdminBackend: Send + Sync {
    /// Creates and provisions a managed user.
    ///
    /// Returns `Ok(None)` when the backend could not produce a user.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<Option<UserHandle>, BackendError>;

    /// Removes a user, returning whether removal happened.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn remove_user(&self, handle: &UserHandle) -> Result<bool, BackendError>;

    /// Resolves a serial number into the handle of a live user.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the lookup itself fails.
    fn user_for_serial_number(
        &self,
        serial: UserSerialNumber,
    ) -> Result<Option<UserHandle>, BackendError>;

    /// Returns the currently enforced restriction keys.
    fn user_restrictions(&self) -> BTreeSet<RestrictionKey>;

    /// Returns whether a restriction is currently enforced.
    fn has_user_restriction(&self, key: &RestrictionKey) -> bool;

    /// Enforces a restriction.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn add_user_restriction(&self, key: &RestrictionKey) -> Result<(), BackendError>;

    /// Lifts a restriction.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn clear_user_restriction(&self, key: &RestrictionKey) -> Result<(), BackendError>;

    /// Locks the device immediately.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn lock_now(&self) -> Result<(), BackendError>;

    /// Wipes device data.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn wipe_data(&self, flags: WipeFlags) -> Result<(), BackendError>;

    /// Starts a bug report capture.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn request_bugreport(&self) -> Result<(), BackendError>;

    /// Enables or disables network logging.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend rejects the call.
    fn set_network_logging_enabled(&self, enabled: bool) -> Result<(), BackendError>;
}
