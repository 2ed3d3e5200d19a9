// crates/policy-gateway-core/src/runtime/gateway.rs
// ============================================================================
// Module: Policy Gateway
// Description: Uniform call contract over the administrative backend.
// Purpose: Translate raw backend outcomes into classified gateway results.
// Dependencies: crate::core, crate::interfaces, crate::runtime::audit
// ============================================================================

//! ## Overview
//! [`PolicyGateway`] exposes one operation per administrative capability.
//! [`DevicePolicyGateway`] implements it by invoking the backend once per
//! call and applying a single translation rule:
//!
//! - a backend fault is returned unchanged,
//! - a return value the operation treats as invalid becomes an
//!   [`InvalidResult`],
//! - anything else becomes the success payload.
//!
//! The gateway holds no device state and spawns no work. Each call runs to
//! completion on the caller's thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::BackendError;
use crate::core::CreateUserFlags;
use crate::core::DEFAULT_NAMESPACE;
use crate::core::GatewayError;
use crate::core::GatewayMethod;
use crate::core::InvalidResult;
use crate::core::NULL_LITERAL;
use crate::core::RestrictionKey;
use crate::core::UserHandle;
use crate::core::UserSerialNumber;
use crate::core::WipeFlags;
use crate::interfaces::AdminBackend;
use crate::runtime::audit::CallMode;
use crate::runtime::audit::GatewayAuditEvent;
use crate::runtime::audit::GatewayAuditSink;
use crate::runtime::audit::NoopAuditSink;

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Administrative operations with classified failure reporting.
pub trait PolicyGateway {
    /// Creates and provisions a managed user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults and
    /// [`GatewayError::InvalidResult`] when it yields no valid handle.
    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<UserHandle, GatewayError>;

    /// Removes a user by handle.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults and a
    /// failed-operation [`InvalidResult`] when removal reports `false`.
    fn remove_user(&self, handle: &UserHandle) -> Result<(), GatewayError>;

    /// Removes a user by serial number.
    ///
    /// # Errors
    ///
    /// Returns an unresolved-user [`InvalidResult`] when the serial number
    /// names no live user, otherwise the errors of [`Self::remove_user`].
    fn remove_user_by_serial_number(&self, serial: UserSerialNumber) -> Result<(), GatewayError>;

    /// Returns the currently enforced restriction keys.
    fn user_restrictions(&self) -> BTreeSet<RestrictionKey>;

    /// Enforces (`enabled`) or lifts a restriction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults.
    fn set_user_restriction(&self, key: &RestrictionKey, enabled: bool)
    -> Result<(), GatewayError>;

    /// Same as [`Self::set_user_restriction`], discarding the outcome.
    fn set_user_restriction_best_effort(&self, key: &RestrictionKey, enabled: bool) {
        let _ = self.set_user_restriction(key, enabled);
    }

    /// Returns whether a restriction is currently enforced.
    fn has_user_restriction(&self, key: &RestrictionKey) -> bool;

    /// Locks the device immediately.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults.
    fn lock_now(&self) -> Result<(), GatewayError>;

    /// Wipes device data.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults.
    fn wipe_data(&self, flags: WipeFlags) -> Result<(), GatewayError>;

    /// Requests a bug report capture.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults.
    fn request_bugreport(&self) -> Result<(), GatewayError>;

    /// Enables or disables network logging.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] when the backend faults.
    fn set_network_logging(&self, enabled: bool) -> Result<(), GatewayError>;

    /// Same as [`Self::set_network_logging`], discarding the outcome.
    fn set_network_logging_best_effort(&self, enabled: bool) {
        let _ = self.set_network_logging(enabled);
    }
}

// ============================================================================
// SECTION: Device Policy Gateway
// ============================================================================

/// Gateway backed by an [`AdminBackend`].
pub struct DevicePolicyGateway<B> {
    /// Backend performing the privileged calls.
    backend: B,
    /// Namespace label used in invalid-result diagnostics.
    namespace: String,
    /// Audit sink receiving one event per backend call.
    audit: Arc<dyn GatewayAuditSink>,
}

impl<B: AdminBackend> DevicePolicyGateway<B> {
    /// Creates a gateway with the default namespace and no audit output.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            namespace: DEFAULT_NAMESPACE.to_string(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the namespace label.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn GatewayAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the namespace label.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Invokes one backend call, translates its outcome, and audits it.
    fn invoke<T, R>(
        &self,
        method: &GatewayMethod,
        mode: CallMode,
        call: impl FnOnce(&B) -> Result<R, BackendError>,
        translate: impl FnOnce(R) -> Result<T, InvalidResult>,
    ) -> Result<T, GatewayError> {
        let result = match call(&self.backend) {
            Ok(raw) => translate(raw).map_err(GatewayError::from),
            Err(err) => Err(GatewayError::from(err)),
        };
        self.audit.record(&GatewayAuditEvent::for_call(
            &self.namespace,
            method,
            mode,
            result.as_ref().err(),
        ));
        result
    }

    /// Invokes a backend call whose only outcome is success or a fault.
    fn invoke_void(
        &self,
        method: &GatewayMethod,
        mode: CallMode,
        call: impl FnOnce(&B) -> Result<(), BackendError>,
    ) -> Result<(), GatewayError> {
        self.invoke(method, mode, call, Ok)
    }

    /// Toggles a restriction in the given mode.
    fn apply_restriction(
        &self,
        key: &RestrictionKey,
        enabled: bool,
        mode: CallMode,
    ) -> Result<(), GatewayError> {
        let method = GatewayMethod::restriction(key.clone(), enabled);
        self.invoke_void(&method, mode, |backend| {
            if enabled {
                backend.add_user_restriction(key)
            } else {
                backend.clear_user_restriction(key)
            }
        })
    }

    /// Toggles network logging in the given mode.
    fn apply_network_logging(&self, enabled: bool, mode: CallMode) -> Result<(), GatewayError> {
        let method = GatewayMethod::SetNetworkLoggingEnabled {
            enabled,
        };
        self.invoke_void(&method, mode, |backend| backend.set_network_logging_enabled(enabled))
    }

    /// Records a restriction query.
    fn audit_query(&self, accessor: &str) {
        self.audit.record(&GatewayAuditEvent::for_query(&self.namespace, accessor));
    }
}

impl<B: AdminBackend> PolicyGateway for DevicePolicyGateway<B> {
    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<UserHandle, GatewayError> {
        let method = GatewayMethod::CreateAndManageUser {
            name: name.map(str::to_string),
            flags,
        };
        self.invoke(
            &method,
            CallMode::Callback,
            |backend| backend.create_and_manage_user(name, flags),
            |raw| match raw {
                Some(handle) if handle.is_valid() => Ok(handle),
                other => Err(InvalidResult::invalid_value(
                    &self.namespace,
                    method.clone(),
                    other.map_or_else(|| NULL_LITERAL.to_string(), |handle| handle.to_string()),
                )),
            },
        )
    }

    fn remove_user(&self, handle: &UserHandle) -> Result<(), GatewayError> {
        let method = GatewayMethod::RemoveUser {
            handle: *handle,
        };
        self.invoke(
            &method,
            CallMode::Callback,
            |backend| backend.remove_user(handle),
            |removed| {
                if removed {
                    Ok(())
                } else {
                    Err(InvalidResult::failed_operation(&self.namespace, method.clone()))
                }
            },
        )
    }

    fn remove_user_by_serial_number(&self, serial: UserSerialNumber) -> Result<(), GatewayError> {
        let lookup = GatewayMethod::GetUserForSerialNumber {
            serial,
        };
        let handle = self.invoke(
            &lookup,
            CallMode::Callback,
            |backend| backend.user_for_serial_number(serial),
            |raw| match raw {
                Some(handle) if handle.is_valid() => Ok(handle),
                other => Err(InvalidResult::unresolved_user(&self.namespace, serial, other)),
            },
        )?;
        self.remove_user(&handle)
    }

    fn user_restrictions(&self) -> BTreeSet<RestrictionKey> {
        self.audit_query("getUserRestrictions");
        self.backend.user_restrictions()
    }

    fn set_user_restriction(
        &self,
        key: &RestrictionKey,
        enabled: bool,
    ) -> Result<(), GatewayError> {
        self.apply_restriction(key, enabled, CallMode::Callback)
    }

    fn set_user_restriction_best_effort(&self, key: &RestrictionKey, enabled: bool) {
        let _ = self.apply_restriction(key, enabled, CallMode::BestEffort);
    }

    fn has_user_restriction(&self, key: &RestrictionKey) -> bool {
        self.audit_query("hasUserRestriction");
        self.backend.has_user_restriction(key)
    }

    fn lock_now(&self) -> Result<(), GatewayError> {
        self.invoke_void(&GatewayMethod::LockNow, CallMode::Callback, B::lock_now)
    }

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), GatewayError> {
        let method = GatewayMethod::WipeData {
            flags,
        };
        self.invoke_void(&method, CallMode::Callback, |backend| backend.wipe_data(flags))
    }

    fn request_bugreport(&self) -> Result<(), GatewayError> {
        self.invoke_void(
            &GatewayMethod::RequestBugreport,
            CallMode::Callback,
            B::request_bugreport,
        )
    }

    fn set_network_logging(&self, enabled: bool) -> Result<(), GatewayError> {
        self.apply_network_logging(enabled, CallMode::Callback)
    }

    fn set_network_logging_best_effort(&self, enabled: bool) {
        let _ = self.apply_network_logging(enabled, CallMode::BestEffort);
    }
}
