// crates/policy-gateway-core/tests/common/mod.rs
// =============================================================================
// Module: Gateway Test Helpers
// Description: Shared backends and continuation recorders for gateway tests.
// Purpose: Reduce duplication across integration tests for policy-gateway-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::Mutex;

use policy_gateway_core::AdminBackend;
use policy_gateway_core::BackendError;
use policy_gateway_core::Continuation;
use policy_gateway_core::CreateUserFlags;
use policy_gateway_core::DevicePolicyGateway;
use policy_gateway_core::GatewayError;
use policy_gateway_core::InMemoryAdminBackend;
use policy_gateway_core::MemoryAuditSink;
use policy_gateway_core::RestrictionKey;
use policy_gateway_core::UserHandle;
use policy_gateway_core::UserSerialNumber;
use policy_gateway_core::WipeFlags;

// ============================================================================
// SECTION: Gateways
// ============================================================================

/// Returns a gateway over a fresh in-memory backend plus a handle to both.
pub fn in_memory_gateway()
-> (DevicePolicyGateway<InMemoryAdminBackend>, InMemoryAdminBackend, Arc<MemoryAuditSink>) {
    let backend = InMemoryAdminBackend::new();
    let audit = Arc::new(MemoryAuditSink::new());
    let gateway = DevicePolicyGateway::new(backend.clone()).with_audit_sink(audit.clone());
    (gateway, backend, audit)
}

// ============================================================================
// SECTION: Continuation Recorder
// ============================================================================

/// Which continuation fired, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Fired<T> {
    /// Success continuation fired.
    Success(T),
    /// Error continuation fired.
    Error(GatewayError),
}

/// Records every continuation invocation in order.
pub struct Recorder<T> {
    /// Invocations observed so far.
    fired: Rc<RefCell<Vec<Fired<T>>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            fired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Builds a continuation that reports into this recorder.
    pub fn continuation(&self) -> Continuation<T> {
        let on_success = Rc::clone(&self.fired);
        let on_error = Rc::clone(&self.fired);
        Continuation::new(
            move |value| on_success.borrow_mut().push(Fired::Success(value)),
            move |err| on_error.borrow_mut().push(Fired::Error(err)),
        )
    }

    /// Returns every invocation observed so far.
    pub fn fired(&self) -> Vec<Fired<T>> {
        self.fired.borrow().clone()
    }

    /// Returns the single invocation, failing if zero or several fired.
    pub fn single(&self) -> Fired<T> {
        let fired = self.fired();
        assert_eq!(fired.len(), 1, "expected exactly one continuation to fire");
        fired.into_iter().next().unwrap()
    }

    /// Returns the error of the single invocation, failing on success.
    pub fn single_error(&self) -> GatewayError {
        match self.single() {
            Fired::Error(err) => err,
            Fired::Success(_) => panic!("expected the error continuation"),
        }
    }

    /// Returns the payload of the single invocation, failing on error.
    pub fn single_success(&self) -> T {
        match self.single() {
            Fired::Success(value) => value,
            Fired::Error(err) => panic!("expected the success continuation, got {err}"),
        }
    }
}

// ============================================================================
// SECTION: Scripted Backend
// ============================================================================

/// Backend with fixed return values, for outcomes the in-memory backend never produces.
pub struct ScriptedBackend {
    /// Value returned by user creation.
    pub created: Option<UserHandle>,
    /// Value returned by user removal.
    pub removed: bool,
    /// Value returned by serial-number lookup.
    pub resolved: Option<UserHandle>,
    /// Fault returned by every fallible primitive when set.
    pub fault: Option<BackendError>,
    /// Names of primitives invoked, in order.
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedBackend {
    /// Creates a backend whose calls all succeed.
    pub fn succeeding() -> Self {
        Self {
            created: Some(UserHandle::from_raw(11)),
            removed: true,
            resolved: Some(UserHandle::from_raw(11)),
            fault: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a backend whose fallible calls all fault.
    pub fn faulting(fault: BackendError) -> Self {
        Self {
            fault: Some(fault),
            ..Self::succeeding()
        }
    }

    /// Returns the primitives invoked so far.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Records a call and returns the scripted fault.
    fn enter(&self, name: &'static str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(name);
        self.fault.clone().map_or(Ok(()), Err)
    }
}

impl AdminBackend for ScriptedBackend {
    fn create_and_manage_user(
        &self,
        _name: Option<&str>,
        _flags: CreateUserFlags,
    ) -> Result<Option<UserHandle>, BackendError> {
        self.enter("create_and_manage_user")?;
        Ok(self.created)
    }

    fn remove_user(&self, _handle: &UserHandle) -> Result<bool, BackendError> {
        self.enter("remove_user")?;
        Ok(self.removed)
    }

    fn user_for_serial_number(
        &self,
        _serial: UserSerialNumber,
    ) -> Result<Option<UserHandle>, BackendError> {
        self.enter("user_for_serial_number")?;
        Ok(self.resolved)
    }

    fn user_restrictions(&self) -> BTreeSet<RestrictionKey> {
        BTreeSet::new()
    }

    fn has_user_restriction(&self, _key: &RestrictionKey) -> bool {
        false
    }

    fn add_user_restriction(&self, _key: &RestrictionKey) -> Result<(), BackendError> {
        self.enter("add_user_restriction")
    }

    fn clear_user_restriction(&self, _key: &RestrictionKey) -> Result<(), BackendError> {
        self.enter("clear_user_restriction")
    }

    fn lock_now(&self) -> Result<(), BackendError> {
        self.enter("lock_now")
    }

    fn wipe_data(&self, _flags: WipeFlags) -> Result<(), BackendError> {
        self.enter("wipe_data")
    }

    fn request_bugreport(&self) -> Result<(), BackendError> {
        self.enter("request_bugreport")
    }

    fn set_network_logging_enabled(&self, _enabled: bool) -> Result<(), BackendError> {
        self.enter("set_network_logging_enabled")
    }
}
