// crates/policy-gateway-core/src/runtime/backend.rs
// ============================================================================
// Module: In-Memory Administrative Backend
// Description: Deterministic backend implementation for tests and demos.
// Purpose: Exercise the gateway contract without a privileged device service.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryAdminBackend`] keeps users, restrictions, and device toggles in
//! a mutex-protected table. It reproduces the return conventions of a real
//! device service: creation past capacity yields no handle, removing an
//! unknown user returns `false`, and serial numbers of removed users no longer
//! resolve. Faults can be injected per primitive to drive error paths. It is
//! not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::core::BackendError;
use crate::core::CreateUserFlags;
use crate::core::RestrictionKey;
use crate::core::UserHandle;
use crate::core::UserSerialNumber;
use crate::core::WipeFlags;
use crate::interfaces::AdminBackend;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of managed users the backend accepts.
pub const DEFAULT_MAX_USERS: usize = 4;
/// First user id handed out to managed users.
const FIRST_USER_ID: i32 = 10;
/// First serial number handed out to managed users.
const FIRST_SERIAL_NUMBER: i64 = 1;
/// Maximum number of recorded primitive calls; older entries are evicted.
pub const MAX_CALL_LOG_ENTRIES: usize = 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Fallible backend primitive, used for fault injection and call tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BackendCall {
    /// [`AdminBackend::create_and_manage_user`].
    CreateAndManageUser,
    /// [`AdminBackend::remove_user`].
    RemoveUser,
    /// [`AdminBackend::user_for_serial_number`].
    UserForSerialNumber,
    /// [`AdminBackend::add_user_restriction`].
    AddUserRestriction,
    /// [`AdminBackend::clear_user_restriction`].
    ClearUserRestriction,
    /// [`AdminBackend::lock_now`].
    LockNow,
    /// [`AdminBackend::wipe_data`].
    WipeData,
    /// [`AdminBackend::request_bugreport`].
    RequestBugreport,
    /// [`AdminBackend::set_network_logging_enabled`].
    SetNetworkLoggingEnabled,
}

/// Managed user provisioned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedUser {
    /// User handle.
    pub handle: UserHandle,
    /// Stable serial number.
    pub serial: UserSerialNumber,
    /// Display name given at creation.
    pub name: Option<String>,
    /// Creation flags.
    pub flags: CreateUserFlags,
}

/// Mutable device state.
#[derive(Debug)]
struct DeviceState {
    /// Managed users keyed by serial number.
    users: BTreeMap<UserSerialNumber, ManagedUser>,
    /// Next user id to allocate.
    next_user_id: i32,
    /// Next serial number to allocate.
    next_serial: i64,
    /// Maximum number of managed users.
    max_users: usize,
    /// Enforced restrictions.
    restrictions: BTreeSet<RestrictionKey>,
    /// Number of completed lock requests.
    lock_count: u64,
    /// Number of completed bug report requests.
    bugreport_count: u64,
    /// Flags of the most recent wipe.
    last_wipe: Option<WipeFlags>,
    /// Network logging state.
    network_logging: bool,
    /// Injected faults by primitive.
    faults: BTreeMap<BackendCall, BackendError>,
    /// Most recent primitives invoked, oldest first.
    calls: VecDeque<BackendCall>,
}

impl DeviceState {
    /// Creates an empty device state.
    const fn new(max_users: usize) -> Self {
        Self {
            users: BTreeMap::new(),
            next_user_id: FIRST_USER_ID,
            next_serial: FIRST_SERIAL_NUMBER,
            max_users,
            restrictions: BTreeSet::new(),
            lock_count: 0,
            bugreport_count: 0,
            last_wipe: None,
            network_logging: false,
            faults: BTreeMap::new(),
            calls: VecDeque::new(),
        }
    }

    /// Records a call and returns its injected fault, if any.
    fn enter(&mut self, call: BackendCall) -> Result<(), BackendError> {
        if self.calls.len() == MAX_CALL_LOG_ENTRIES {
            self.calls.pop_front();
        }
        self.calls.push_back(call);
        self.faults.get(&call).map_or(Ok(()), |fault| Err(fault.clone()))
    }
}

// ============================================================================
// SECTION: In-Memory Backend
// ============================================================================

/// In-memory administrative backend for tests and examples.
#[derive(Debug, Clone)]
pub struct InMemoryAdminBackend {
    /// Device state protected by a mutex.
    state: Arc<Mutex<DeviceState>>,
}

impl Default for InMemoryAdminBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdminBackend {
    /// Creates a backend with the default user capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_users(DEFAULT_MAX_USERS)
    }

    /// Creates a backend accepting at most `max_users` managed users.
    #[must_use]
    pub fn with_max_users(max_users: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState::new(max_users))),
        }
    }

    /// Seeds the enforced restriction set.
    #[must_use]
    pub fn with_restrictions(self, keys: impl IntoIterator<Item = RestrictionKey>) -> Self {
        self.state().restrictions.extend(keys);
        self
    }

    /// Makes every subsequent call to `call` fail with `fault`.
    pub fn inject_fault(&self, call: BackendCall, fault: BackendError) {
        self.state().faults.insert(call, fault);
    }

    /// Removes an injected fault.
    pub fn clear_fault(&self, call: BackendCall) {
        self.state().faults.remove(&call);
    }

    /// Returns the most recent primitives invoked, in order.
    ///
    /// At most [`MAX_CALL_LOG_ENTRIES`] calls are retained.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state().calls.iter().copied().collect()
    }

    /// Returns the managed users ordered by serial number.
    #[must_use]
    pub fn users(&self) -> Vec<ManagedUser> {
        self.state().users.values().cloned().collect()
    }

    /// Returns the serial number of a live user.
    #[must_use]
    pub fn serial_number_for(&self, handle: UserHandle) -> Option<UserSerialNumber> {
        self.state().users.values().find(|user| user.handle == handle).map(|user| user.serial)
    }

    /// Returns the number of completed lock requests.
    #[must_use]
    pub fn lock_count(&self) -> u64 {
        self.state().lock_count
    }

    /// Returns the number of completed bug report requests.
    #[must_use]
    pub fn bugreport_count(&self) -> u64 {
        self.state().bugreport_count
    }

    /// Returns the flags of the most recent wipe.
    #[must_use]
    pub fn last_wipe(&self) -> Option<WipeFlags> {
        self.state().last_wipe
    }

    /// Returns whether network logging is enabled.
    #[must_use]
    pub fn network_logging_enabled(&self) -> bool {
        self.state().network_logging
    }

    /// Locks state for infallible access, recovering from poisoning.
    fn state(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks state for a fallible primitive.
    fn checked_state(&self) -> Result<MutexGuard<'_, DeviceState>, BackendError> {
        self.state
            .lock()
            .map_err(|_| BackendError::IllegalState("admin backend state poisoned".to_string()))
    }
}

impl AdminBackend for InMemoryAdminBackend {
    fn create_and_manage_user(
        &self,
        name: Option<&str>,
        flags: CreateUserFlags,
    ) -> Result<Option<UserHandle>, BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::CreateAndManageUser)?;
        if state.users.len() >= state.max_users {
            return Ok(None);
        }
        let handle = UserHandle::from_raw(state.next_user_id);
        let serial = UserSerialNumber::from_raw(state.next_serial);
        state.next_user_id += 1;
        state.next_serial += 1;
        state.users.insert(
            serial,
            ManagedUser {
                handle,
                serial,
                name: name.map(str::to_string),
                flags,
            },
        );
        drop(state);
        Ok(Some(handle))
    }

    fn remove_user(&self, handle: &UserHandle) -> Result<bool, BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::RemoveUser)?;
        let serial =
            state.users.values().find(|user| user.handle == *handle).map(|user| user.serial);
        Ok(serial.is_some_and(|serial| state.users.remove(&serial).is_some()))
    }

    fn user_for_serial_number(
        &self,
        serial: UserSerialNumber,
    ) -> Result<Option<UserHandle>, BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::UserForSerialNumber)?;
        Ok(state.users.get(&serial).map(|user| user.handle))
    }

    fn user_restrictions(&self) -> BTreeSet<RestrictionKey> {
        self.state().restrictions.clone()
    }

    fn has_user_restriction(&self, key: &RestrictionKey) -> bool {
        self.state().restrictions.contains(key)
    }

    fn add_user_restriction(&self, key: &RestrictionKey) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::AddUserRestriction)?;
        state.restrictions.insert(key.clone());
        drop(state);
        Ok(())
    }

    fn clear_user_restriction(&self, key: &RestrictionKey) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::ClearUserRestriction)?;
        state.restrictions.remove(key);
        drop(state);
        Ok(())
    }

    fn lock_now(&self) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::LockNow)?;
        state.lock_count += 1;
        drop(state);
        Ok(())
    }

    fn wipe_data(&self, flags: WipeFlags) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::WipeData)?;
        state.last_wipe = Some(flags);
        drop(state);
        Ok(())
    }

    fn request_bugreport(&self) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::RequestBugreport)?;
        state.bugreport_count += 1;
        drop(state);
        Ok(())
    }

    fn set_network_logging_enabled(&self, enabled: bool) -> Result<(), BackendError> {
        let mut state = self.checked_state()?;
        state.enter(BackendCall::SetNetworkLoggingEnabled)?;
        state.network_logging = enabled;
        drop(state);
        Ok(())
    }
}
