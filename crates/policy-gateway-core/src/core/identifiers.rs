// crates/policy-gateway-core/src/core/identifiers.rs
// ============================================================================
// Module: Policy Gateway Identifiers
// Description: Opaque user identifiers, restriction keys, and flag bitmasks.
// Purpose: Provide strongly typed values that cross the gateway boundary.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! User handles and serial numbers are opaque platform values. They are kept
//! as distinct newtypes so that resolving a serial number into a handle is an
//! explicit backend call rather than an implicit conversion. Flag bitmasks
//! carry the well-known platform bits as named constants but accept any value,
//! since the backend owns their interpretation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::ops::BitOr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: User Identifiers
// ============================================================================

/// Opaque reference to a provisioned user.
///
/// # Invariants
/// - Handles with a negative id are placeholders and never name a live user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserHandle(i32);

impl UserHandle {
    /// Placeholder handle the platform returns when no user exists.
    pub const NULL: Self = Self(-10_000);

    /// Creates a handle from a raw user id.
    #[must_use]
    pub const fn from_raw(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw user id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns true when the handle can name a live user.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserHandle{{{}}}", self.0)
    }
}

/// Stable serial number of a user, resolvable to a [`UserHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSerialNumber(i64);

impl UserSerialNumber {
    /// Creates a serial number from its raw value.
    #[must_use]
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw serial number.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserSerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Restriction Keys
// ============================================================================

/// Identifier of an enforceable user restriction (for example `no_install_apps`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionKey(String);

impl RestrictionKey {
    /// Creates a new restriction key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestrictionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RestrictionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RestrictionKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Flag Bitmasks
// ============================================================================

/// Behavior flags for user creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateUserFlags(i32);

impl CreateUserFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Skip the setup wizard for the new user.
    pub const SKIP_SETUP_WIZARD: Self = Self(0x0001);
    /// Create an ephemeral user, removed on logout.
    pub const EPHEMERAL_USER: Self = Self(0x0002);
    /// Leave all system apps enabled for the new user.
    pub const LEAVE_ALL_SYSTEM_APPS_ENABLED: Self = Self(0x0010);

    /// Creates flags from a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Returns true when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for CreateUserFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for CreateUserFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Flags controlling a data wipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WipeFlags(i32);

impl WipeFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Also wipe external storage.
    pub const WIPE_EXTERNAL_STORAGE: Self = Self(0x0001);
    /// Also wipe factory reset protection data.
    pub const WIPE_RESET_PROTECTION_DATA: Self = Self(0x0002);
    /// Also wipe downloaded eUICC profiles.
    pub const WIPE_EUICC: Self = Self(0x0004);
    /// Skip the user-facing wipe notice.
    pub const WIPE_SILENTLY: Self = Self(0x0008);

    /// Creates flags from a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Returns true when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for WipeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for WipeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
