// crates/policy-gateway-core/src/core/method.rs
// ============================================================================
// Module: Gateway Method Identity
// Description: Closed set of backend calls with their bound arguments.
// Purpose: Render the exact call that produced a result for diagnostics.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Every backend call the gateway makes is named by a [`GatewayMethod`]
//! variant carrying that call's arguments. Rendering a method yields the
//! method name with its arguments substituted in call order, e.g.
//! `createAndManageUser(work, 1)`. Absent optional arguments render as
//! `null`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde::Serializer;

use crate::core::identifiers::CreateUserFlags;
use crate::core::identifiers::RestrictionKey;
use crate::core::identifiers::UserHandle;
use crate::core::identifiers::UserSerialNumber;
use crate::core::identifiers::WipeFlags;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rendering used for absent optional arguments and null results.
pub const NULL_LITERAL: &str = "null";

// ============================================================================
// SECTION: Gateway Method
// ============================================================================

/// Backend call identity with bound arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayMethod {
    /// Create a managed user.
    CreateAndManageUser {
        /// Optional display name.
        name: Option<String>,
        /// Creation flags.
        flags: CreateUserFlags,
    },
    /// Remove a user by handle.
    RemoveUser {
        /// Target user.
        handle: UserHandle,
    },
    /// Resolve a serial number into a user handle.
    GetUserForSerialNumber {
        /// Serial number being resolved.
        serial: UserSerialNumber,
    },
    /// Enforce a restriction.
    AddUserRestriction {
        /// Restriction key.
        key: RestrictionKey,
    },
    /// Lift a restriction.
    ClearUserRestriction {
        /// Restriction key.
        key: RestrictionKey,
    },
    /// Lock the device immediately.
    LockNow,
    /// Wipe device data.
    WipeData {
        /// Wipe flags.
        flags: WipeFlags,
    },
    /// Capture a bug report.
    RequestBugreport,
    /// Toggle network logging.
    SetNetworkLoggingEnabled {
        /// Requested state.
        enabled: bool,
    },
}

impl GatewayMethod {
    /// Returns the stable method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateAndManageUser {
                ..
            } => "createAndManageUser",
            Self::RemoveUser {
                ..
            } => "removeUser",
            Self::GetUserForSerialNumber {
                ..
            } => "getUserForSerialNumber",
            Self::AddUserRestriction {
                ..
            } => "addUserRestriction",
            Self::ClearUserRestriction {
                ..
            } => "clearUserRestriction",
            Self::LockNow => "lockNow",
            Self::WipeData {
                ..
            } => "wipeData",
            Self::RequestBugreport => "requestBugreport",
            Self::SetNetworkLoggingEnabled {
                ..
            } => "setNetworkLoggingEnabled",
        }
    }

    /// Returns the formatted arguments in call order.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Self::CreateAndManageUser {
                name,
                flags,
            } => vec![name.clone().unwrap_or_else(|| NULL_LITERAL.to_string()), flags.to_string()],
            Self::RemoveUser {
                handle,
            } => vec![handle.to_string()],
            Self::GetUserForSerialNumber {
                serial,
            } => vec![serial.to_string()],
            Self::AddUserRestriction {
                key,
            }
            | Self::ClearUserRestriction {
                key,
            } => vec![key.to_string()],
            Self::WipeData {
                flags,
            } => vec![flags.to_string()],
            Self::SetNetworkLoggingEnabled {
                enabled,
            } => vec![enabled.to_string()],
            Self::LockNow | Self::RequestBugreport => Vec::new(),
        }
    }

    /// Returns the restriction call matching the requested state.
    #[must_use]
    pub fn restriction(key: RestrictionKey, enabled: bool) -> Self {
        if enabled {
            Self::AddUserRestriction {
                key,
            }
        } else {
            Self::ClearUserRestriction {
                key,
            }
        }
    }
}

impl fmt::Display for GatewayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.arguments().join(", "))
    }
}

impl Serialize for GatewayMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
