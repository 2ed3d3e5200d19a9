// crates/policy-gateway-core/src/runtime/audit.rs
// ============================================================================
// Module: Gateway Audit Logging
// Description: Structured audit events for gateway operations.
// Purpose: Record every privileged call and its outcome as JSON lines.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every gateway operation produces one [`GatewayAuditEvent`]. Sinks are
//! observers only: recording never fails the operation and never replaces the
//! result returned to the caller. Fire-and-forget operations mark the failures
//! they discard with `swallowed`, which is the only place those failures
//! remain visible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::GatewayError;
use crate::core::GatewayErrorKind;
use crate::core::GatewayMethod;

// ============================================================================
// SECTION: Types
// ============================================================================

/// How the caller consumes an operation's outcome.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMode {
    /// Outcome is routed back to the caller.
    Callback,
    /// Outcome is discarded.
    BestEffort,
    /// Side-effect free accessor.
    Query,
}

/// Operation outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// Operation succeeded.
    Ok,
    /// Operation failed.
    Error,
}

/// Gateway audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Namespace label of the gateway.
    pub namespace: String,
    /// Rendered call, or the accessor name for queries.
    pub method: String,
    /// Consumption mode.
    pub mode: CallMode,
    /// Outcome.
    pub outcome: CallOutcome,
    /// Error classification when the operation failed.
    pub error_kind: Option<GatewayErrorKind>,
    /// Error message when the operation failed.
    pub error: Option<String>,
    /// True when a failure was discarded by a fire-and-forget operation.
    pub swallowed: bool,
}

impl GatewayAuditEvent {
    /// Creates an event for a backend call with a consistent timestamp.
    #[must_use]
    pub fn for_call(
        namespace: &str,
        method: &GatewayMethod,
        mode: CallMode,
        error: Option<&GatewayError>,
    ) -> Self {
        Self::new(namespace, method.to_string(), mode, error)
    }

    /// Creates an event for a restriction query.
    #[must_use]
    pub fn for_query(namespace: &str, accessor: &str) -> Self {
        Self::new(namespace, accessor.to_string(), CallMode::Query, None)
    }

    /// Builds the event and stamps it.
    fn new(namespace: &str, method: String, mode: CallMode, error: Option<&GatewayError>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "gateway_call",
            timestamp_ms,
            namespace: namespace.to_string(),
            method,
            mode,
            outcome: if error.is_some() { CallOutcome::Error } else { CallOutcome::Ok },
            error_kind: error.map(GatewayError::kind),
            error: error.map(ToString::to_string),
            swallowed: error.is_some() && mode == CallMode::BestEffort,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for gateway events.
pub trait GatewayAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &GatewayAuditEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl GatewayAuditSink for NoopAuditSink {
    fn record(&self, _event: &GatewayAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAuditSink;

impl GatewayAuditSink for StderrAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl GatewayAuditSink for FileAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Default number of events retained by [`MemoryAuditSink`].
pub const DEFAULT_MEMORY_AUDIT_CAPACITY: usize = 1024;

/// Audit sink that keeps the most recent events in memory.
#[derive(Debug)]
pub struct MemoryAuditSink {
    /// Captured events, oldest first.
    events: Mutex<VecDeque<GatewayAuditEvent>>,
    /// Maximum number of retained events.
    capacity: usize,
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_AUDIT_CAPACITY)
    }
}

impl MemoryAuditSink {
    /// Creates an empty sink with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink retaining at most `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Returns a copy of the retained events.
    #[must_use]
    pub fn events(&self) -> Vec<GatewayAuditEvent> {
        self.events.lock().map(|guard| guard.iter().cloned().collect()).unwrap_or_default()
    }
}

impl GatewayAuditSink for MemoryAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut guard) = self.events.lock() {
            if guard.len() >= self.capacity {
                guard.pop_front();
            }
            guard.push_back(event.clone());
        }
    }
}
