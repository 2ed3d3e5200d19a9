// crates/policy-gateway-config/src/config.rs
// ============================================================================
// Module: Policy Gateway Configuration
// Description: Configuration loading, validation, and runtime wiring.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: policy-gateway-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed. A validated configuration
//! builds the audit sink, the in-memory reference backend, and a gateway
//! carrying the configured namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use policy_gateway_core::AdminBackend;
use policy_gateway_core::DEFAULT_NAMESPACE;
use policy_gateway_core::DevicePolicyGateway;
use policy_gateway_core::FileAuditSink;
use policy_gateway_core::GatewayAuditSink;
use policy_gateway_core::InMemoryAdminBackend;
use policy_gateway_core::NoopAuditSink;
use policy_gateway_core::RestrictionKey;
use policy_gateway_core::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "policy-gateway.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "POLICY_GATEWAY_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum namespace label length.
pub(crate) const MAX_NAMESPACE_LENGTH: usize = 32;
/// Default in-memory backend user capacity.
pub(crate) const DEFAULT_MAX_USERS: usize = policy_gateway_core::runtime::DEFAULT_MAX_USERS;
/// Maximum in-memory backend user capacity.
pub(crate) const MAX_MAX_USERS: usize = 1024;
/// Maximum number of seeded restrictions.
pub(crate) const MAX_RESTRICTIONS: usize = 256;
/// Maximum restriction key length.
pub(crate) const MAX_RESTRICTION_KEY_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Policy Gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Gateway settings.
    #[serde(default)]
    pub gateway: GatewaySection,
    /// Audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// In-memory backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    /// Namespace label prefixed to invalid-result diagnostics.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl GatewaySection {
    /// Validates gateway settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let namespace = self.namespace.as_str();
        if namespace.is_empty() {
            return Err(ConfigError::Invalid("gateway.namespace must be non-empty".to_string()));
        }
        if namespace.len() > MAX_NAMESPACE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "gateway.namespace exceeds {MAX_NAMESPACE_LENGTH} characters"
            )));
        }
        if !namespace.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(ConfigError::Invalid(
                "gateway.namespace must be ascii alphanumeric or underscore".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkType {
    /// Drop audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkType,
    /// Log file path (file sink only).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkType::File, None) => {
                Err(ConfigError::Invalid("file audit sink requires path".to_string()))
            }
            (AuditSinkType::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

/// In-memory backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Maximum number of managed users.
    #[serde(default = "default_max_users")]
    pub max_users: usize,
    /// Restrictions enforced at startup.
    #[serde(default)]
    pub restrictions: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            max_users: default_max_users(),
            restrictions: Vec::new(),
        }
    }
}

impl BackendConfig {
    /// Validates backend settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_users == 0 || self.max_users > MAX_MAX_USERS {
            return Err(ConfigError::Invalid(format!(
                "backend.max_users must be between 1 and {MAX_MAX_USERS}"
            )));
        }
        if self.restrictions.len() > MAX_RESTRICTIONS {
            return Err(ConfigError::Invalid(format!(
                "backend.restrictions exceeds {MAX_RESTRICTIONS} entries"
            )));
        }
        let mut seen = BTreeSet::new();
        for key in &self.restrictions {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid(
                    "backend.restrictions entries must be non-empty".to_string(),
                ));
            }
            if trimmed.chars().count() > MAX_RESTRICTION_KEY_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "backend.restrictions entry exceeds {MAX_RESTRICTION_KEY_LENGTH} characters"
                )));
            }
            if !seen.insert(trimmed) {
                return Err(ConfigError::Invalid(format!(
                    "backend.restrictions contains duplicate key: {trimmed}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Loading and Wiring
// ============================================================================

impl GatewayConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.audit.validate()?;
        self.backend.validate()?;
        Ok(())
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn GatewayAuditSink>, ConfigError> {
        match (self.audit.sink, &self.audit.path) {
            (AuditSinkType::None, _) => Ok(Arc::new(NoopAuditSink)),
            (AuditSinkType::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditSinkType::File, Some(path)) => {
                let sink =
                    FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (AuditSinkType::File, None) => {
                Err(ConfigError::Invalid("file audit sink requires path".to_string()))
            }
        }
    }

    /// Builds the in-memory reference backend.
    #[must_use]
    pub fn build_in_memory_backend(&self) -> InMemoryAdminBackend {
        InMemoryAdminBackend::with_max_users(self.backend.max_users).with_restrictions(
            self.backend.restrictions.iter().map(|key| RestrictionKey::new(key.trim())),
        )
    }

    /// Builds a gateway over `backend` with the configured namespace and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit sink cannot be built.
    pub fn build_gateway<B: AdminBackend>(
        &self,
        backend: B,
    ) -> Result<DevicePolicyGateway<B>, ConfigError> {
        let audit = self.build_audit_sink()?;
        Ok(DevicePolicyGateway::new(backend)
            .with_namespace(self.gateway.namespace.clone())
            .with_audit_sink(audit))
    }
}

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default namespace label.
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Default in-memory backend capacity.
const fn default_max_users() -> usize {
    DEFAULT_MAX_USERS
}

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() != value.len() {
        return Err(ConfigError::Invalid(format!("{field} must not have surrounding whitespace")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
