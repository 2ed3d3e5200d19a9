//! Config validation tests for policy-gateway-config.
// crates/policy-gateway-config/tests/validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate gateway, audit, and backend constraints.
// Purpose: Ensure invalid configuration fails closed with a clear message.
// =============================================================================

use std::path::PathBuf;

use policy_gateway_config::AuditSinkType;

mod common;

use crate::common::TestResult;
use crate::common::assert_invalid;
use crate::common::config_from_toml;
use crate::common::minimal_config;

#[test]
fn defaults_are_valid() -> TestResult {
    let config = minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.gateway.namespace != "DPM" {
        return Err(format!("unexpected namespace {}", config.gateway.namespace));
    }
    if config.audit.sink != AuditSinkType::None || config.backend.max_users != 4 {
        return Err("unexpected defaults".to_string());
    }
    Ok(())
}

#[test]
fn namespace_rejects_empty() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.gateway.namespace = String::new();
    assert_invalid(config.validate(), "gateway.namespace must be non-empty")
}

#[test]
fn namespace_rejects_punctuation() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.gateway.namespace = "DPM.v2".to_string();
    assert_invalid(config.validate(), "ascii alphanumeric or underscore")
}

#[test]
fn namespace_rejects_overlong() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.gateway.namespace = "N".repeat(33);
    assert_invalid(config.validate(), "gateway.namespace exceeds 32 characters")
}

#[test]
fn file_sink_requires_path() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.audit.sink = AuditSinkType::File;
    assert_invalid(config.validate(), "file audit sink requires path")
}

#[test]
fn stderr_sink_rejects_path() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.audit.sink = AuditSinkType::Stderr;
    config.audit.path = Some(PathBuf::from("audit.jsonl"));
    assert_invalid(config.validate(), "audit.path is only valid for the file sink")
}

#[test]
fn file_sink_rejects_blank_path() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.audit.sink = AuditSinkType::File;
    config.audit.path = Some(PathBuf::from("  "));
    assert_invalid(config.validate(), "audit.path must be non-empty")
}

#[test]
fn max_users_rejects_zero() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.max_users = 0;
    assert_invalid(config.validate(), "backend.max_users must be between 1 and 1024")
}

#[test]
fn max_users_rejects_above_limit() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.max_users = 1024;
    config.validate().map_err(|err| err.to_string())?;
    config.backend.max_users = 1025;
    assert_invalid(config.validate(), "backend.max_users must be between 1 and 1024")
}

#[test]
fn audit_path_rejects_surrounding_whitespace() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.audit.sink = AuditSinkType::File;
    config.audit.path = Some(PathBuf::from(" audit.jsonl "));
    assert_invalid(config.validate(), "audit.path must not have surrounding whitespace")
}

#[test]
fn restriction_key_length_counts_characters() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.restrictions = vec!["б".repeat(128)];
    config.validate().map_err(|err| err.to_string())?;
    config.backend.restrictions = vec!["б".repeat(129)];
    assert_invalid(config.validate(), "backend.restrictions entry exceeds 128 characters")
}

#[test]
fn restriction_key_rejects_overlong_ascii() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.restrictions = vec!["k".repeat(129)];
    assert_invalid(config.validate(), "backend.restrictions entry exceeds 128 characters")
}

#[test]
fn restrictions_reject_too_many_entries() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.restrictions = (0 .. 256).map(|index| format!("key_{index}")).collect();
    config.validate().map_err(|err| err.to_string())?;
    config.backend.restrictions.push("key_256".to_string());
    assert_invalid(config.validate(), "backend.restrictions exceeds 256 entries")
}

#[test]
fn restrictions_reject_duplicates() -> TestResult {
    let config = config_from_toml(
        r#"
[backend]
restrictions = ["no_sms", " no_sms "]
"#,
    )
    .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "duplicate key: no_sms")
}

#[test]
fn restrictions_reject_blank_entries() -> TestResult {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.backend.restrictions = vec![String::new()];
    assert_invalid(config.validate(), "backend.restrictions entries must be non-empty")
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    match config_from_toml("[gateway]\nnamespcae = \"DPM\"\n") {
        Err(err) if err.to_string().contains("unknown field") => Ok(()),
        Err(err) => Err(format!("unexpected error {err}")),
        Ok(_) => Err("expected parse failure".to_string()),
    }
}
