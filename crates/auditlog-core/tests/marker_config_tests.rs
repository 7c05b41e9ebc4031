#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Marker files loaded from disk

use auditlog_core::config::MarkerConfig;
use auditlog_core::{load_markers, AuditLogError, ExError, ExErrorKind, MethodId, Severity};
use std::io::Write;
use tempfile::NamedTempFile;

const BANK_MARKERS: &str = r#"
[[method]]
type = "bank::Account"
method = "transfer"

[method.composite]
business = "transfer"
level = "INFO"

[method.failure]
business = "transfer failed"

[[method]]
type = "bank::Account"
method = "close"
entry = { business = "close", level = "WARN", location = "ENABLED" }
"#;

fn marker_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_markers_from_file() {
    let file = marker_file(BANK_MARKERS);

    let registry = load_markers(file.path()).unwrap();

    assert_eq!(registry.len(), 2);
    let close = registry
        .markers(&MethodId::new("bank::Account", "close"))
        .unwrap();
    assert_eq!(close.entry_marker().unwrap().level, Severity::Warn);
    assert!(close.exit_marker().is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_markers(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, AuditLogError::Io { .. }));
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::Io);
    assert_eq!(ex.code(), "ERR_IO");
}

#[test]
fn test_duplicate_method_entries_rejected() {
    let file = marker_file(
        r#"
        [[method]]
        type = "bank::Account"
        method = "close"
        entry = { business = "close" }

        [[method]]
        type = "bank::Account"
        method = "close"
        entry = { business = "close again" }
        "#,
    );

    let err = load_markers(file.path()).unwrap_err();

    assert!(matches!(err, AuditLogError::DuplicateMarker { .. }));
}

#[test]
fn test_blank_business_name_rejected() {
    let file = marker_file(
        r#"
        [[method]]
        type = "bank::Account"
        method = "close"
        exit = { business = "" }
        "#,
    );

    let err = load_markers(file.path()).unwrap_err();

    assert!(matches!(err, AuditLogError::InvalidMarker { .. }));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = marker_file("[[method]\ntype = ");

    let err = load_markers(file.path()).unwrap_err();

    let ex: ExError = err.into();
    assert_eq!(ex.code(), "ERR_CONFIG");
}

#[test]
fn test_normalised_config_spells_out_defaults() {
    let registry = load_markers(marker_file(BANK_MARKERS).path()).unwrap();

    let normalised = toml::to_string(&MarkerConfig::from_registry(&registry)).unwrap();

    assert!(normalised.contains("location = \"DEFAULT\""));
    assert!(normalised.contains("level = \"INFO\""));
}
