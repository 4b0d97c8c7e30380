use std::path::PathBuf;

use labsev_cohort::source::ColumnConvention;
use labsev_core::models::patient::AdmissionId;
use labsev_dashboard::config::{
    load_config_from, peek_log_format, save_config_to, DashboardConfig,
};
use labsev_dashboard::logging::LogFormat;

#[test]
fn save_then_load_keeps_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = DashboardConfig::new("/data/cohort.csv");
    config.column_convention = ColumnConvention::Lab;
    config.selected_admission = Some(AdmissionId(42));
    config.log_format = LogFormat::Json;
    save_config_to(&path, &config).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.data_path, PathBuf::from("/data/cohort.csv"));
    assert_eq!(loaded.column_convention, ColumnConvention::Lab);
    assert_eq!(loaded.selected_admission, Some(AdmissionId(42)));
    assert_eq!(loaded.log_format, LogFormat::Json);
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"parquet_path": "/data/NB06.json"}"#).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.data_path, PathBuf::from("/data/NB06.json"));
    assert_eq!(loaded.column_convention, ColumnConvention::Auto);
    assert_eq!(loaded.selected_admission, None);
    assert_eq!(loaded.log_format, LogFormat::Pretty);
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version": 99, "data_path": "x.csv", "created_at": "2026-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(&dir.path().join("absent.json")).is_err());
}

#[test]
fn source_carries_convention() {
    let mut config = DashboardConfig::new("cohort.json");
    config.column_convention = ColumnConvention::Final;
    let source = config.source();
    assert_eq!(source.path, PathBuf::from("cohort.json"));
    assert_eq!(source.convention, ColumnConvention::Final);
}

#[test]
fn log_format_is_readable_before_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"parquet_path": "x.json", "log_format": "json"}"#).unwrap();

    assert_eq!(peek_log_format(&path), LogFormat::Json);
    assert_eq!(peek_log_format(&dir.path().join("absent.json")), LogFormat::Pretty);
}
