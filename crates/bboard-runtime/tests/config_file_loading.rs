#![forbid(unsafe_code)]
#![cfg(feature = "config")]

//! Loading [`BlackboardConfig`] from files on disk.

use std::io::Write;

use bboard_runtime::{BlackboardConfig, ConfigError};

#[test]
fn toml_file_loads_and_validates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[undo]
max_depth = 25

[panel]
title = "Water"
empty_path_placeholder = "(root)"
edit_created_rows = false

[gesture]
multi_click_timeout_ms = 450
click_tolerance = 2
"#
    )
    .unwrap();

    let config = BlackboardConfig::from_toml_file(file.path())
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(config.undo.max_depth, 25);
    assert_eq!(config.panel.title, "Water");
    assert_eq!(config.panel.empty_path_placeholder, "(root)");
    assert!(!config.panel.edit_created_rows);
    assert!(config.panel.expand_created_rows);
    assert_eq!(
        config.to_click_config().multi_click_timeout.as_millis(),
        450
    );
    assert_eq!(config.to_history_config().max_depth, 25);
}

#[test]
fn json_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"undo": {{"max_depth": 3}}}}"#).unwrap();
    let config = BlackboardConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.undo.max_depth, 3);
    assert_eq!(config.panel, Default::default());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BlackboardConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn invalid_values_are_reported_together() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[undo]\nmax_depth = 0\n[gesture]\nmulti_click_timeout_ms = 0").unwrap();
    let err = BlackboardConfig::from_toml_file(file.path())
        .unwrap()
        .validated()
        .unwrap_err();
    match err {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation errors, got {other}"),
    }
}
