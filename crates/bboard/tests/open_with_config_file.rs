#![forbid(unsafe_code)]
#![cfg(feature = "config")]

//! Opening a panel from configuration files on disk.

use std::io::Write;

use bboard::prelude::*;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn toml_config_drives_panel_policy() {
    let file = write_temp(
        ".toml",
        "[panel]\ntitle = \"Water\"\nedit_created_rows = false\n\n[undo]\nmax_depth = 2\n",
    );
    let mut board = bboard::open_with_config_file(NodeGraph::new(), file.path()).unwrap();
    assert_eq!(board.asset_name(), "Water");

    let id = board.create_property(PropertyKind::Float);
    assert!(!board.is_editing(EditSurface::Property(id)));

    for text in ["a", "b", "c"] {
        board.edit_path(text);
    }
    assert_eq!(board.undo_store().undo_depth(), 2);
}

#[test]
fn json_config_is_detected_by_extension() {
    let file = write_temp(".json", r#"{"panel": {"empty_path_placeholder": "(none)"}}"#);
    let board = bboard::open_with_config_file(NodeGraph::new(), file.path()).unwrap();
    assert_eq!(board.path_text(), "(none)");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = bboard::open_with_config_file(NodeGraph::new(), dir.path().join("absent.toml"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let file = write_temp(".toml", "[gesture]\nmulti_click_timeout_ms = 0\n");
    let err = bboard::open_with_config_file(NodeGraph::new(), file.path()).unwrap_err();
    assert!(err.to_string().contains("multi_click_timeout_ms"));
}
