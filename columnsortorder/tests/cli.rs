//! CLI tests for the `columnsortorder` binary.
//!
//! Spawns the binary in a temporary directory and checks stdout and exit
//! status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CATALOG: &str = r#"
[[columns]]
class = 'core_question\local\bank\checkbox_column'
name = "checkbox"
title = "Select"

[[columns]]
class = 'qbank_viewquestiontype\question_type_column'
name = "qtype"
title = "T"

[[columns]]
class = 'qbank_editquestion\edit_menu_column'
name = "editmenu"
title = "Actions"
visible = false
"#;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_columnsortorder"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run columnsortorder")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn set_order_then_show() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run(temp.path(), &["set-order", "qbank_a\\col_x", "qbank_b\\col_y"]);
    assert!(output.status.success());

    let output = run(temp.path(), &["show"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "enabled: qbank_a\\col_x\nenabled: qbank_b\\col_y\n"
    );
}

#[test]
fn disable_moves_column_and_sort_reflects_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let set = run(
        temp.path(),
        &[
            "set-order",
            "qbank_a\\col_x",
            "qbank_b\\col_y",
            "core_question\\local\\bank\\checkbox_column",
        ],
    );
    assert!(set.status.success());

    let disable = run(temp.path(), &["disable", "qbank_b"]);
    assert!(disable.status.success());

    let show = run(temp.path(), &["show"]);
    assert_eq!(
        stdout(&show),
        "enabled: qbank_a\\col_x\nenabled: core_question\\local\\bank\\checkbox_column\ndisabled: qbank_b\\col_y\n"
    );

    let sort = run(temp.path(), &["sort", "col_z=0", "checkbox_column=5"]);
    assert!(sort.status.success());
    assert_eq!(stdout(&sort), "checkbox_column=5\ncol_x=0\ncol_z=0\n");
}

#[test]
fn disabled_listing_uses_catalog_titles() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("columns.toml"), CATALOG).expect("write catalog");
    fs::write(
        temp.path().join("columnsortorder.toml"),
        "[qbank_columnsortorder]\ncolumnsortorderdisabled = 'qbank_gone\\ghost,qbank_editquestion\\edit_menu_column'\n",
    )
    .expect("write config");

    let output = run(temp.path(), &["disabled", "--catalog", "columns.toml"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Actions\n");
}

#[test]
fn columns_json_skips_checkbox() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("columns.toml"), CATALOG).expect("write catalog");

    let output = run(temp.path(), &["columns", "--json", "--catalog", "columns.toml"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(
        parsed,
        serde_json::json!([{
            "class": "qbank_viewquestiontype\\question_type_column",
            "name": "T",
            "colname": "question_type_column"
        }])
    );
}

#[test]
fn columns_without_catalog_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run(temp.path(), &["columns"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("requires --catalog"));
}
