//! CLI integration tests for the `idxsel` binary.
//!
//! Drives the compiled binary as a black box via `std::process::Command`:
//! locate `CARGO_BIN_EXE_idxsel`, write a JSON fixture, assert on stdout
//! and the exit code.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::NamedTempFile;

fn idxsel_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_idxsel"))
}

fn write_fixture(json: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp fixture");
    fs::write(file.path(), json).expect("write fixture");
    file
}

const EDGE_PROGRAM: &str = r#"
{
  "relations": [
    {"name": "edge", "arity": 2, "storage": "btree", "columns": ["src", "dst"]}
  ],
  "operations": [
    {"kind": "scan", "relation": "edge", "columns": 1},
    {"kind": "not_exists", "relation": "edge", "columns": 3}
  ]
}
"#;

#[test]
fn report_mode_prints_the_standard_report_format() {
    let fixture = write_fixture(EDGE_PROGRAM);
    let output = Command::new(idxsel_bin())
        .arg(fixture.path())
        .output()
        .expect("run idxsel");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("------ Auto-Index-Generation Report -------\n"));
    assert!(stdout.contains("Relation edge"));
    assert!(stdout.contains("Number of Search Patterns: 2"));
    assert!(stdout.contains("Number of Indexes: 1"));
    assert!(stdout
        .trim_end()
        .ends_with("------ End of Auto-Index-Generation Report -------"));
}

#[test]
fn json_mode_emits_machine_readable_orders() {
    let fixture = write_fixture(EDGE_PROGRAM);
    let output = Command::new(idxsel_bin())
        .arg("--json")
        .arg(fixture.path())
        .output()
        .expect("run idxsel");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    let relations = parsed.as_array().expect("top-level array");
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0]["relation"], "edge");
    assert_eq!(relations[0]["orders"].as_array().unwrap().len(), 1);
}

#[test]
fn quiet_mode_suppresses_all_output() {
    let fixture = write_fixture(EDGE_PROGRAM);
    let output = Command::new(idxsel_bin())
        .arg("--quiet")
        .arg(fixture.path())
        .output()
        .expect("run idxsel");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn naive_flag_forces_one_index_per_pattern() {
    let fixture = write_fixture(
        r#"
        {
          "relations": [
            {"name": "r", "arity": 4, "storage": "btree", "columns": ["a", "b", "c", "d"]}
          ],
          "operations": [
            {"kind": "scan", "relation": "r", "columns": 1},
            {"kind": "scan", "relation": "r", "columns": 3},
            {"kind": "scan", "relation": "r", "columns": 7}
          ]
        }
        "#,
    );
    let output = Command::new(idxsel_bin())
        .arg("--json")
        .arg("--naive")
        .arg(fixture.path())
        .output()
        .expect("run idxsel");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["orders"].as_array().unwrap().len(), 3);
}

#[test]
fn missing_fixture_file_fails_with_nonzero_exit() {
    let output = Command::new(idxsel_bin())
        .arg("/nonexistent/path/to/program.json")
        .output()
        .expect("run idxsel");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("idxsel:"));
}
