use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "File Path,Field Name,Text Extraction,Table No,Row No,Column No\n";

fn docfield(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docfield").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn workspace(rules: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("rules.csv"), rules).unwrap();
    dir
}

#[test]
fn test_missing_column_fails() {
    let dir = workspace("File Path,Field Name\na.pdf,Total\n");
    let output = dir.path().join("out.csv");

    docfield(dir.path())
        .arg("extract")
        .arg("-d")
        .arg(dir.path().join("docs"))
        .arg("-c")
        .arg(dir.path().join("rules.csv"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Text Extraction"));

    assert!(!output.exists());
}

#[test]
fn test_missing_directory_fails() {
    let dir = workspace(HEADER);

    docfield(dir.path())
        .arg("extract")
        .arg("-d")
        .arg(dir.path().join("nowhere"))
        .arg("-c")
        .arg(dir.path().join("rules.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_unregistered_files_produce_header_only_output() {
    let dir = workspace(&format!("{HEADER}other.pdf,Date,\\d+,,,\n"));
    let output = dir.path().join("out.csv");

    docfield(dir.path())
        .arg("extract")
        .arg("-d")
        .arg(dir.path().join("docs"))
        .arg("-c")
        .arg(dir.path().join("rules.csv"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Results written to"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Field Name,File Extracted Path,Value\n"
    );
}

#[test]
fn test_unreadable_pdf_yields_blank_value() {
    let dir = workspace(&format!("{HEADER}broken.pdf,Date,\\d+,,,\n"));
    let pdf = dir.path().join("docs").join("broken.pdf");
    fs::write(&pdf, b"not a pdf").unwrap();
    let output = dir.path().join("out.json");

    docfield(dir.path())
        .arg("extract")
        .arg("-d")
        .arg(dir.path().join("docs"))
        .arg("-c")
        .arg(dir.path().join("rules.csv"))
        .arg("-o")
        .arg(&output)
        .arg("-f")
        .arg("json")
        .assert()
        .success();

    let results: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(results[0]["Field Name"], "Date");
    assert_eq!(results[0]["Value"], serde_json::Value::Null);
    assert_eq!(results[0]["File Extracted Path"], pdf.to_str().unwrap());
}

#[test]
fn test_unsupported_rule_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rules.txt"), HEADER).unwrap();

    docfield(dir.path())
        .arg("extract")
        .arg("-d")
        .arg(dir.path())
        .arg("-c")
        .arg(dir.path().join("rules.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported rule set format"));
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    docfield(dir.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config["matching"]["context_lines"], 10);
    assert_eq!(config["resolution"]["policy"], "anchor_fallback");

    docfield(dir.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_tables_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    docfield(dir.path())
        .arg("tables")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_get_reads_the_given_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, r#"{"tables": {"strategy": "stream"}}"#).unwrap();

    docfield(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "tables.strategy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stream\""));

    docfield(dir.path())
        .args(["config", "get", "tables.strategy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lattice\""));
}

#[test]
fn test_config_get_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();

    docfield(dir.path())
        .args(["config", "get", "tables.min_columns"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Known keys under 'tables'"));
}

#[test]
fn test_config_show_marks_changed_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, r#"{"matching": {"context_lines": 4}}"#).unwrap();

    docfield(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded from"))
        .stdout(predicate::str::contains("matching.context_lines = 4 (changed)"))
        .stdout(predicate::str::contains("tables.strategy = \"lattice\"\n"));
}
