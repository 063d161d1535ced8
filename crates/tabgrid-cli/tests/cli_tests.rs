//! CLI integration tests.
//!
//! These run the `tabgrid` binary with the stub recognizer and an explicit
//! renderer path so no system wkhtmltoimage or tesseract install is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn tabgrid() -> Command {
    Command::cargo_bin("tabgrid").expect("binary should build")
}

#[test]
fn help_lists_subcommands() {
    tabgrid()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn process_writes_result_json_for_table_free_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(
        input.path().join("plain.html"),
        "<html><body><p>no tables</p></body></html>",
    )
    .unwrap();

    tabgrid()
        .args(["--stub-ocr", "--renderer-bin", "/bin/true"])
        .args(["--input-dir", input.path().to_str().unwrap()])
        .args(["--output-dir", output.path().to_str().unwrap()])
        .args(["process", "plain.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain.html: 0 table(s)"));

    let json = std::fs::read_to_string(output.path().join("plain.tables.json")).unwrap();
    assert!(json.contains("\"tables\": []"));
}

#[test]
fn missing_document_is_reported_not_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    tabgrid()
        .args(["--stub-ocr", "--renderer-bin", "/bin/true"])
        .args(["--input-dir", input.path().to_str().unwrap()])
        .args(["--output-dir", output.path().to_str().unwrap()])
        .args(["process", "missing.htm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 processed, 1 failed"));

    let json = std::fs::read_to_string(output.path().join("missing.tables.json")).unwrap();
    assert!(json.contains("failed to read document"));
}

#[test]
fn batch_on_empty_input_dir_reports_nothing_to_do() {
    let input = tempfile::tempdir().unwrap();

    tabgrid()
        .args(["--stub-ocr", "--renderer-bin", "/bin/true"])
        .args(["--input-dir", input.path().to_str().unwrap()])
        .arg("batch")
        .assert()
        .success()
        .stdout(predicate::str::contains("no documents found"));
}

#[test]
fn invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tabgrid.toml");
    std::fs::write(&config, "input_dir = [not toml").unwrap();

    tabgrid()
        .args(["--config", config.to_str().unwrap()])
        .args(["--stub-ocr", "--renderer-bin", "/bin/true"])
        .arg("batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn config_file_supplies_directories() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(
        input.join("doc.html"),
        "<html><body><p>plain</p></body></html>",
    )
    .unwrap();

    let config = dir.path().join("tabgrid.toml");
    std::fs::write(
        &config,
        format!(
            "input_dir = {:?}\noutput_dir = {:?}\n",
            input.to_str().unwrap(),
            output.to_str().unwrap()
        ),
    )
    .unwrap();

    tabgrid()
        .args(["--config", config.to_str().unwrap()])
        .args(["--stub-ocr", "--renderer-bin", "/bin/true"])
        .arg("batch")
        .assert()
        .success()
        .stdout(predicate::str::contains("doc.html: 0 table(s)"));

    assert!(output.join("doc.tables.json").exists());
}

#[test]
#[cfg(not(feature = "tesseract"))]
fn process_without_ocr_engine_suggests_stub() {
    let input = tempfile::tempdir().unwrap();

    tabgrid()
        .args(["--renderer-bin", "/bin/true"])
        .args(["--input-dir", input.path().to_str().unwrap()])
        .args(["process", "doc.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stub-ocr"));
}
