//! CLI contract tests driving the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("dynaform-tui").expect("binary builds")
}

#[test]
fn self_check_reports_every_form_type() {
    bin()
        .arg("--self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("user-info"))
        .stdout(predicate::str::contains("address"))
        .stdout(predicate::str::contains("payment"));
}

#[test]
fn self_check_emits_valid_json() {
    let output = bin().arg("--self-check").output().expect("runs");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("self-check output is JSON");
    let form_types = report["form_types"].as_array().expect("form_types array");
    assert_eq!(form_types.len(), 3);
    for entry in form_types {
        assert_eq!(entry["rendered"], true);
        assert!(entry["fields"].as_u64().unwrap() >= 3);
    }
}

#[test]
fn rejects_unknown_form_type() {
    bin()
        .args(["--form-type", "payments", "--self-check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("payments"));
}

#[test]
fn help_documents_flags() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--form-type"))
        .stdout(predicate::str::contains("--self-check"))
        .stdout(predicate::str::contains("--log-file"));
}

#[test]
fn log_file_flag_creates_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("dynaform.log");

    bin()
        .args(["--self-check", "--log-file"])
        .arg(&log_path)
        .assert()
        .success();

    assert!(log_path.exists());
}
