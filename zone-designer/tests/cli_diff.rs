use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn diff_against(existing: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zone-designer"));
    cmd.arg("diff")
        .arg("-i")
        .arg(fixture("fixtures/initiators.txt"))
        .arg("-t")
        .arg(fixture("fixtures/targets.txt"))
        .arg("-e")
        .arg(fixture(existing));
    cmd
}

#[test]
fn text_diff_marks_each_zone() {
    diff_against("fixtures/existing_cisco.txt")
        .args(["--vsan", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- legacy__esx09_hba0 [esx09_hba0, legacy]"))
        .stdout(predicate::str::contains("+ pure01_ct0_fc0__esx02_hba0"))
        .stdout(predicate::str::contains("~ pure01_ct1_fc0__esx01_hba0"))
        .stdout(predicate::str::contains("= pure01_ct0_fc0__esx01_hba0"));
}

#[test]
fn cisco_diff_runs_without_vsan() {
    diff_against("fixtures/existing_cisco.txt")
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "added=2 removed=1 modified=1 unchanged=1",
        ));
}

#[test]
fn pairs_file_limits_compared_zones() {
    diff_against("fixtures/existing_cisco.txt")
        .arg("--pairs")
        .arg(fixture("fixtures/pairs.yaml"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged=1"));
}

#[test]
fn summary_prints_counts_only() {
    diff_against("fixtures/existing_cisco.txt")
        .args(["--vsan", "100", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "added=2 removed=1 modified=1 unchanged=1\n",
        ));
}

#[test]
fn json_report_carries_entries_and_summary() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("diff.json");

    let output = diff_against("fixtures/existing_cisco.txt")
        .args(["--vsan", "100", "--format", "json"])
        .arg("--report")
        .arg(&report)
        .output()
        .expect("run diff");
    assert!(output.status.success());

    let stdout: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(stdout["summary"]["added"], 2);
    assert_eq!(stdout["entries"][0]["status"], "removed");
    assert_eq!(stdout["entries"][0]["zone_name"], "legacy__esx09_hba0");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report written"))
            .expect("report is json");
    assert_eq!(written, stdout);
}

#[test]
fn brocade_cfgshow_is_reconciled() {
    diff_against("fixtures/existing_cfgshow.txt")
        .args(["--vendor", "brocade", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "added=2 removed=0 modified=0 unchanged=2",
        ));
}

#[test]
fn missing_existing_file_fails() {
    diff_against("fixtures/does-not-exist.txt")
        .args(["--vsan", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
