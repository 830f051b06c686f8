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

fn import() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zone-designer"));
    cmd.arg("import");
    cmd
}

#[test]
fn cisco_running_config_is_listed() {
    import()
        .arg(fixture("fixtures/existing_cisco.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("grammar: cisco zone name"))
        .stdout(predicate::str::contains("zones: 3"))
        .stdout(predicate::str::contains(
            "legacy__esx09_hba0 [esx09_hba0, legacy]",
        ));
}

#[test]
fn cfgshow_json_names_the_grammar() {
    import()
        .arg(fixture("fixtures/existing_cfgshow.txt"))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grammar\": \"brocade_cfgshow\""));
}

#[test]
fn unrecognized_text_is_a_warning() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("notes.txt");
    fs::write(&input, "nothing to see here\n").expect("write");

    import()
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "no recognizable zone definitions found in input",
        ))
        .stdout(predicate::str::contains("grammar: unrecognized"));
}
