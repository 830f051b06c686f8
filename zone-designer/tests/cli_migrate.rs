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

fn zone_designer() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("zone-designer"))
}

#[test]
fn initiators_gain_detected_hosts() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("initiators.yaml");

    zone_designer()
        .arg("migrate")
        .arg("-i")
        .arg(fixture("fixtures/initiators.txt"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("migrated 2 initiators"));

    let yaml = fs::read_to_string(&out).expect("yaml written");
    assert!(yaml.starts_with("initiators:"));
    assert!(yaml.contains("host: esx02"));
    assert!(yaml.contains("21:00:00:24:ff:4b:c5:b0"));
}

#[test]
fn grouped_targets_keep_groups() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("targets.yaml");

    zone_designer()
        .arg("migrate")
        .arg("-i")
        .arg(fixture("fixtures/targets_grouped.txt"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("migrated 5 targets"));

    let yaml = fs::read_to_string(&out).expect("yaml written");
    assert!(yaml.contains("group: PURE01"));
    assert!(yaml.contains("storage_array: netapp01"));
}

#[test]
fn unknown_file_name_needs_kind() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("ports.txt");
    fs::write(&input, "H1 21:00:00:00:00:00:00:01\n").expect("write");

    zone_designer()
        .arg("migrate")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("ports.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --kind"));

    zone_designer()
        .arg("migrate")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("ports.yaml"))
        .args(["--kind", "initiators"])
        .assert()
        .success();
}

#[test]
fn migrated_files_generate_the_same_zones() {
    let dir = tempdir().expect("tempdir");
    let initiators = dir.path().join("initiators.yaml");
    let targets = dir.path().join("targets.yaml");

    for (input, output) in [
        ("fixtures/initiators.txt", &initiators),
        ("fixtures/targets.txt", &targets),
    ] {
        zone_designer()
            .arg("migrate")
            .arg("-i")
            .arg(fixture(input))
            .arg("-o")
            .arg(output)
            .assert()
            .success();
    }

    let from_text = zone_designer()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/initiators.txt"))
        .arg("-t")
        .arg(fixture("fixtures/targets.txt"))
        .args(["--vsan", "10"])
        .output()
        .expect("generate from text");
    let from_yaml = zone_designer()
        .arg("generate")
        .arg("-i")
        .arg(&initiators)
        .arg("-t")
        .arg(&targets)
        .args(["--vsan", "10"])
        .output()
        .expect("generate from yaml");

    assert!(from_text.status.success());
    assert!(from_yaml.status.success());
    assert_eq!(from_text.stdout, from_yaml.stdout);
}
