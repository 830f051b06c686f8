use std::path::PathBuf;

use zone_core::{parse_initiators, parse_targets, Position, SourceFormat, Warning, ZoneMode};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn read(path: &str) -> String {
    std::fs::read_to_string(fixture(path)).expect("fixture readable")
}

#[test]
fn line_initiators_are_normalized() {
    let parsed = parse_initiators(&read("fixtures/initiators.txt"), SourceFormat::Lines)
        .expect("line format never fails");
    assert!(parsed.warnings.is_empty());
    let wwpns: Vec<_> = parsed.entries.iter().map(|e| e.wwpn.as_str()).collect();
    assert_eq!(
        wwpns,
        vec!["21:00:00:24:ff:4b:c5:a8", "21:00:00:24:ff:4b:c5:b0"]
    );
}

#[test]
fn bad_lines_are_dropped_with_warnings() {
    let parsed = parse_initiators(&read("fixtures/initiators_bad.txt"), SourceFormat::Lines)
        .expect("line format never fails");
    let aliases: Vec<_> = parsed.entries.iter().map(|e| e.alias.as_str()).collect();
    assert_eq!(aliases, vec!["esx01_hba0"]);

    let codes: Vec<_> = parsed
        .warnings
        .iter()
        .map(|w| (w.code(), w.position()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("duplicate_alias", Some(Position::Line(2))),
            ("invalid_wwpn", Some(Position::Line(3))),
            ("invalid_wwpn", Some(Position::Line(4))),
            ("malformed_line", Some(Position::Line(5))),
            ("duplicate_wwpn", Some(Position::Line(6))),
        ]
    );
}

#[test]
fn grouped_targets_keep_block_identity() {
    let parsed = parse_targets(
        &read("fixtures/targets_grouped.txt"),
        SourceFormat::Lines,
        ZoneMode::Many,
    )
    .expect("line format never fails");
    let groups: Vec<_> = parsed
        .entries
        .iter()
        .map(|t| (t.alias.as_str(), t.group.as_deref(), t.group_block))
        .collect();
    assert_eq!(
        groups,
        vec![
            ("pure01_ct0_fc0", Some("PURE01"), Some(1)),
            ("pure01_ct1_fc0", Some("PURE01"), Some(1)),
            ("pure01_ct0_fc1", Some("PURE01"), Some(2)),
            ("pure01_ct1_fc1", Some("PURE01"), Some(2)),
            ("netapp01_svm_fc_0", Some("GROUP3"), Some(3)),
        ]
    );
}

#[test]
fn structured_records_keep_optional_fields() {
    let parsed = parse_initiators(&read("fixtures/initiators.yaml"), SourceFormat::Structured)
        .expect("valid yaml");
    assert_eq!(parsed.entries.len(), 3);
    assert_eq!(parsed.entries[1].host.as_deref(), Some("esx01"));
    assert_eq!(parsed.entries[1].fabric.as_deref(), Some("FAB_B"));
}

#[test]
fn structured_duplicate_is_positioned_by_record() {
    let text = "\
targets:
  - alias: T1
    wwpn: \"50:00:00:00:00:00:00:01\"
  - alias: T1
    wwpn: \"50:00:00:00:00:00:00:02\"
";
    let parsed = parse_targets(text, SourceFormat::Structured, ZoneMode::Many).expect("yaml");
    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(
        parsed.warnings,
        vec![Warning::DuplicateAlias {
            position: Position::Record(2),
            alias: "T1".into(),
        }]
    );
}
