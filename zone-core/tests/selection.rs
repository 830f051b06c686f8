use zone_core::{
    build_zones, parse_initiators, parse_targets, GroupMerge, SelectOptions, SourceFormat, Zone,
    ZoneMode,
};

const INITIATORS: &str = "H1 21:00:00:00:00:00:00:01\nH2 21:00:00:00:00:00:00:02\n";
const TARGETS: &str = "\
#GroupA
T1 50:00:00:00:00:00:00:01
T2 50:00:00:00:00:00:00:02

#GroupA
T3 50:00:00:00:00:00:00:03
";

fn zones(mode: ZoneMode, group_merge: GroupMerge) -> Vec<Zone> {
    let initiators = parse_initiators(INITIATORS, SourceFormat::Lines)
        .expect("lines")
        .entries;
    let targets = parse_targets(TARGETS, SourceFormat::Lines, mode)
        .expect("lines")
        .entries;
    let options = SelectOptions {
        mode,
        group_merge,
        ..SelectOptions::default()
    };
    build_zones(&initiators, &targets, &options)
}

#[test]
fn single_mode_is_full_cross_product() {
    let zones = zones(ZoneMode::Single, GroupMerge::Block);
    assert_eq!(zones.len(), 2 * 3);
    assert!(zones.iter().all(|z| z.members().count() == 2));
    assert_eq!(zones[0].name(), "T1__H1");
    assert_eq!(zones[3].name(), "T1__H2");
}

#[test]
fn same_named_blocks_stay_separate_by_default() {
    let zones = zones(ZoneMode::Many, GroupMerge::Block);
    let shape: Vec<_> = zones
        .iter()
        .map(|z| (z.name(), z.members().count()))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("GroupA__H1", 3),
            ("GroupA_2__H1", 2),
            ("GroupA__H2", 3),
            ("GroupA_2__H2", 2),
        ]
    );
}

#[test]
fn name_merge_combines_same_named_blocks() {
    let zones = zones(ZoneMode::Many, GroupMerge::Name);
    let shape: Vec<_> = zones
        .iter()
        .map(|z| (z.name(), z.member_aliases()))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("GroupA__H1", vec!["H1".to_string(), "T1".into(), "T2".into(), "T3".into()]),
            ("GroupA__H2", vec!["H2".to_string(), "T1".into(), "T2".into(), "T3".into()]),
        ]
    );
}
