use std::collections::HashMap;

use crate::diff::result::{DiffEntry, DiffSummary};
use crate::model::Zone;

/// Compare a generated zone set against an existing one.
///
/// Zones are matched by exact name; the first occurrence of a repeated name
/// on either side wins. Matched zones are compared by member set, ignoring
/// member order and role. Output lists removed zones in existing order,
/// then added, modified and unchanged zones in generated order.
pub fn compute_diff(generated: &[Zone], existing: &[Zone]) -> Vec<DiffEntry> {
    let generated = first_by_name(generated);
    let existing = first_by_name(existing);
    let existing_index: HashMap<&str, &Zone> = existing.iter().map(|z| (z.name(), *z)).collect();
    let generated_index: HashMap<&str, &Zone> =
        generated.iter().map(|z| (z.name(), *z)).collect();

    let mut removed = Vec::new();
    for zone in &existing {
        if !generated_index.contains_key(zone.name()) {
            removed.push(DiffEntry::Removed {
                zone_name: zone.name().to_string(),
                members: zone.member_aliases(),
            });
        }
    }

    let mut added = Vec::new();
    let mut modified = Vec::new();
    let mut unchanged = Vec::new();
    for zone in &generated {
        match existing_index.get(zone.name()) {
            None => added.push(DiffEntry::Added {
                zone_name: zone.name().to_string(),
                members: zone.member_aliases(),
            }),
            Some(before) if before.is_equivalent(zone) => unchanged.push(DiffEntry::Unchanged {
                zone_name: zone.name().to_string(),
                members: zone.member_aliases(),
            }),
            Some(before) => modified.push(DiffEntry::Modified {
                zone_name: zone.name().to_string(),
                before_members: before.member_aliases(),
                after_members: zone.member_aliases(),
            }),
        }
    }

    let mut out = removed;
    out.extend(added);
    out.extend(modified);
    out.extend(unchanged);
    out
}

/// Count entries per status.
pub fn summarize(entries: &[DiffEntry]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for entry in entries {
        match entry {
            DiffEntry::Added { .. } => summary.added += 1,
            DiffEntry::Removed { .. } => summary.removed += 1,
            DiffEntry::Modified { .. } => summary.modified += 1,
            DiffEntry::Unchanged { .. } => summary.unchanged += 1,
        }
    }
    summary
}

fn first_by_name(zones: &[Zone]) -> Vec<&Zone> {
    let mut seen = std::collections::HashSet::new();
    zones.iter().filter(|z| seen.insert(z.name())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::result::DiffStatus;
    use crate::model::{Wwpn, ZoneMember};

    fn zone(name: &str, members: &[&str]) -> Zone {
        let members = members
            .iter()
            .map(|alias| ZoneMember::new(*alias, Wwpn::placeholder()))
            .collect();
        Zone::from_members(name, members).expect("zone")
    }

    #[test]
    fn member_order_and_role_do_not_matter() {
        let generated = vec![zone("Z1", &["H1", "T1"])];
        let existing = vec![zone("Z1", &["T1", "H1"])];
        let entries = compute_diff(&generated, &existing);
        assert_eq!(entries[0].status(), DiffStatus::Unchanged);
    }

    #[test]
    fn orders_removed_added_modified_unchanged() {
        let generated = vec![
            zone("KEEP", &["H1", "T1"]),
            zone("CHANGE", &["H1", "T2"]),
            zone("NEW", &["H1", "T3"]),
        ];
        let existing = vec![
            zone("OLD", &["H9", "T9"]),
            zone("CHANGE", &["H1", "T1"]),
            zone("KEEP", &["H1", "T1"]),
        ];
        let entries = compute_diff(&generated, &existing);
        let order: Vec<_> = entries.iter().map(|e| (e.status(), e.zone_name())).collect();
        assert_eq!(
            order,
            vec![
                (DiffStatus::Removed, "OLD"),
                (DiffStatus::Added, "NEW"),
                (DiffStatus::Modified, "CHANGE"),
                (DiffStatus::Unchanged, "KEEP"),
            ]
        );
        assert_eq!(
            entries[2],
            DiffEntry::Modified {
                zone_name: "CHANGE".into(),
                before_members: vec!["H1".into(), "T1".into()],
                after_members: vec!["H1".into(), "T2".into()],
            }
        );
    }

    #[test]
    fn first_duplicate_name_wins() {
        let generated = vec![zone("Z1", &["H1", "T1"]), zone("Z1", &["H1", "T2"])];
        let existing = vec![zone("Z1", &["H1", "T1"])];
        let entries = compute_diff(&generated, &existing);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status(), DiffStatus::Unchanged);
    }

    #[test]
    fn names_are_case_sensitive() {
        let entries = compute_diff(&[zone("z1", &["H1", "T1"])], &[zone("Z1", &["H1", "T1"])]);
        let summary = summarize(&entries);
        assert_eq!(
            summary,
            DiffSummary {
                added: 1,
                removed: 1,
                modified: 0,
                unchanged: 0
            }
        );
        assert!(!summary.is_clean());
    }
}
