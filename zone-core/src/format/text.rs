use crate::diff::engine::summarize;
use crate::diff::result::DiffEntry;

/// Format diff entries as plain text.
pub fn format_text(entries: &[DiffEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            DiffEntry::Added { zone_name, members } => {
                lines.push(format!("+ {zone_name} [{}]", members.join(", ")));
            }
            DiffEntry::Removed { zone_name, members } => {
                lines.push(format!("- {zone_name} [{}]", members.join(", ")));
            }
            DiffEntry::Modified {
                zone_name,
                before_members,
                after_members,
            } => {
                lines.push(format!("~ {zone_name}"));
                lines.push(format!("  before: [{}]", before_members.join(", ")));
                lines.push(format!("  after:  [{}]", after_members.join(", ")));
            }
            DiffEntry::Unchanged { zone_name, .. } => lines.push(format!("= {zone_name}")),
        }
    }
    lines.join("\n")
}

/// Format a simple summary of diff counts.
pub fn format_summary(entries: &[DiffEntry]) -> String {
    let summary = summarize(entries);
    format!(
        "added={} removed={} modified={} unchanged={}",
        summary.added, summary.removed, summary.modified, summary.unchanged
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn prefixes_each_status() {
        let entries = vec![
            DiffEntry::Removed {
                zone_name: "OLD".into(),
                members: vec!["H9".into(), "T9".into()],
            },
            DiffEntry::Added {
                zone_name: "NEW".into(),
                members: vec!["H1".into(), "T3".into()],
            },
            DiffEntry::Modified {
                zone_name: "CHG".into(),
                before_members: vec!["H1".into(), "T1".into()],
                after_members: vec!["H1".into(), "T2".into()],
            },
            DiffEntry::Unchanged {
                zone_name: "KEEP".into(),
                members: vec!["H1".into(), "T1".into()],
            },
        ];
        let expected = "\
- OLD [H9, T9]
+ NEW [H1, T3]
~ CHG
  before: [H1, T1]
  after:  [H1, T2]
= KEEP";
        assert_eq!(format_text(&entries), expected);
        assert_eq!(
            format_summary(&entries),
            "added=1 removed=1 modified=1 unchanged=1"
        );
    }
}
