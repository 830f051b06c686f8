use crate::model::{InitiatorEndpoint, TargetEndpoint, ZoneMode};
use crate::warning::{Position, Warning};

use super::{checked_fields, FirstSeen, Parsed};

/// Shape of one line in the line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Blank,
    /// Text after `#`, trimmed.
    Comment(&'a str),
    Record {
        alias: &'a str,
        wwpn: &'a str,
    },
    Malformed(&'a str),
}

pub(crate) fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        return LineKind::Comment(rest.trim());
    }
    let mut fields = trimmed.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(alias), Some(wwpn)) => LineKind::Record { alias, wwpn },
        _ => LineKind::Malformed(trimmed),
    }
}

pub(crate) fn parse_initiators(text: &str) -> Parsed<InitiatorEndpoint> {
    let mut parsed = Parsed::default();
    let mut seen = FirstSeen::default();

    for (idx, line) in text.lines().enumerate() {
        let position = Position::Line(idx + 1);
        match classify(line) {
            LineKind::Blank | LineKind::Comment(_) => {}
            LineKind::Malformed(content) => parsed.warnings.push(Warning::MalformedLine {
                position,
                content: content.to_string(),
            }),
            LineKind::Record { alias, wwpn } => {
                let Some((alias, wwpn)) = checked_fields(position, alias, wwpn, &mut parsed.warnings)
                else {
                    continue;
                };
                if seen.admit(position, &alias, &wwpn, &mut parsed.warnings) {
                    parsed.entries.push(InitiatorEndpoint::new(alias, wwpn));
                }
            }
        }
    }

    parsed
}

pub(crate) fn parse_targets(text: &str, mode: ZoneMode) -> Parsed<TargetEndpoint> {
    let mut parsed = Parsed::default();
    let mut seen = FirstSeen::default();
    let mut blocks = BlockTracker::default();

    for (idx, line) in text.lines().enumerate() {
        let position = Position::Line(idx + 1);
        match classify(line) {
            LineKind::Blank => blocks.close(),
            LineKind::Comment(name) => {
                if mode == ZoneMode::Many {
                    blocks.open(name);
                }
            }
            LineKind::Malformed(content) => parsed.warnings.push(Warning::MalformedLine {
                position,
                content: content.to_string(),
            }),
            LineKind::Record { alias, wwpn } => {
                let Some((alias, wwpn)) = checked_fields(position, alias, wwpn, &mut parsed.warnings)
                else {
                    continue;
                };
                if !seen.admit(position, &alias, &wwpn, &mut parsed.warnings) {
                    continue;
                }
                let mut target = TargetEndpoint::new(alias, wwpn);
                if mode == ZoneMode::Many {
                    let (block, group) = blocks.current();
                    target.group_block = Some(block);
                    target.group = Some(group);
                }
                parsed.entries.push(target);
            }
        }
    }

    parsed
}

/// Tracks `#Name` headers and blank-line boundaries for grouped targets.
///
/// Every header opens a new block. A blank line closes the current block, so
/// the next data line without a header starts an unnamed block. Blocks are
/// numbered in order of appearance, so two blocks that carry the same header
/// name still get distinct ordinals. Unnamed blocks are called
/// `GROUP<blank lines seen + 1>`.
#[derive(Debug, Default)]
struct BlockTracker {
    ordinal: usize,
    blank_lines: usize,
    name: Option<String>,
    open: bool,
}

impl BlockTracker {
    fn open(&mut self, name: &str) {
        // A bare `#` is an ordinary comment.
        if name.is_empty() {
            return;
        }
        self.ordinal += 1;
        self.name = Some(name.to_string());
        self.open = true;
    }

    fn close(&mut self) {
        self.blank_lines += 1;
        self.name = None;
        self.open = false;
    }

    fn current(&mut self) -> (usize, String) {
        if !self.open {
            self.ordinal += 1;
            self.open = true;
        }
        let group = self
            .name
            .clone()
            .unwrap_or_else(|| format!("GROUP{}", self.blank_lines + 1));
        (self.ordinal, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lines() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("# Array A "), LineKind::Comment("Array A"));
        assert_eq!(
            classify("H1  21:00:00:00:00:00:00:01 trailing"),
            LineKind::Record {
                alias: "H1",
                wwpn: "21:00:00:00:00:00:00:01"
            }
        );
        assert_eq!(classify("lonely"), LineKind::Malformed("lonely"));
    }

    #[test]
    fn unnamed_blocks_are_numbered_by_ordinal() {
        let text = "T1 50:00:00:00:00:00:00:01\n\nT2 50:00:00:00:00:00:00:02\n";
        let parsed = parse_targets(text, ZoneMode::Many);
        let groups: Vec<_> = parsed
            .entries
            .iter()
            .map(|t| (t.group.clone(), t.group_block))
            .collect();
        assert_eq!(
            groups,
            vec![
                (Some("GROUP1".to_string()), Some(1)),
                (Some("GROUP2".to_string()), Some(2)),
            ]
        );
    }

    #[test]
    fn unnamed_blocks_count_every_blank_line() {
        let text = "T1 50:00:00:00:00:00:00:01\n\n\nT2 50:00:00:00:00:00:00:02\n";
        let parsed = parse_targets(text, ZoneMode::Many);
        let groups: Vec<_> = parsed
            .entries
            .iter()
            .map(|t| (t.group.clone(), t.group_block))
            .collect();
        assert_eq!(
            groups,
            vec![
                (Some("GROUP1".to_string()), Some(1)),
                (Some("GROUP3".to_string()), Some(2)),
            ]
        );
    }

    #[test]
    fn header_without_blank_line_starts_new_block() {
        let text = "#A\nT1 50:00:00:00:00:00:00:01\n#B\nT2 50:00:00:00:00:00:00:02\n";
        let parsed = parse_targets(text, ZoneMode::Many);
        assert_eq!(parsed.entries[0].group.as_deref(), Some("A"));
        assert_eq!(parsed.entries[1].group.as_deref(), Some("B"));
        assert_ne!(parsed.entries[0].group_block, parsed.entries[1].group_block);
    }

    #[test]
    fn single_mode_ignores_headers() {
        let text = "#A\nT1 50:00:00:00:00:00:00:01\n";
        let parsed = parse_targets(text, ZoneMode::Single);
        assert_eq!(parsed.entries[0].group, None);
        assert_eq!(parsed.entries[0].group_block, None);
    }
}
