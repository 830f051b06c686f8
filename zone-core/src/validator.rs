//! Standalone checks over raw endpoint collections.
//!
//! Unlike the parsers, nothing here is dropped or de-duplicated: every
//! candidate record is read as-is and every problem occurrence is reported.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{normalize_wwpn, validate_alias, RangeStatus};
use crate::parser::lines::{classify, LineKind};
use crate::parser::structured::{read_document, scalar_text};
use crate::parser::{ParseError, SourceFormat};
use crate::warning::{Position, Warning};

/// Which list of a structured document to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointKind {
    Initiators,
    Targets,
    /// Whichever list is present, initiators first.
    #[default]
    Auto,
}

/// An unvalidated `(alias, wwpn)` candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub alias: String,
    pub wwpn: String,
    pub position: Position,
}

/// Read every candidate pair without validating it.
///
/// Line-format comments, blank lines, and lines with fewer than two fields
/// carry no candidate and are skipped. Structured records missing a field
/// are returned with that field empty so [`validate`] reports them.
pub fn raw_entries(
    text: &str,
    format: SourceFormat,
    kind: EndpointKind,
) -> Result<Vec<RawEntry>, ParseError> {
    match format {
        SourceFormat::Lines => Ok(text
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| match classify(line) {
                LineKind::Record { alias, wwpn } => Some(RawEntry {
                    alias: alias.to_string(),
                    wwpn: wwpn.to_string(),
                    position: Position::Line(idx + 1),
                }),
                _ => None,
            })
            .collect()),
        SourceFormat::Structured => {
            let doc = read_document(text)?;
            let records = match kind {
                EndpointKind::Initiators => doc.initiators,
                EndpointKind::Targets => doc.targets,
                EndpointKind::Auto => doc.initiators.or(doc.targets),
            }
            .unwrap_or_default();
            Ok(records
                .iter()
                .enumerate()
                .map(|(idx, record)| RawEntry {
                    alias: field(record, "alias"),
                    wwpn: field(record, "wwpn"),
                    position: Position::Record(idx + 1),
                })
                .collect())
        }
    }
}

fn field(record: &serde_yaml::Value, key: &str) -> String {
    record.get(key).and_then(scalar_text).unwrap_or_default()
}

/// Check every entry and return all findings in input order.
pub fn validate(entries: &[RawEntry]) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut aliases = HashSet::new();
    let mut wwpns = HashSet::new();

    for entry in entries {
        let position = entry.position;
        let alias = entry.alias.trim();

        if let Err(error) = validate_alias(alias) {
            warnings.push(Warning::InvalidAlias { position, error });
        }

        let wwpn_key = match normalize_wwpn(&entry.wwpn) {
            Ok(wwpn) => {
                match wwpn.check_range() {
                    Ok(RangeStatus::Standard) => {}
                    Ok(RangeStatus::UnusualNaa(naa)) => warnings.push(Warning::UnusualNaa {
                        position,
                        alias: alias.to_string(),
                        wwpn: wwpn.clone(),
                        naa,
                    }),
                    Err(error) => warnings.push(Warning::InvalidWwpn {
                        position,
                        alias: alias.to_string(),
                        error,
                    }),
                }
                wwpn.to_string()
            }
            Err(error) => {
                warnings.push(Warning::InvalidWwpn {
                    position,
                    alias: alias.to_string(),
                    error,
                });
                entry.wwpn.trim().to_ascii_lowercase()
            }
        };

        if !alias.is_empty() && !aliases.insert(alias.to_string()) {
            warnings.push(Warning::DuplicateAlias {
                position,
                alias: alias.to_string(),
            });
        }
        if !wwpn_key.is_empty() && !wwpns.insert(wwpn_key.clone()) {
            warnings.push(Warning::DuplicateWwpn {
                position,
                alias: alias.to_string(),
                wwpn: wwpn_key,
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RangeViolation, WwpnError};

    fn entries(text: &str) -> Vec<RawEntry> {
        raw_entries(text, SourceFormat::Lines, EndpointKind::Auto).expect("line format")
    }

    #[test]
    fn every_repeat_is_flagged() {
        let warnings = validate(&entries(
            "H1 21:00:00:00:00:00:00:01\nH1 21:00:00:00:00:00:00:02\nH1 21:00:00:00:00:00:00:03\n",
        ));
        let codes: Vec<_> = warnings.iter().map(Warning::code).collect();
        assert_eq!(codes, vec!["duplicate_alias", "duplicate_alias"]);
    }

    #[test]
    fn duplicate_wwpn_compares_normalized_form() {
        let warnings = validate(&entries(
            "H1 21:00:00:00:00:00:00:01\nH2 2100000000000001\n",
        ));
        assert_eq!(
            warnings,
            vec![Warning::DuplicateWwpn {
                position: Position::Line(2),
                alias: "H2".into(),
                wwpn: "21:00:00:00:00:00:00:01".into(),
            }]
        );
    }

    #[test]
    fn reserved_addresses_are_invalid() {
        let warnings = validate(&entries("H1 00:00:00:00:00:00:00:00\nH2 ff:ff:ff:ff:ff:ff:ff:ff\n"));
        assert!(matches!(
            &warnings[0],
            Warning::InvalidWwpn {
                error: WwpnError::InvalidRange {
                    reason: RangeViolation::AllZero,
                    ..
                },
                ..
            }
        ));
        assert!(matches!(
            &warnings[1],
            Warning::InvalidWwpn {
                error: WwpnError::InvalidRange {
                    reason: RangeViolation::Broadcast,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn unusual_naa_is_advisory() {
        let warnings = validate(&entries("H1 31:00:00:00:00:00:00:01\n"));
        assert!(matches!(warnings[0], Warning::UnusualNaa { naa: '3', .. }));
    }

    #[test]
    fn structured_auto_prefers_initiators() {
        let text = "targets:\n  - alias: T1\n    wwpn: \"50:00:00:00:00:00:00:01\"\ninitiators:\n  - alias: H1\n    wwpn: \"21:00:00:00:00:00:00:01\"\n";
        let raw = raw_entries(text, SourceFormat::Structured, EndpointKind::Auto).expect("yaml");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].alias, "H1");
    }

    #[test]
    fn structured_missing_alias_is_reported() {
        let text = "targets:\n  - wwpn: \"50:00:00:00:00:00:00:01\"\n";
        let raw = raw_entries(text, SourceFormat::Structured, EndpointKind::Targets).expect("yaml");
        let warnings = validate(&raw);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), "invalid_alias");
        assert_eq!(warnings[0].position(), Some(Position::Record(1)));
    }
}
