//! Fail-soft findings reported alongside parse, validation, selection and
//! import results.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::model::{AliasError, Wwpn, WwpnError};

/// Where in the input a finding originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// 1-based line of a line-format file.
    Line(usize),
    /// 1-based record index of a structured-format list.
    Record(usize),
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {n}"),
            Self::Record(n) => write!(f, "record {n}"),
        }
    }
}

/// A non-fatal problem. The offending record, zone or line was skipped or
/// flagged and processing continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Warning {
    MalformedLine {
        position: Position,
        content: String,
    },
    InvalidRecord {
        position: Position,
        reason: String,
    },
    InvalidAlias {
        position: Position,
        error: AliasError,
    },
    InvalidWwpn {
        position: Position,
        alias: String,
        error: WwpnError,
    },
    /// An optional field was unusable; the record was kept without it.
    InvalidField {
        position: Position,
        alias: String,
        field: String,
        reason: String,
    },
    UnusualNaa {
        position: Position,
        alias: String,
        wwpn: Wwpn,
        naa: char,
    },
    DuplicateAlias {
        position: Position,
        alias: String,
    },
    DuplicateWwpn {
        position: Position,
        alias: String,
        wwpn: String,
    },
    DuplicateZoneName {
        zone: String,
    },
    IncompleteZone {
        zone: String,
        members: usize,
    },
    UnrecognizedImport,
}

impl Warning {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedLine { .. } => "malformed_line",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::InvalidAlias { .. } => "invalid_alias",
            Self::InvalidWwpn { .. } => "invalid_wwpn",
            Self::InvalidField { .. } => "invalid_field",
            Self::UnusualNaa { .. } => "unusual_naa",
            Self::DuplicateAlias { .. } => "duplicate_alias",
            Self::DuplicateWwpn { .. } => "duplicate_wwpn",
            Self::DuplicateZoneName { .. } => "duplicate_zone_name",
            Self::IncompleteZone { .. } => "incomplete_zone",
            Self::UnrecognizedImport => "unrecognized_import",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Self::MalformedLine { position, .. }
            | Self::InvalidRecord { position, .. }
            | Self::InvalidAlias { position, .. }
            | Self::InvalidWwpn { position, .. }
            | Self::InvalidField { position, .. }
            | Self::UnusualNaa { position, .. }
            | Self::DuplicateAlias { position, .. }
            | Self::DuplicateWwpn { position, .. } => Some(*position),
            Self::DuplicateZoneName { .. }
            | Self::IncompleteZone { .. }
            | Self::UnrecognizedImport => None,
        }
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { position, content } => {
                write!(f, "{position}: expected 'ALIAS WWPN', got {content:?}")
            }
            Self::InvalidRecord { position, reason } => {
                write!(f, "{position}: invalid record: {reason}")
            }
            Self::InvalidAlias { position, error } => write!(f, "{position}: {error}"),
            Self::InvalidWwpn {
                position,
                alias,
                error,
            } => write!(f, "{position}: {error} (alias: {alias})"),
            Self::InvalidField {
                position,
                alias,
                field,
                reason,
            } => write!(f, "{position}: {alias}: ignoring {field}: {reason}"),
            Self::UnusualNaa {
                position,
                alias,
                wwpn,
                naa,
            } => write!(
                f,
                "{position}: {alias}: {wwpn} has unusual NAA identifier '{naa}' (expected 1/2/5/6 for Fibre Channel)"
            ),
            Self::DuplicateAlias { position, alias } => {
                write!(f, "{position}: duplicate alias {alias}")
            }
            Self::DuplicateWwpn {
                position,
                alias,
                wwpn,
            } => write!(f, "{position}: duplicate WWPN {wwpn} (alias: {alias})"),
            Self::DuplicateZoneName { zone } => {
                write!(f, "zone name {zone} is produced more than once")
            }
            Self::IncompleteZone { zone, members } => write!(
                f,
                "zone {zone} has {members} member(s); a zone needs an initiator and at least one target"
            ),
            Self::UnrecognizedImport => {
                write!(f, "no recognizable zone definitions found in input")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position_and_detail() {
        let warning = Warning::DuplicateAlias {
            position: Position::Line(4),
            alias: "esx01_hba0".into(),
        };
        assert_eq!(warning.to_string(), "line 4: duplicate alias esx01_hba0");
        assert_eq!(warning.code(), "duplicate_alias");
        assert_eq!(warning.position(), Some(Position::Line(4)));
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_string(&Warning::UnrecognizedImport).expect("json");
        assert_eq!(json, r#"{"code":"unrecognized_import"}"#);
    }
}
