//! Endpoint list parsers for the line format (`ALIAS WWPN`) and the
//! structured YAML format.
//!
//! Both parsers are fail-soft: a bad or duplicate record is dropped and
//! reported as a [`Warning`], the rest of the input still loads. Only an
//! unreadable YAML document is an error.

pub(crate) mod lines;
pub(crate) mod structured;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::model::{
    normalize_wwpn, validate_alias, Alias, InitiatorEndpoint, RangeStatus, TargetEndpoint, Wwpn,
    ZoneMode,
};
use crate::warning::{Position, Warning};

/// On-disk shape of an endpoint list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `ALIAS WWPN` per line, `#` comments, blank-line separated groups.
    Lines,
    /// YAML mapping with an `initiators` or `targets` list.
    Structured,
}

impl SourceFormat {
    /// `.yaml` / `.yml` select the structured format, anything else the line
    /// format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Structured
            }
            _ => Self::Lines,
        }
    }
}

/// Structural failures that prevent reading an input at all.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse structured endpoint document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Usable entries plus everything that was dropped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub entries: Vec<T>,
    pub warnings: Vec<Warning>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parse an initiator list.
pub fn parse_initiators(
    text: &str,
    format: SourceFormat,
) -> Result<Parsed<InitiatorEndpoint>, ParseError> {
    match format {
        SourceFormat::Lines => Ok(lines::parse_initiators(text)),
        SourceFormat::Structured => structured::parse_initiators(text),
    }
}

/// Parse a target list. In [`ZoneMode::Many`] the line format reads `#Name`
/// headers and blank lines as group boundaries.
pub fn parse_targets(
    text: &str,
    format: SourceFormat,
    mode: ZoneMode,
) -> Result<Parsed<TargetEndpoint>, ParseError> {
    match format {
        SourceFormat::Lines => Ok(lines::parse_targets(text, mode)),
        SourceFormat::Structured => structured::parse_targets(text),
    }
}

/// Validate one alias/WWPN pair, recording a warning on failure. Reserved
/// addresses drop the pair; an unusual NAA only warns.
pub(crate) fn checked_fields(
    position: Position,
    alias_raw: &str,
    wwpn_raw: &str,
    warnings: &mut Vec<Warning>,
) -> Option<(Alias, Wwpn)> {
    let alias = match validate_alias(alias_raw) {
        Ok(alias) => alias,
        Err(error) => {
            tracing::debug!(%position, %error, "dropping endpoint with invalid alias");
            warnings.push(Warning::InvalidAlias { position, error });
            return None;
        }
    };
    let checked = normalize_wwpn(wwpn_raw).and_then(|wwpn| Ok((wwpn.check_range()?, wwpn)));
    match checked {
        Ok((RangeStatus::Standard, wwpn)) => Some((alias, wwpn)),
        Ok((RangeStatus::UnusualNaa(naa), wwpn)) => {
            warnings.push(Warning::UnusualNaa {
                position,
                alias: alias.to_string(),
                wwpn: wwpn.clone(),
                naa,
            });
            Some((alias, wwpn))
        }
        Err(error) => {
            tracing::debug!(%position, %error, "dropping endpoint with invalid WWPN");
            warnings.push(Warning::InvalidWwpn {
                position,
                alias: alias.to_string(),
                error,
            });
            None
        }
    }
}

/// First-seen-wins identity tracking for one loaded collection.
#[derive(Debug, Default)]
pub(crate) struct FirstSeen {
    aliases: HashSet<Alias>,
    wwpns: HashSet<Wwpn>,
}

impl FirstSeen {
    /// Admit the pair if neither its WWPN nor its alias occurred before.
    pub(crate) fn admit(
        &mut self,
        position: Position,
        alias: &Alias,
        wwpn: &Wwpn,
        warnings: &mut Vec<Warning>,
    ) -> bool {
        if self.wwpns.contains(wwpn) {
            tracing::debug!(%position, %wwpn, "dropping duplicate WWPN");
            warnings.push(Warning::DuplicateWwpn {
                position,
                alias: alias.to_string(),
                wwpn: wwpn.to_string(),
            });
            return false;
        }
        if self.aliases.contains(alias) {
            tracing::debug!(%position, %alias, "dropping duplicate alias");
            warnings.push(Warning::DuplicateAlias {
                position,
                alias: alias.to_string(),
            });
            return false;
        }
        self.aliases.insert(alias.clone());
        self.wwpns.insert(wwpn.clone());
        true
    }
}
