//! Recover zones from switch-emitted text.
//!
//! Four grammars are tried in priority order; the first whose predicate
//! matches parses the whole input. Member tokens that already look like a
//! WWPN are used as addresses, anything else is an alias resolved against
//! definitions found in the same text.

mod brocade;
mod cisco;

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::model::{normalize_wwpn, Wwpn, Zone, ZoneMember};
use crate::warning::Warning;

/// Which input grammar produced an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportGrammar {
    /// `zone name <z> vsan <n>` blocks (running config or `show zoneset active`).
    CiscoZoneName,
    /// `zonecreate` / `zoneadd` / `alicreate` commands.
    BrocadeCommands,
    /// `cfgshow` output.
    BrocadeCfgshow,
    /// `member` lines under a plain zone header.
    BareMembers,
}

impl Display for ImportGrammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CiscoZoneName => write!(f, "cisco zone name"),
            Self::BrocadeCommands => write!(f, "brocade commands"),
            Self::BrocadeCfgshow => write!(f, "brocade cfgshow"),
            Self::BareMembers => write!(f, "bare members"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Imported {
    pub zones: Vec<Zone>,
    pub grammar: Option<ImportGrammar>,
    pub warnings: Vec<Warning>,
}

/// Zone as written in the source, before member resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawZone {
    pub(crate) name: String,
    pub(crate) members: Vec<String>,
}

impl RawZone {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Everything one grammar pulled out of the text.
#[derive(Debug, Default)]
pub(crate) struct Extract {
    pub(crate) zones: Vec<RawZone>,
    /// Alias name to raw address text.
    pub(crate) aliases: HashMap<String, String>,
}

type Recognizer = (ImportGrammar, fn(&str) -> bool, fn(&str) -> Extract);

const RECOGNIZERS: &[Recognizer] = &[
    (ImportGrammar::CiscoZoneName, cisco::detect_zone_name, cisco::parse_zone_name),
    (ImportGrammar::BrocadeCommands, brocade::detect_commands, brocade::parse_commands),
    (ImportGrammar::BrocadeCfgshow, brocade::detect_cfgshow, brocade::parse_cfgshow),
    (ImportGrammar::BareMembers, cisco::detect_bare_members, cisco::parse_bare_members),
];

/// Import every zone from `text`.
pub fn import_zones(text: &str) -> Imported {
    let Some((grammar, _, parse)) = RECOGNIZERS.iter().find(|(_, detect, _)| detect(text)) else {
        tracing::debug!("no import grammar matched");
        return Imported {
            warnings: vec![Warning::UnrecognizedImport],
            ..Imported::default()
        };
    };

    let extract = parse(text);
    let book = AliasBook::new(&extract.aliases);
    let mut imported = Imported {
        grammar: Some(*grammar),
        ..Imported::default()
    };
    for raw in extract.zones {
        if raw.members.len() < 2 {
            imported.warnings.push(Warning::IncompleteZone {
                zone: raw.name,
                members: raw.members.len(),
            });
            continue;
        }
        let members = raw.members.iter().map(|token| book.member(token)).collect();
        match Zone::from_members(raw.name, members) {
            Ok(zone) => imported.zones.push(zone),
            Err(err) => tracing::debug!(%err, "skipping imported zone"),
        }
    }
    tracing::info!(
        %grammar,
        zones = imported.zones.len(),
        warnings = imported.warnings.len(),
        "imported zones"
    );
    imported
}

struct AliasBook {
    addresses: HashMap<String, Wwpn>,
}

impl AliasBook {
    fn new(aliases: &HashMap<String, String>) -> Self {
        let addresses = aliases
            .iter()
            .filter_map(|(alias, raw)| Some((alias.clone(), normalize_wwpn(raw).ok()?)))
            .collect();
        Self { addresses }
    }

    fn member(&self, token: &str) -> ZoneMember {
        if Wwpn::is_canonical_form(token) {
            if let Ok(wwpn) = normalize_wwpn(token) {
                return ZoneMember::new(wwpn.to_string(), wwpn);
            }
        }
        let wwpn = self
            .addresses
            .get(token)
            .cloned()
            .unwrap_or_else(Wwpn::placeholder);
        ZoneMember::new(token, wwpn)
    }
}

/// Split a `;`-joined member list, dropping blanks.
pub(crate) fn split_members(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(';')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
