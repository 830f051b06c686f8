//! Pairing of initiators with targets into zones.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    zone_name, Endpoint, InitiatorEndpoint, NameOrder, Separator, TargetEndpoint, Zone,
    ZoneMember, ZoneMode,
};

/// Name token of targets that carry no group.
pub const DEFAULT_GROUP_TOKEN: &str = "DEFAULT";

/// How grouped targets that share a name are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMerge {
    /// Each blank-line-delimited block is its own group.
    #[default]
    Block,
    /// All blocks with the same name form one group.
    Name,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub mode: ZoneMode,
    pub order: NameOrder,
    pub separator: Separator,
    pub fabric_filter: Option<String>,
    pub group_merge: GroupMerge,
}

impl SelectOptions {
    pub fn naming(&self) -> NamingOptions {
        NamingOptions {
            order: self.order,
            separator: self.separator,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingOptions {
    pub order: NameOrder,
    pub separator: Separator,
}

/// An explicitly chosen initiator and its targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPair {
    pub initiator: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Initiator,
    Target,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiator => write!(f, "initiator"),
            Self::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {role} alias '{alias}'")]
pub struct UnknownAliasError {
    pub alias: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error(transparent)]
    UnknownAlias(#[from] UnknownAliasError),
    #[error("selection for initiator '{initiator}' lists no targets")]
    EmptyPair { initiator: String },
}

/// Keep endpoints in `fabric` (case-insensitive). `None` keeps everything.
pub fn filter_fabric<'a, E: Endpoint>(endpoints: &'a [E], fabric: Option<&str>) -> Vec<&'a E> {
    match fabric {
        Some(fabric) => endpoints.iter().filter(|e| e.in_fabric(fabric)).collect(),
        None => endpoints.iter().collect(),
    }
}

/// Build zones for every initiator against every target (single mode) or
/// every target group (many mode), in discovery order.
pub fn build_zones(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    options: &SelectOptions,
) -> Vec<Zone> {
    let fabric = options.fabric_filter.as_deref();
    let initiators = filter_fabric(initiators, fabric);
    let targets = filter_fabric(targets, fabric);

    let groups: Vec<TargetGroup<'_>> = match options.mode {
        ZoneMode::Single => targets
            .iter()
            .map(|t| TargetGroup {
                token: t.alias.to_string(),
                members: vec![*t],
            })
            .collect(),
        ZoneMode::Many => group_targets(&targets, options.group_merge),
    };

    let mut zones = Vec::with_capacity(initiators.len() * groups.len());
    for initiator in &initiators {
        for group in &groups {
            let name = zone_name(
                initiator.alias.as_str(),
                &group.token,
                options.order,
                options.separator,
            );
            let members = group.members.iter().map(|t| ZoneMember::from_endpoint(*t));
            if let Ok(zone) = Zone::new(name, ZoneMember::from_endpoint(*initiator), members.collect())
            {
                zones.push(zone);
            }
        }
    }
    tracing::debug!(
        initiators = initiators.len(),
        groups = groups.len(),
        zones = zones.len(),
        "built zones"
    );
    zones
}

#[derive(Debug)]
struct TargetGroup<'a> {
    token: String,
    members: Vec<&'a TargetEndpoint>,
}

fn group_targets<'a>(targets: &[&'a TargetEndpoint], merge: GroupMerge) -> Vec<TargetGroup<'a>> {
    let mut groups: Vec<TargetGroup<'a>> = Vec::new();
    let mut index: HashMap<(Option<usize>, &str), usize> = HashMap::new();
    let mut name_uses: HashMap<String, usize> = HashMap::new();

    for target in targets {
        let name = target.group.as_deref().unwrap_or("");
        let block = match merge {
            GroupMerge::Block => target.group_block,
            GroupMerge::Name => None,
        };
        if let Some(&slot) = index.get(&(block, name)) {
            groups[slot].members.push(*target);
            continue;
        }

        let base = if name.is_empty() {
            DEFAULT_GROUP_TOKEN.to_string()
        } else {
            name.to_string()
        };
        let uses = name_uses.entry(base.clone()).or_insert(0);
        *uses += 1;
        let token = if *uses > 1 {
            format!("{base}_{uses}")
        } else {
            base
        };

        index.insert((block, name), groups.len());
        groups.push(TargetGroup {
            token,
            members: vec![*target],
        });
    }

    groups
}

/// Build one zone per explicit selection.
pub fn build_selected_zones(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    pairs: &[SelectedPair],
    naming: &NamingOptions,
) -> Result<Vec<Zone>, SelectError> {
    let initiator_by_alias: HashMap<&str, &InitiatorEndpoint> =
        initiators.iter().map(|i| (i.alias.as_str(), i)).collect();
    let target_by_alias: HashMap<&str, &TargetEndpoint> =
        targets.iter().map(|t| (t.alias.as_str(), t)).collect();

    let mut zones = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let initiator = initiator_by_alias
            .get(pair.initiator.trim())
            .ok_or_else(|| UnknownAliasError {
                alias: pair.initiator.clone(),
                role: Role::Initiator,
            })?;
        let chosen = pair
            .targets
            .iter()
            .map(|alias| {
                target_by_alias
                    .get(alias.trim())
                    .copied()
                    .ok_or_else(|| UnknownAliasError {
                        alias: alias.clone(),
                        role: Role::Target,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name = zone_name(
            initiator.alias.as_str(),
            &selection_token(&chosen, naming.separator),
            naming.order,
            naming.separator,
        );
        let members = chosen.iter().map(|t| ZoneMember::from_endpoint(*t)).collect();
        let zone = Zone::new(name, ZoneMember::from_endpoint(*initiator), members).map_err(|_| {
            SelectError::EmptyPair {
                initiator: pair.initiator.clone(),
            }
        })?;
        zones.push(zone);
    }
    Ok(zones)
}

fn selection_token(targets: &[&TargetEndpoint], separator: Separator) -> String {
    if let [only] = targets {
        return only.alias.to_string();
    }
    let first_group = targets.first().and_then(|t| t.group.as_deref());
    if let Some(group) = first_group {
        if targets.iter().all(|t| t.group.as_deref() == Some(group)) {
            return group.to_string();
        }
    }
    targets
        .iter()
        .map(|t| t.alias.as_str())
        .collect::<Vec<_>>()
        .join(separator.as_str())
}
