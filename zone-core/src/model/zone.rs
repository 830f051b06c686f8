use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Endpoint, Wwpn};

/// Token order used when composing a zone name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameOrder {
    /// `<target><sep><initiator>`.
    #[default]
    #[serde(rename = "ti")]
    TargetInitiator,
    /// `<initiator><sep><target>`.
    #[serde(rename = "it")]
    InitiatorTarget,
}

/// Separator placed between the two zone name tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// `_`
    One,
    /// `__`
    #[default]
    Two,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "_",
            Self::Two => "__",
        }
    }
}

/// Compose a zone name from an initiator alias and a target token.
///
/// The target token is a target alias for single-target zones, or the
/// group's collective name for grouped zones.
pub fn zone_name(
    initiator_alias: &str,
    target_token: &str,
    order: NameOrder,
    separator: Separator,
) -> String {
    let sep = separator.as_str();
    match order {
        NameOrder::TargetInitiator => format!("{target_token}{sep}{initiator_alias}"),
        NameOrder::InitiatorTarget => format!("{initiator_alias}{sep}{target_token}"),
    }
}

/// Errors raised when a zone would violate the one-initiator, one-or-more
/// targets invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("zone '{zone}' has no members")]
    NoMembers { zone: String },
    #[error("zone '{zone}' has an initiator but no target members")]
    NoTargets { zone: String },
}

/// One resolved zone member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneMember {
    pub alias: String,
    pub wwpn: Wwpn,
}

impl ZoneMember {
    pub fn new(alias: impl Into<String>, wwpn: Wwpn) -> Self {
        Self {
            alias: alias.into(),
            wwpn,
        }
    }

    pub fn from_endpoint<E: Endpoint>(endpoint: &E) -> Self {
        Self::new(endpoint.alias().as_str(), endpoint.wwpn().clone())
    }
}

/// A named zone: exactly one initiator followed by one or more targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    name: String,
    initiator: ZoneMember,
    targets: Vec<ZoneMember>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        initiator: ZoneMember,
        targets: Vec<ZoneMember>,
    ) -> Result<Self, ZoneError> {
        let name = name.into();
        if targets.is_empty() {
            return Err(ZoneError::NoTargets { zone: name });
        }
        Ok(Self {
            name,
            initiator,
            targets,
        })
    }

    /// Build a zone from an ordered member list; the first member is the
    /// initiator.
    pub fn from_members(
        name: impl Into<String>,
        members: Vec<ZoneMember>,
    ) -> Result<Self, ZoneError> {
        let name = name.into();
        let mut members = members.into_iter();
        let Some(initiator) = members.next() else {
            return Err(ZoneError::NoMembers { zone: name });
        };
        Self::new(name, initiator, members.collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initiator(&self) -> &ZoneMember {
        &self.initiator
    }

    pub fn targets(&self) -> &[ZoneMember] {
        &self.targets
    }

    /// Members in zone order, initiator first.
    pub fn members(&self) -> impl Iterator<Item = &ZoneMember> {
        std::iter::once(&self.initiator).chain(self.targets.iter())
    }

    pub fn member_aliases(&self) -> Vec<String> {
        self.members().map(|m| m.alias.clone()).collect()
    }

    /// Role-independent set of member aliases.
    pub fn member_set(&self) -> BTreeSet<&str> {
        self.members().map(|m| m.alias.as_str()).collect()
    }

    pub fn is_equivalent(&self, other: &Zone) -> bool {
        self.member_set() == other.member_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(alias: &str) -> ZoneMember {
        ZoneMember::new(alias, Wwpn::placeholder())
    }

    #[test]
    fn names_follow_order_and_separator() {
        assert_eq!(
            zone_name("H1", "T1", NameOrder::TargetInitiator, Separator::Two),
            "T1__H1"
        );
        assert_eq!(
            zone_name("H1", "T1", NameOrder::InitiatorTarget, Separator::One),
            "H1_T1"
        );
    }

    #[test]
    fn zone_requires_a_target() {
        let err = Zone::new("Z", member("H1"), Vec::new()).unwrap_err();
        assert_eq!(err, ZoneError::NoTargets { zone: "Z".into() });
        let err = Zone::from_members("Z", Vec::new()).unwrap_err();
        assert_eq!(err, ZoneError::NoMembers { zone: "Z".into() });
    }

    #[test]
    fn equivalence_ignores_member_roles() {
        let a = Zone::from_members("Z", vec![member("H1"), member("T1")]).expect("zone");
        let b = Zone::from_members("Z", vec![member("T1"), member("H1")]).expect("zone");
        assert!(a.is_equivalent(&b));
        assert_eq!(a.member_aliases(), vec!["H1", "T1"]);
    }
}
