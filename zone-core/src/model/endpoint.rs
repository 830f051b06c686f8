use serde::Serialize;

use super::{Alias, Wwpn};

/// Fields shared by initiators and targets.
pub trait Endpoint {
    fn alias(&self) -> &Alias;
    fn wwpn(&self) -> &Wwpn;
    fn fabric(&self) -> Option<&str>;

    /// Case-insensitive fabric match. Endpoints without a fabric never match.
    fn in_fabric(&self, fabric: &str) -> bool {
        self.fabric()
            .is_some_and(|own| own.eq_ignore_ascii_case(fabric))
    }
}

/// A host bus adapter port (zone initiator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitiatorEndpoint {
    pub alias: Alias,
    pub wwpn: Wwpn,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InitiatorEndpoint {
    pub fn new(alias: Alias, wwpn: Wwpn) -> Self {
        Self {
            alias,
            wwpn,
            host: None,
            fabric: None,
            vsan_id: None,
            description: None,
        }
    }
}

/// A storage array port (zone target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetEndpoint {
    pub alias: Alias,
    pub wwpn: Wwpn,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Ordinal of the blank-line-delimited block a line-format target was
    /// read from. `None` for structured input.
    #[serde(skip)]
    pub group_block: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_array: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TargetEndpoint {
    pub fn new(alias: Alias, wwpn: Wwpn) -> Self {
        Self {
            alias,
            wwpn,
            group: None,
            group_block: None,
            storage_array: None,
            port: None,
            fabric: None,
            vsan_id: None,
            description: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl Endpoint for InitiatorEndpoint {
    fn alias(&self) -> &Alias {
        &self.alias
    }

    fn wwpn(&self) -> &Wwpn {
        &self.wwpn
    }

    fn fabric(&self) -> Option<&str> {
        self.fabric.as_deref()
    }
}

impl Endpoint for TargetEndpoint {
    fn alias(&self) -> &Alias {
        &self.alias
    }

    fn wwpn(&self) -> &Wwpn {
        &self.wwpn
    }

    fn fabric(&self) -> Option<&str> {
        self.fabric.as_deref()
    }
}
