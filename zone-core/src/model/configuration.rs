use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Zone;

/// Switch family a configuration is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    #[default]
    Cisco,
    Brocade,
}

impl Display for Vendor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cisco => write!(f, "cisco"),
            Self::Brocade => write!(f, "brocade"),
        }
    }
}

/// Pairing policy between initiators and targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneMode {
    /// One zone per initiator and target.
    #[default]
    Single,
    /// One zone per initiator and target group.
    Many,
}

impl Display for ZoneMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Many => write!(f, "many"),
        }
    }
}

/// Default FC interface range assigned to the VSAN.
pub const DEFAULT_IFACE_RANGE: &str = "1-32";

/// A rendered-ready zone set plus the switch metadata generators need.
///
/// Built once with the `with_*` methods and read through accessors; a
/// different input produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    vendor: Vendor,
    vsan: u16,
    vsan_name: Option<String>,
    iface_range: String,
    zoneset_name: Option<String>,
    fabric: Option<String>,
    zones: Vec<Zone>,
}

impl Configuration {
    pub fn new(vendor: Vendor, zones: Vec<Zone>) -> Self {
        Self {
            vendor,
            vsan: 0,
            vsan_name: None,
            iface_range: DEFAULT_IFACE_RANGE.to_string(),
            zoneset_name: None,
            fabric: None,
            zones,
        }
    }

    pub fn with_vsan(mut self, vsan: u16) -> Self {
        self.vsan = vsan;
        self
    }

    pub fn with_vsan_name(mut self, name: Option<String>) -> Self {
        self.vsan_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_iface_range(mut self, range: impl Into<String>) -> Self {
        self.iface_range = range.into();
        self
    }

    pub fn with_zoneset_name(mut self, name: Option<String>) -> Self {
        self.zoneset_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_fabric(mut self, fabric: Option<String>) -> Self {
        self.fabric = fabric.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn vsan(&self) -> u16 {
        self.vsan
    }

    /// Explicit VSAN name, or `VSAN_<n>`.
    pub fn vsan_name(&self) -> String {
        self.vsan_name
            .clone()
            .unwrap_or_else(|| format!("VSAN_{}", self.vsan))
    }

    pub fn iface_range(&self) -> &str {
        &self.iface_range
    }

    /// Explicit zoneset/CFG name, or the vendor default
    /// (`zoneset_vsan_<n>` for Cisco, `cfg` for Brocade).
    pub fn zoneset_name(&self) -> String {
        if let Some(name) = &self.zoneset_name {
            return name.clone();
        }
        match self.vendor {
            Vendor::Cisco => format!("zoneset_vsan_{}", self.vsan),
            Vendor::Brocade => "cfg".to_string(),
        }
    }

    pub fn fabric(&self) -> Option<&str> {
        self.fabric.as_deref()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_defaults_for_names() {
        let cisco = Configuration::new(Vendor::Cisco, Vec::new()).with_vsan(100);
        assert_eq!(cisco.vsan_name(), "VSAN_100");
        assert_eq!(cisco.zoneset_name(), "zoneset_vsan_100");

        let brocade = Configuration::new(Vendor::Brocade, Vec::new());
        assert_eq!(brocade.zoneset_name(), "cfg");

        let named = Configuration::new(Vendor::Brocade, Vec::new())
            .with_zoneset_name(Some("prod_cfg".into()));
        assert_eq!(named.zoneset_name(), "prod_cfg");
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let cfg = Configuration::new(Vendor::Cisco, Vec::new())
            .with_vsan(20)
            .with_vsan_name(Some("  ".into()));
        assert_eq!(cfg.vsan_name(), "VSAN_20");
    }
}
