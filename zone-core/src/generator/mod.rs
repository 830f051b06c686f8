//! Vendor configuration generators.
//!
//! Each generator is a pure function of a [`Configuration`]: it renders the
//! forward configuration, the inverse rollback, a rollback inventory CSV and
//! a per-member zone CSV.

mod brocade;
mod cisco;

use std::collections::HashSet;

use crate::model::{Configuration, Vendor, ZoneMember};

pub use brocade::BrocadeGenerator;
pub use cisco::CiscoGenerator;

pub const ZONE_CSV_HEADER: &str =
    "ZoneName;InitiatorAlias;InitiatorWWPN;TargetAlias;TargetWWPN;VSANOrFabricId";
pub const ROLLBACK_CSV_HEADER: &str = "Type;Name;VSAN";
pub(crate) const ROLLBACK_BANNER: &str = "! Rollback config";

pub trait Generator: Sync {
    /// Forward configuration text.
    fn emit_config(&self, config: &Configuration) -> String;

    /// Commands that undo [`Generator::emit_config`], in inverse order.
    fn emit_rollback(&self, config: &Configuration) -> String;

    /// One `Type;Name;VSAN` row per object the rollback deletes.
    fn emit_rollback_csv(&self, config: &Configuration) -> String;

    /// One row per zone per target member.
    fn emit_csv(&self, config: &Configuration) -> String {
        let location = match (config.vendor(), config.fabric()) {
            (Vendor::Brocade, Some(fabric)) => fabric.to_string(),
            _ => config.vsan().to_string(),
        };
        let mut lines = vec![ZONE_CSV_HEADER.to_string()];
        for zone in config.zones() {
            let initiator = zone.initiator();
            for target in zone.targets() {
                lines.push(format!(
                    "{};{};{};{};{};{location}",
                    zone.name(),
                    initiator.alias,
                    initiator.wwpn,
                    target.alias,
                    target.wwpn
                ));
            }
        }
        finish(lines)
    }
}

/// Generator for `vendor`.
pub fn generator(vendor: Vendor) -> &'static dyn Generator {
    match vendor {
        Vendor::Cisco => &CiscoGenerator,
        Vendor::Brocade => &BrocadeGenerator,
    }
}

/// Distinct zone members needing an alias definition: initiators first,
/// then targets, each in zone order.
pub(crate) fn alias_definitions(config: &Configuration) -> Vec<&ZoneMember> {
    let mut seen = HashSet::new();
    let initiators = config.zones().iter().map(|z| z.initiator());
    let targets = config.zones().iter().flat_map(|z| z.targets());
    initiators
        .chain(targets)
        .filter(|m| seen.insert(m.alias.as_str()))
        .collect()
}

/// Rollback CSV rows shared by both vendors: zoneset, zones reversed,
/// aliases reversed.
pub(crate) fn rollback_rows(config: &Configuration) -> String {
    let vsan = config.vsan();
    let mut lines = vec![
        ROLLBACK_CSV_HEADER.to_string(),
        format!("zoneset;{};{vsan}", config.zoneset_name()),
    ];
    for zone in config.zones().iter().rev() {
        lines.push(format!("zone;{};{vsan}", zone.name()));
    }
    for member in alias_definitions(config).iter().rev() {
        lines.push(format!("device-alias;{};{vsan}", member.alias));
    }
    finish(lines)
}

pub(crate) fn banner(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("! --- {title} ---"));
}

pub(crate) fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
