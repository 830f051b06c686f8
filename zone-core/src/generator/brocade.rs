use crate::model::Configuration;

use super::{alias_definitions, banner, finish, rollback_rows, Generator, ROLLBACK_BANNER};

/// Brocade FOS alias based zoning.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrocadeGenerator;

impl Generator for BrocadeGenerator {
    fn emit_config(&self, config: &Configuration) -> String {
        let cfg = config.zoneset_name();
        let mut lines = Vec::new();

        banner(&mut lines, "ALIAS CONFIGURATION");
        for member in alias_definitions(config) {
            lines.push(format!("alicreate \"{}\",\"{}\"", member.alias, member.wwpn));
        }

        banner(&mut lines, "ZONE CONFIGURATION");
        for zone in config.zones() {
            let members = zone.member_aliases().join(";");
            lines.push(format!("zonecreate \"{}\",\"{members}\"", zone.name()));
        }

        banner(&mut lines, "CFG CONFIGURATION");
        let zone_list = config
            .zones()
            .iter()
            .map(|z| z.name())
            .collect::<Vec<_>>()
            .join(";");
        lines.push(format!("cfgcreate \"{cfg}\",\"{zone_list}\""));
        lines.push(format!("cfgadd \"{cfg}\",\"{zone_list}\""));

        banner(&mut lines, "ACTIVATE AND SAVE");
        lines.push(format!("cfgenable {cfg}"));
        lines.push("cfgsave".to_string());

        finish(lines)
    }

    fn emit_rollback(&self, config: &Configuration) -> String {
        let cfg = config.zoneset_name();
        let mut lines = vec![ROLLBACK_BANNER.to_string()];

        lines.push(format!("cfgdisable {cfg}"));
        lines.push(format!("cfgdelete \"{cfg}\""));
        for zone in config.zones().iter().rev() {
            lines.push(format!("zonedelete \"{}\"", zone.name()));
        }
        for member in alias_definitions(config).iter().rev() {
            lines.push(format!("alidelete \"{}\"", member.alias));
        }
        lines.push("cfgsave".to_string());

        finish(lines)
    }

    fn emit_rollback_csv(&self, config: &Configuration) -> String {
        rollback_rows(config)
    }
}
