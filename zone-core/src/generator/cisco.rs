use crate::model::Configuration;

use super::{alias_definitions, banner, finish, rollback_rows, Generator, ROLLBACK_BANNER};

/// Cisco MDS NX-OS device-alias based zoning.
#[derive(Debug, Clone, Copy, Default)]
pub struct CiscoGenerator;

impl Generator for CiscoGenerator {
    fn emit_config(&self, config: &Configuration) -> String {
        let vsan = config.vsan();
        let iface = config.iface_range();
        let zoneset = config.zoneset_name();
        let mut lines = Vec::new();

        banner(&mut lines, "VSAN CONFIGURATION");
        lines.push("config t".to_string());
        lines.push("vsan database".to_string());
        lines.push(format!("  vsan {vsan}"));
        lines.push(format!("  vsan {vsan} name {}", config.vsan_name()));
        lines.push(format!("  vsan {vsan} interface fc1/{iface}"));
        lines.push("exit".to_string());
        lines.push(format!("interface fc1/{iface}"));
        lines.push("  no shutdown".to_string());
        lines.push("exit".to_string());

        banner(&mut lines, "DEVICE-ALIAS CONFIGURATION");
        lines.push("device-alias database".to_string());
        for member in alias_definitions(config) {
            lines.push(format!(
                "  device-alias name {} pwwn {}",
                member.alias, member.wwpn
            ));
        }
        lines.push("exit".to_string());
        lines.push("device-alias commit".to_string());

        banner(&mut lines, "ZONE CONFIGURATION");
        for zone in config.zones() {
            lines.push(format!("zone name {} vsan {vsan}", zone.name()));
            for member in zone.members() {
                lines.push(format!("  member device-alias {}", member.alias));
            }
            lines.push("exit".to_string());
        }

        banner(&mut lines, "ZONESET CONFIGURATION");
        lines.push(format!("zoneset name {zoneset} vsan {vsan}"));
        for zone in config.zones() {
            lines.push(format!("  member {}", zone.name()));
        }
        lines.push("exit".to_string());

        banner(&mut lines, "ACTIVATE AND SAVE");
        lines.push(format!("zoneset activate name {zoneset} vsan {vsan}"));
        lines.push("copy running-config startup-config".to_string());

        finish(lines)
    }

    fn emit_rollback(&self, config: &Configuration) -> String {
        let vsan = config.vsan();
        let zoneset = config.zoneset_name();
        let mut lines = vec![ROLLBACK_BANNER.to_string()];

        lines.push(format!("no zoneset activate name {zoneset} vsan {vsan}"));
        lines.push(format!("no zoneset name {zoneset} vsan {vsan}"));
        for zone in config.zones().iter().rev() {
            lines.push(format!("no zone name {} vsan {vsan}", zone.name()));
        }
        lines.push("device-alias database".to_string());
        for member in alias_definitions(config).iter().rev() {
            lines.push(format!("  no device-alias name {}", member.alias));
        }
        lines.push("exit".to_string());
        lines.push("device-alias commit".to_string());
        lines.push("copy running-config startup-config".to_string());

        finish(lines)
    }

    fn emit_rollback_csv(&self, config: &Configuration) -> String {
        rollback_rows(config)
    }
}
