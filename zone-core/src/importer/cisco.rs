use std::sync::OnceLock;

use regex::Regex;

use super::{Extract, RawZone};

static ZONE_NAME_RE: OnceLock<Regex> = OnceLock::new();
static MEMBER_RE: OnceLock<Regex> = OnceLock::new();
static ACTIVE_MEMBER_RE: OnceLock<Regex> = OnceLock::new();
static DEVICE_ALIAS_RE: OnceLock<Regex> = OnceLock::new();
static BARE_MEMBER_RE: OnceLock<Regex> = OnceLock::new();
static BARE_HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn zone_name_re() -> &'static Regex {
    ZONE_NAME_RE.get_or_init(|| Regex::new(r"(?m)^\s*zone\s+name\s+(\S+)\s+vsan\s+\d+").unwrap())
}

fn member_re() -> &'static Regex {
    MEMBER_RE.get_or_init(|| {
        Regex::new(r"^member\s+(?:device-alias|pwwn|fcalias)\s+([^\s\[]+)").unwrap()
    })
}

/// `show zoneset active` member: `* fcid 0x010203 [device-alias H1]` or
/// `fcid 0x010203 [pwwn 21:00:...]`.
fn active_member_re() -> &'static Regex {
    ACTIVE_MEMBER_RE.get_or_init(|| {
        Regex::new(r"^\*?\s*fcid\s+0x[0-9a-fA-F]+\s+\[(device-alias|pwwn)\s+([^\]\s]+)\]").unwrap()
    })
}

fn device_alias_re() -> &'static Regex {
    DEVICE_ALIAS_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*device-alias\s+name\s+(\S+)\s+pwwn\s+(\S+)").unwrap()
    })
}

fn bare_member_re() -> &'static Regex {
    BARE_MEMBER_RE.get_or_init(|| {
        Regex::new(r"^member\s+(?:(?:device-alias|pwwn|fcalias)\s+)?(\S+)").unwrap()
    })
}

/// `zone name <z> ...`, `zone <z>`, or a lone `<z>` token.
fn bare_header_re() -> &'static Regex {
    BARE_HEADER_RE.get_or_init(|| Regex::new(r"^(?:zone\s+(?:name\s+)?)?(\S+)(?:\s+vsan\s+\d+)?$").unwrap())
}

pub(crate) fn detect_zone_name(text: &str) -> bool {
    zone_name_re().is_match(text)
}

pub(crate) fn parse_zone_name(text: &str) -> Extract {
    let mut extract = Extract {
        aliases: device_aliases(text),
        ..Extract::default()
    };
    let mut current: Option<RawZone> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = zone_name_re().captures(line) {
            extract.zones.extend(current.take());
            current = Some(RawZone::new(&caps[1]));
            continue;
        }
        let Some(zone) = current.as_mut() else {
            continue;
        };
        if let Some(caps) = member_re().captures(line) {
            zone.members.push(caps[1].to_string());
        } else if let Some(caps) = active_member_re().captures(line) {
            zone.members.push(caps[2].to_string());
        } else if line.starts_with("zoneset ") || line.starts_with("zone ") {
            extract.zones.extend(current.take());
        }
    }
    extract.zones.extend(current);
    extract
}

pub(crate) fn detect_bare_members(text: &str) -> bool {
    text.lines()
        .any(|line| bare_member_re().is_match(line.trim()))
}

pub(crate) fn parse_bare_members(text: &str) -> Extract {
    let mut extract = Extract {
        aliases: device_aliases(text),
        ..Extract::default()
    };
    let mut current: Option<RawZone> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line == "exit" || line.starts_with('!') || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = bare_member_re().captures(line) {
            if let Some(zone) = current.as_mut() {
                zone.members.push(caps[1].to_string());
            }
            continue;
        }
        if line.starts_with("device-alias") {
            continue;
        }
        if let Some(caps) = bare_header_re().captures(line) {
            extract.zones.extend(current.take());
            current = Some(RawZone::new(&caps[1]));
        }
    }
    extract.zones.extend(current);
    extract
}

fn device_aliases(text: &str) -> std::collections::HashMap<String, String> {
    device_alias_re()
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_running_config_zones() {
        let text = "\
device-alias database
  device-alias name H1 pwwn 21:00:00:00:00:00:00:01
exit
zone name T1__H1 vsan 100
  member device-alias H1
  member pwwn 50:00:00:00:00:00:00:01
exit
zone name T2__H1 vsan 100
  member fcalias H1
  member device-alias T2
zoneset name zs vsan 100
  member T1__H1
";
        let extract = parse_zone_name(text);
        assert_eq!(
            extract.zones,
            vec![
                RawZone {
                    name: "T1__H1".into(),
                    members: vec!["H1".into(), "50:00:00:00:00:00:00:01".into()],
                },
                RawZone {
                    name: "T2__H1".into(),
                    members: vec!["H1".into(), "T2".into()],
                },
            ]
        );
        assert_eq!(
            extract.aliases.get("H1").map(String::as_str),
            Some("21:00:00:00:00:00:00:01")
        );
    }

    #[test]
    fn reads_show_zoneset_active() {
        let text = "\
zoneset name zs vsan 100
  zone name T1__H1 vsan 100
  * fcid 0x010000 [device-alias H1]
  * fcid 0x020000 [pwwn 50:00:00:00:00:00:00:01]
";
        let extract = parse_zone_name(text);
        assert_eq!(extract.zones[0].members, vec!["H1", "50:00:00:00:00:00:00:01"]);
    }

    #[test]
    fn bare_members_accept_lone_header() {
        let text = "Z1\nmember H1\nmember T1\n\nzone Z2\nmember device-alias H2\nmember T2\n";
        assert!(detect_bare_members(text));
        let extract = parse_bare_members(text);
        let names: Vec<_> = extract.zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Z1", "Z2"]);
        assert_eq!(extract.zones[1].members, vec!["H2", "T2"]);
    }
}
