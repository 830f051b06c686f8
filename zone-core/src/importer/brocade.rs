use std::sync::OnceLock;

use regex::Regex;

use super::{split_members, Extract, RawZone};

static ZONECREATE_RE: OnceLock<Regex> = OnceLock::new();
static COMMAND_RE: OnceLock<Regex> = OnceLock::new();
static CFGSHOW_ZONE_RE: OnceLock<Regex> = OnceLock::new();
static CFGSHOW_ENTRY_RE: OnceLock<Regex> = OnceLock::new();

fn zonecreate_re() -> &'static Regex {
    ZONECREATE_RE.get_or_init(|| Regex::new(r"(?m)^\s*zonecreate\s+").unwrap())
}

/// `zonecreate "<z>","<m>;<m>"`, `zoneadd ...` or `alicreate "<a>","<w>"`.
fn command_re() -> &'static Regex {
    COMMAND_RE.get_or_init(|| {
        Regex::new(r#"^\s*(zonecreate|zoneadd|alicreate)\s+"?([^",\s]+)"?\s*,\s*"([^"]*)""#).unwrap()
    })
}

fn cfgshow_zone_re() -> &'static Regex {
    CFGSHOW_ZONE_RE.get_or_init(|| Regex::new(r"(?m)^\s*zone:\s+").unwrap())
}

/// A `cfgshow` entry line: `zone:`, `alias:` or `cfg:` followed by a name
/// and, optionally, the first part of its member list.
fn cfgshow_entry_re() -> &'static Regex {
    CFGSHOW_ENTRY_RE.get_or_init(|| Regex::new(r"^\s*(zone|alias|cfg):\s+(\S+)\s*(.*)$").unwrap())
}

pub(crate) fn detect_commands(text: &str) -> bool {
    zonecreate_re().is_match(text)
}

pub(crate) fn parse_commands(text: &str) -> Extract {
    let mut extract = Extract::default();

    for line in text.lines() {
        let Some(caps) = command_re().captures(line) else {
            continue;
        };
        let name = &caps[2];
        let members = split_members(&caps[3]);
        match &caps[1] {
            "zonecreate" => {
                let mut zone = RawZone::new(name);
                zone.members.extend(members);
                extract.zones.push(zone);
            }
            "zoneadd" => match extract.zones.iter_mut().find(|z| z.name == name) {
                Some(zone) => zone.members.extend(members),
                None => tracing::debug!(zone = name, "zoneadd for undefined zone"),
            },
            _ => {
                if let Some(first) = members.into_iter().next() {
                    extract.aliases.insert(name.to_string(), first);
                }
            }
        }
    }
    extract
}

pub(crate) fn detect_cfgshow(text: &str) -> bool {
    cfgshow_zone_re().is_match(text)
}

enum Open {
    Nothing,
    Zone,
    Alias(String),
    Cfg,
}

pub(crate) fn parse_cfgshow(text: &str) -> Extract {
    let mut extract = Extract::default();
    let mut open = Open::Nothing;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Effective configuration:") {
            if !extract.zones.is_empty() {
                break;
            }
            open = Open::Nothing;
            continue;
        }
        if let Some(caps) = cfgshow_entry_re().captures(line) {
            let name = &caps[2];
            let rest = &caps[3];
            open = match &caps[1] {
                "zone" => {
                    let mut zone = RawZone::new(name);
                    zone.members.extend(split_members(rest));
                    extract.zones.push(zone);
                    Open::Zone
                }
                "alias" => {
                    if let Some(first) = split_members(rest).next() {
                        extract.aliases.insert(name.to_string(), first);
                    }
                    Open::Alias(name.to_string())
                }
                _ => Open::Cfg,
            };
            continue;
        }
        // Continuation lines are indented.
        if trimmed.is_empty() || !line.starts_with(char::is_whitespace) {
            open = Open::Nothing;
            continue;
        }
        match &open {
            Open::Zone => {
                if let Some(zone) = extract.zones.last_mut() {
                    zone.members.extend(split_members(trimmed));
                }
            }
            Open::Alias(alias) => {
                if let Some(first) = split_members(trimmed).next() {
                    extract.aliases.entry(alias.clone()).or_insert(first);
                }
            }
            Open::Cfg | Open::Nothing => {}
        }
    }
    extract
}
