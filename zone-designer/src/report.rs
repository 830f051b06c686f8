use std::sync::OnceLock;

use colored::Colorize;
use regex::Regex;
use zone_core::{format_summary, format_text, DiffEntry, Vendor, Warning};

static WWPN_RE: OnceLock<Regex> = OnceLock::new();

fn wwpn_re() -> &'static Regex {
    WWPN_RE.get_or_init(|| Regex::new(r"(?i)\b(?:[0-9a-f]{2}:){7}[0-9a-f]{2}\b").unwrap())
}

const CISCO_KEYWORDS: &[&str] = &[
    "config",
    "vsan",
    "interface",
    "no",
    "exit",
    "device-alias",
    "zone",
    "zoneset",
    "member",
    "copy",
];

const BROCADE_KEYWORDS: &[&str] = &[
    "alicreate",
    "zonecreate",
    "cfgcreate",
    "cfgadd",
    "cfgenable",
    "cfgsave",
    "cfgdisable",
    "cfgdelete",
    "zonedelete",
    "alidelete",
];

/// Highlight generated configuration for terminal output: banners dimmed,
/// leading vendor keyword bold, WWPNs yellow.
pub fn render_config(text: &str, vendor: Vendor) -> String {
    let keywords = match vendor {
        Vendor::Cisco => CISCO_KEYWORDS,
        Vendor::Brocade => BROCADE_KEYWORDS,
    };
    text.lines()
        .map(|line| render_config_line(line, keywords))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_config_line(line: &str, keywords: &[&str]) -> String {
    if line.trim_start().starts_with('!') {
        return line.cyan().dimmed().to_string();
    }
    let indent = &line[..line.len() - line.trim_start().len()];
    let body = line.trim_start();
    let (head, tail) = body.split_at(body.find(' ').unwrap_or(body.len()));
    let head = if keywords.contains(&head) {
        head.blue().bold().to_string()
    } else {
        head.to_string()
    };
    let tail = wwpn_re().replace_all(tail, |caps: &regex::Captures<'_>| {
        caps[0].yellow().to_string()
    });
    format!("{indent}{head}{tail}")
}

/// Render diff entries for terminal output.
pub fn render_diff(entries: &[DiffEntry]) -> String {
    let raw = format_text(entries);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('+') {
            line.green().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('~') {
            line.yellow().to_string()
        } else if line.starts_with('=') {
            line.dimmed().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render summary counts for terminal output.
pub fn render_summary(entries: &[DiffEntry]) -> String {
    format_summary(entries).cyan().to_string()
}

/// One `warning: ...` line per finding.
pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("{} {w}", "warning:".yellow()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_render_is_unchanged_text() {
        colored::control::set_override(false);
        let text = "! --- ZONE CONFIGURATION ---\nzone name T1__H1 vsan 10\n  member device-alias H1\n  device-alias name H1 pwwn 21:00:00:00:00:00:00:01";
        assert_eq!(render_config(text, Vendor::Cisco), text);
    }

    #[test]
    fn diff_lines_keep_prefixes() {
        colored::control::set_override(false);
        let entries = vec![DiffEntry::Added {
            zone_name: "Z1".into(),
            members: vec!["H1".into(), "T1".into()],
        }];
        assert_eq!(render_diff(&entries), "+ Z1 [H1, T1]");
        assert_eq!(render_summary(&entries), "added=1 removed=0 modified=0 unchanged=0");
    }
}
