//! Conversion of line-format endpoint lists into the structured YAML format.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use zone_core::{parse_initiators, parse_targets, SourceFormat, Warning, ZoneMode};

static HOST_SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
static ARRAY_SUFFIX_RES: OnceLock<Vec<Regex>> = OnceLock::new();

fn host_suffix_re() -> &'static Regex {
    HOST_SUFFIX_RE.get_or_init(|| Regex::new(r"(?i)_(?:HBA|FC)\d+$").unwrap())
}

/// Most specific suffix first.
fn array_suffix_res() -> &'static [Regex] {
    ARRAY_SUFFIX_RES.get_or_init(|| {
        [
            r"(?i)_CT\d+_FC\d+$",
            r"(?i)_SVM_FC_\d+$",
            r"(?i)_CT\d+$",
            r"(?i)_SVM$",
            r"(?i)_FC_\d+$",
            r"(?i)_FC\d+$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
    })
}

/// Which endpoint list a line-format file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    Initiators,
    Targets,
}

/// Guess the list kind from the file name (`init`/`hba` or `target`/`tgt`).
pub fn detect_kind(path: &Path) -> Option<MigrationKind> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    if name.contains("init") || name.contains("hba") {
        Some(MigrationKind::Initiators)
    } else if name.contains("target") || name.contains("tgt") {
        Some(MigrationKind::Targets)
    } else {
        None
    }
}

/// Host name of an HBA alias: `esx01_HBA0` -> `esx01`.
pub fn detect_host(alias: &str) -> String {
    host_suffix_re().replace(alias, "").into_owned()
}

/// Storage array name of a target alias: `pure01_CT0_FC1` -> `pure01`.
pub fn detect_storage_array(alias: &str) -> String {
    array_suffix_res()
        .iter()
        .find(|re| re.is_match(alias))
        .map(|re| re.replace(alias, "").into_owned())
        .unwrap_or_else(|| alias.to_string())
}

#[derive(Debug, Serialize)]
struct InitiatorDocument {
    initiators: Vec<MigratedInitiator>,
}

#[derive(Debug, Serialize)]
struct MigratedInitiator {
    alias: String,
    wwpn: String,
    host: String,
}

#[derive(Debug, Serialize)]
struct TargetDocument {
    targets: Vec<MigratedTarget>,
}

#[derive(Debug, Serialize)]
struct MigratedTarget {
    alias: String,
    wwpn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    storage_array: String,
}

/// Result of one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub yaml: String,
    pub count: usize,
    pub warnings: Vec<Warning>,
}

pub fn migrate(text: &str, kind: MigrationKind) -> Result<Migration, serde_yaml::Error> {
    match kind {
        MigrationKind::Initiators => migrate_initiators(text),
        MigrationKind::Targets => migrate_targets(text),
    }
}

pub fn migrate_initiators(text: &str) -> Result<Migration, serde_yaml::Error> {
    // Line-format parsing cannot fail.
    let parsed = parse_initiators(text, SourceFormat::Lines).unwrap_or_default();
    let initiators: Vec<_> = parsed
        .entries
        .iter()
        .map(|e| MigratedInitiator {
            alias: e.alias.to_string(),
            wwpn: e.wwpn.to_string(),
            host: detect_host(e.alias.as_str()),
        })
        .collect();
    Ok(Migration {
        count: initiators.len(),
        yaml: serde_yaml::to_string(&InitiatorDocument { initiators })?,
        warnings: parsed.warnings,
    })
}

pub fn migrate_targets(text: &str) -> Result<Migration, serde_yaml::Error> {
    let parsed = parse_targets(text, SourceFormat::Lines, ZoneMode::Many).unwrap_or_default();
    let targets: Vec<_> = parsed
        .entries
        .iter()
        .map(|e| MigratedTarget {
            alias: e.alias.to_string(),
            wwpn: e.wwpn.to_string(),
            group: e.group.clone(),
            storage_array: detect_storage_array(e.alias.as_str()),
        })
        .collect();
    Ok(Migration {
        count: targets.len(),
        yaml: serde_yaml::to_string(&TargetDocument { targets })?,
        warnings: parsed.warnings,
    })
}
