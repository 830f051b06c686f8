use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use zone_core::{GroupMerge, NameOrder, Separator, Vendor, ZoneMode};

/// Defaults file looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "zone-designer.toml";

/// Generation defaults. Every field is optional; command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub vendor: Option<Vendor>,
    pub mode: Option<ZoneMode>,
    pub order: Option<NameOrder>,
    pub separator: Option<Separator>,
    pub vsan: Option<u16>,
    pub vsan_name: Option<String>,
    pub iface: Option<String>,
    pub zoneset: Option<String>,
    pub fabric: Option<String>,
    pub group_merge: Option<GroupMerge>,
    pub rollback: Option<bool>,
    pub rollback_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from `explicit`, else from [`DEFAULT_SETTINGS_FILE`] in the
/// working directory if it exists, else defaults.
pub fn discover(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit {
        return load_settings(path);
    }
    let local = Path::new(DEFAULT_SETTINGS_FILE);
    if local.is_file() {
        tracing::debug!(path = DEFAULT_SETTINGS_FILE, "using settings from working directory");
        return load_settings(local);
    }
    Ok(Settings::default())
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_partial_settings() {
        let settings = parse_settings(
            "vendor = \"brocade\"\nmode = \"many\"\norder = \"it\"\nseparator = \"one\"\ngroup_merge = \"name\"\n",
            "inline".into(),
        )
        .expect("valid toml");
        assert_eq!(settings.vendor, Some(Vendor::Brocade));
        assert_eq!(settings.mode, Some(ZoneMode::Many));
        assert_eq!(settings.order, Some(NameOrder::InitiatorTarget));
        assert_eq!(settings.separator, Some(Separator::One));
        assert_eq!(settings.group_merge, Some(GroupMerge::Name));
        assert_eq!(settings.vsan, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_settings("colour = true\n", "inline".into()).expect_err("unknown key");
        assert!(err.to_string().contains("inline"));
    }
}
