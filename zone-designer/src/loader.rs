use std::fs;
use std::path::Path;

use thiserror::Error;
use zone_core::{
    parse_initiators, parse_targets, InitiatorEndpoint, ParseError, Parsed, SelectedPair,
    SourceFormat, TargetEndpoint, ZoneMode,
};

/// Errors returned when reading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },
    #[error("failed to parse selection file {path}: {source}")]
    Pairs {
        path: String,
        source: serde_yaml::Error,
    },
}

pub fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load an initiator list, picking the format from the file extension.
pub fn load_initiators(path: &Path) -> Result<Parsed<InitiatorEndpoint>, LoadError> {
    let text = read_text(path)?;
    parse_initiators(&text, SourceFormat::from_path(path)).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load a target list, picking the format from the file extension.
pub fn load_targets(path: &Path, mode: ZoneMode) -> Result<Parsed<TargetEndpoint>, LoadError> {
    let text = read_text(path)?;
    parse_targets(&text, SourceFormat::from_path(path), mode).map_err(|source| {
        LoadError::Parse {
            path: path.display().to_string(),
            source,
        }
    })
}

/// Load explicit initiator/target selections from a YAML list.
pub fn load_pairs(path: &Path) -> Result<Vec<SelectedPair>, LoadError> {
    let text = read_text(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&text).map_err(|source| LoadError::Pairs {
        path: path.display().to_string(),
        source,
    })
}
