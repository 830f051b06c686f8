use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Longest alias accepted by either switch family.
pub const MAX_ALIAS_LEN: usize = 64;

/// Errors produced by [`validate_alias`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AliasError {
    #[error("alias cannot be empty")]
    Empty,
    #[error("alias '{alias}' is too long ({len} > {MAX_ALIAS_LEN})")]
    TooLong { alias: String, len: usize },
    #[error("alias '{alias}' contains invalid character {ch:?}")]
    InvalidCharacter { alias: String, ch: char },
}

/// A device alias restricted to `[A-Za-z0-9_-]`, 1 to 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alias(String);

impl Alias {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim and validate an alias.
pub fn validate_alias(raw: &str) -> Result<Alias, AliasError> {
    let alias = raw.trim();
    if alias.is_empty() {
        return Err(AliasError::Empty);
    }
    let len = alias.chars().count();
    if len > MAX_ALIAS_LEN {
        return Err(AliasError::TooLong {
            alias: alias.to_string(),
            len,
        });
    }
    if let Some(ch) = alias
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(AliasError::InvalidCharacter {
            alias: alias.to_string(),
            ch,
        });
    }
    Ok(Alias(alias.to_string()))
}

impl Display for Alias {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Alias {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Alias {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        validate_alias(&raw).map_err(serde::de::Error::custom)
    }
}
