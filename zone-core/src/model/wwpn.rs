use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const OCTETS: usize = 8;

/// Errors produced while normalizing or range-checking a WWPN.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WwpnError {
    /// An octet is empty, contains a non-hex digit, or is longer than two digits.
    #[error("malformed octet '{octet}' in WWPN '{input}'")]
    MalformedOctet { input: String, octet: String },
    /// The address does not reconstruct to exactly 8 octets / 16 hex digits.
    #[error("WWPN '{input}' has {octets} octet(s), expected 8")]
    WrongLength { input: String, octets: usize },
    /// The address is reserved (all-zero or broadcast).
    #[error("WWPN {wwpn} is not a usable port address ({reason})")]
    InvalidRange { wwpn: String, reason: RangeViolation },
}

/// Reserved address classes rejected by [`Wwpn::check_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeViolation {
    AllZero,
    Broadcast,
}

impl Display for RangeViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllZero => write!(f, "all-zero"),
            Self::Broadcast => write!(f, "all-ones broadcast"),
        }
    }
}

/// Outcome of a successful range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    /// First nibble is a Fibre Channel NAA value (1, 2, 5 or 6).
    Standard,
    /// First nibble is outside the usual NAA values. Advisory only.
    UnusualNaa(char),
}

/// A normalized World Wide Port Name: 8 lower-case, zero-padded hex octets
/// joined by colons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wwpn(String);

impl Wwpn {
    /// Normalize `raw` into canonical form.
    ///
    /// Octets may be separated by `:`, `-` or `.`; a bare 16-digit string is
    /// also accepted. Each octet is left-padded to two digits.
    pub fn parse(raw: &str) -> Result<Self, WwpnError> {
        let input = raw.trim().to_ascii_lowercase();
        let tokens: Vec<&str> = if input.len() == OCTETS * 2
            && input.chars().all(|c| c.is_ascii_hexdigit())
        {
            (0..OCTETS).map(|i| &input[i * 2..i * 2 + 2]).collect()
        } else {
            input.split([':', '-', '.']).collect()
        };

        let mut octets = Vec::with_capacity(OCTETS);
        for token in &tokens {
            if token.is_empty() || token.len() > 2 || !token.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(WwpnError::MalformedOctet {
                    input: raw.trim().to_string(),
                    octet: (*token).to_string(),
                });
            }
            octets.push(format!("{token:0>2}"));
        }

        if octets.len() != OCTETS {
            return Err(WwpnError::WrongLength {
                input: raw.trim().to_string(),
                octets: octets.len(),
            });
        }

        Ok(Self(octets.join(":")))
    }

    /// The all-zero address used for alias-only zone members.
    pub fn placeholder() -> Self {
        Self(["00"; OCTETS].join(":"))
    }

    pub fn is_placeholder(&self) -> bool {
        self.digits().all(|c| c == '0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `token` is already in canonical 8x2 colon form (any case).
    pub fn is_canonical_form(token: &str) -> bool {
        let parts: Vec<&str> = token.split(':').collect();
        parts.len() == OCTETS
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// Reject reserved addresses and flag unusual NAA identifiers.
    pub fn check_range(&self) -> Result<RangeStatus, WwpnError> {
        if self.digits().all(|c| c == '0') {
            return Err(WwpnError::InvalidRange {
                wwpn: self.0.clone(),
                reason: RangeViolation::AllZero,
            });
        }
        if self.digits().all(|c| c == 'f') {
            return Err(WwpnError::InvalidRange {
                wwpn: self.0.clone(),
                reason: RangeViolation::Broadcast,
            });
        }
        match self.digits().next() {
            Some('1' | '2' | '5' | '6') | None => Ok(RangeStatus::Standard),
            Some(naa) => Ok(RangeStatus::UnusualNaa(naa)),
        }
    }

    fn digits(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().filter(|c| *c != ':')
    }
}

/// Normalize a raw WWPN string. See [`Wwpn::parse`].
pub fn normalize_wwpn(raw: &str) -> Result<Wwpn, WwpnError> {
    Wwpn::parse(raw)
}

impl FromStr for Wwpn {
    type Err = WwpnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Wwpn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Wwpn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Wwpn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Wwpn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
