use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Classification of one zone name across the generated and existing sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffEntry {
    /// Only in the generated set.
    Added {
        zone_name: String,
        members: Vec<String>,
    },
    /// Only in the existing set.
    Removed {
        zone_name: String,
        members: Vec<String>,
    },
    /// In both with the same member set.
    Unchanged {
        zone_name: String,
        members: Vec<String>,
    },
    /// In both with different member sets.
    Modified {
        zone_name: String,
        /// Members on the existing side.
        before_members: Vec<String>,
        /// Members on the generated side.
        after_members: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
    Modified,
}

impl Display for DiffStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

impl DiffEntry {
    pub fn status(&self) -> DiffStatus {
        match self {
            Self::Added { .. } => DiffStatus::Added,
            Self::Removed { .. } => DiffStatus::Removed,
            Self::Unchanged { .. } => DiffStatus::Unchanged,
            Self::Modified { .. } => DiffStatus::Modified,
        }
    }

    pub fn zone_name(&self) -> &str {
        match self {
            Self::Added { zone_name, .. }
            | Self::Removed { zone_name, .. }
            | Self::Unchanged { zone_name, .. }
            | Self::Modified { zone_name, .. } => zone_name,
        }
    }
}

/// Entry counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    /// True when applying the generated set would change nothing.
    pub fn is_clean(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}
