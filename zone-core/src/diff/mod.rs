//! Zone set comparison.

pub mod engine;
pub mod result;

pub use engine::{compute_diff, summarize};
pub use result::{DiffEntry, DiffStatus, DiffSummary};
