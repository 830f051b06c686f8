//! File-facing layer of the zone designer.
//!
//! [`zone_core`] works on text already in memory. This crate adds what the
//! command-line tool needs around it:
//!
//! - [`loader`]: read endpoint lists and selection files, format chosen by extension
//! - [`settings`]: optional `zone-designer.toml` generation defaults
//! - [`report`]: colored rendering of configuration, diffs and warnings
//! - [`summary`]: the summary block appended to generated configuration and
//!   the dry-run zone preview
//! - [`migrate`]: conversion of line-format lists to YAML

pub mod loader;
pub mod migrate;
pub mod report;
pub mod settings;
pub mod summary;
