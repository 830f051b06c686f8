//! Fibre Channel zoning primitives: endpoint parsing, zone selection,
//! Cisco/Brocade configuration generation, switch output import and
//! zone-set reconciliation.
//!
//! Everything here works on text already in memory; reading and writing
//! files is left to callers.

pub mod diff;
pub mod format;
pub mod generator;
pub mod importer;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod selector;
pub mod validator;
pub mod warning;

pub use diff::{compute_diff, summarize, DiffEntry, DiffStatus, DiffSummary};
pub use format::{format_json, format_summary, format_text};
pub use generator::{generator, BrocadeGenerator, CiscoGenerator, Generator};
pub use importer::{import_zones, ImportGrammar, Imported};
pub use model::{
    normalize_wwpn, validate_alias, zone_name, Alias, AliasError, Configuration, Endpoint,
    InitiatorEndpoint, NameOrder, RangeStatus, Separator, TargetEndpoint, Vendor, Wwpn, WwpnError,
    Zone, ZoneError, ZoneMember, ZoneMode, DEFAULT_IFACE_RANGE,
};
pub use parser::{parse_initiators, parse_targets, ParseError, Parsed, SourceFormat};
pub use pipeline::{
    build_for_diff, generate, generate_from_pairs, reconcile, GenerateError, GenerateOptions,
    Generation, Reconciliation, Rollback,
};
pub use selector::{
    build_selected_zones, build_zones, GroupMerge, NamingOptions, SelectError, SelectOptions,
    SelectedPair, UnknownAliasError,
};
pub use validator::{raw_entries, validate, EndpointKind, RawEntry};
pub use warning::{Position, Warning};
