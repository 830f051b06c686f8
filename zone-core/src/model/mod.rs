//! Typed endpoint, zone and configuration records.

pub mod alias;
pub mod configuration;
pub mod endpoint;
pub mod wwpn;
pub mod zone;

pub use alias::{validate_alias, Alias, AliasError, MAX_ALIAS_LEN};
pub use configuration::{Configuration, Vendor, ZoneMode, DEFAULT_IFACE_RANGE};
pub use endpoint::{Endpoint, InitiatorEndpoint, TargetEndpoint};
pub use wwpn::{normalize_wwpn, RangeStatus, RangeViolation, Wwpn, WwpnError};
pub use zone::{zone_name, NameOrder, Separator, Zone, ZoneError, ZoneMember};
