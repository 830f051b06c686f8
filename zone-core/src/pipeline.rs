//! End-to-end generation and reconciliation over already-parsed endpoints.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::diff::{compute_diff, summarize, DiffEntry, DiffSummary};
use crate::generator::generator;
use crate::importer::import_zones;
use crate::model::{
    Configuration, InitiatorEndpoint, NameOrder, Separator, TargetEndpoint, Vendor, Zone,
    ZoneMode, DEFAULT_IFACE_RANGE,
};
use crate::selector::{
    build_selected_zones, build_zones, filter_fabric, GroupMerge, SelectError, SelectOptions,
    SelectedPair,
};
use crate::warning::Warning;

/// Every knob of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub vendor: Vendor,
    pub mode: ZoneMode,
    pub order: NameOrder,
    pub separator: Separator,
    pub vsan: u16,
    pub vsan_name: Option<String>,
    pub iface_range: String,
    pub zoneset_name: Option<String>,
    pub fabric_filter: Option<String>,
    pub rollback: bool,
    pub group_merge: GroupMerge,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            vendor: Vendor::Cisco,
            mode: ZoneMode::Single,
            order: NameOrder::TargetInitiator,
            separator: Separator::Two,
            vsan: 0,
            vsan_name: None,
            iface_range: DEFAULT_IFACE_RANGE.to_string(),
            zoneset_name: None,
            fabric_filter: None,
            rollback: false,
            group_merge: GroupMerge::Block,
        }
    }
}

impl GenerateOptions {
    pub fn select_options(&self) -> SelectOptions {
        SelectOptions {
            mode: self.mode,
            order: self.order,
            separator: self.separator,
            fabric_filter: self.fabric_filter.clone(),
            group_merge: self.group_merge,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("VSAN {0} is out of range; Cisco VSANs are 1-4094")]
    InvalidVsan(u16),
    #[error("no initiators{}", in_fabric(.fabric))]
    NoInitiators { fabric: Option<String> },
    #[error("no targets{}", in_fabric(.fabric))]
    NoTargets { fabric: Option<String> },
    #[error(transparent)]
    Select(#[from] SelectError),
}

fn in_fabric(fabric: &Option<String>) -> String {
    match fabric {
        Some(fabric) => format!(" in fabric {fabric}"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rollback {
    pub config: String,
    pub csv: String,
}

/// Everything a generation request produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub configuration: Configuration,
    pub config: String,
    pub csv: String,
    pub rollback: Option<Rollback>,
    pub warnings: Vec<Warning>,
}

/// Build zones from every initiator/target pairing and render them.
pub fn generate(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    options: &GenerateOptions,
) -> Result<Generation, GenerateError> {
    check_vsan(options)?;
    check_endpoints(initiators, targets, options)?;
    let zones = build_zones(initiators, targets, &options.select_options());
    Ok(render(zones, options))
}

/// Build one zone per explicit selection and render them.
pub fn generate_from_pairs(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    pairs: &[SelectedPair],
    options: &GenerateOptions,
) -> Result<Generation, GenerateError> {
    check_vsan(options)?;
    check_endpoints(initiators, targets, options)?;
    let zones = selected_zones(initiators, targets, pairs, options)?;
    Ok(render(zones, options))
}

/// Build the zones a request would produce without rendering any
/// configuration. Zone names do not depend on the VSAN, so none is required.
pub fn build_for_diff(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    pairs: Option<&[SelectedPair]>,
    options: &GenerateOptions,
) -> Result<Vec<Zone>, GenerateError> {
    check_endpoints(initiators, targets, options)?;
    match pairs {
        Some(pairs) => selected_zones(initiators, targets, pairs, options),
        None => Ok(build_zones(initiators, targets, &options.select_options())),
    }
}

fn selected_zones(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    pairs: &[SelectedPair],
    options: &GenerateOptions,
) -> Result<Vec<Zone>, GenerateError> {
    let fabric = options.fabric_filter.as_deref();
    let initiators: Vec<_> = filter_fabric(initiators, fabric).into_iter().cloned().collect();
    let targets: Vec<_> = filter_fabric(targets, fabric).into_iter().cloned().collect();
    Ok(build_selected_zones(
        &initiators,
        &targets,
        pairs,
        &options.select_options().naming(),
    )?)
}

fn check_vsan(options: &GenerateOptions) -> Result<(), GenerateError> {
    if options.vendor == Vendor::Cisco && !(1..=4094).contains(&options.vsan) {
        return Err(GenerateError::InvalidVsan(options.vsan));
    }
    Ok(())
}

fn check_endpoints(
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    options: &GenerateOptions,
) -> Result<(), GenerateError> {
    let fabric = options.fabric_filter.as_deref();
    if filter_fabric(initiators, fabric).is_empty() {
        return Err(GenerateError::NoInitiators {
            fabric: options.fabric_filter.clone(),
        });
    }
    if filter_fabric(targets, fabric).is_empty() {
        return Err(GenerateError::NoTargets {
            fabric: options.fabric_filter.clone(),
        });
    }
    Ok(())
}

fn render(zones: Vec<Zone>, options: &GenerateOptions) -> Generation {
    let warnings = duplicate_names(&zones);
    let configuration = Configuration::new(options.vendor, zones)
        .with_vsan(options.vsan)
        .with_vsan_name(options.vsan_name.clone())
        .with_iface_range(options.iface_range.clone())
        .with_zoneset_name(options.zoneset_name.clone())
        .with_fabric(options.fabric_filter.clone());

    let backend = generator(options.vendor);
    let rollback = options.rollback.then(|| Rollback {
        config: backend.emit_rollback(&configuration),
        csv: backend.emit_rollback_csv(&configuration),
    });
    tracing::info!(
        vendor = %options.vendor,
        mode = %options.mode,
        zones = configuration.zones().len(),
        "generated configuration"
    );

    Generation {
        config: backend.emit_config(&configuration),
        csv: backend.emit_csv(&configuration),
        rollback,
        warnings,
        configuration,
    }
}

fn duplicate_names(zones: &[Zone]) -> Vec<Warning> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    zones
        .iter()
        .filter(|z| !seen.insert(z.name()) && reported.insert(z.name()))
        .map(|z| Warning::DuplicateZoneName {
            zone: z.name().to_string(),
        })
        .collect()
}

/// Result of comparing generated zones with imported switch text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub entries: Vec<DiffEntry>,
    pub summary: DiffSummary,
    pub warnings: Vec<Warning>,
}

/// Import `existing_text` and diff it against `generated`.
pub fn reconcile(generated: &[Zone], existing_text: &str) -> Reconciliation {
    let imported = import_zones(existing_text);
    let entries = compute_diff(generated, &imported.zones);
    let summary = summarize(&entries);
    Reconciliation {
        entries,
        summary,
        warnings: imported.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{normalize_wwpn, validate_alias};

    fn initiator(alias: &str, wwpn: &str) -> InitiatorEndpoint {
        InitiatorEndpoint::new(
            validate_alias(alias).expect("alias"),
            normalize_wwpn(wwpn).expect("wwpn"),
        )
    }

    fn target(alias: &str, wwpn: &str) -> TargetEndpoint {
        TargetEndpoint::new(
            validate_alias(alias).expect("alias"),
            normalize_wwpn(wwpn).expect("wwpn"),
        )
    }

    #[test]
    fn cisco_rejects_vsan_zero() {
        let err = generate(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[target("T1", "50:00:00:00:00:00:00:01")],
            &GenerateOptions::default(),
        )
        .expect_err("vsan 0");
        assert!(matches!(err, GenerateError::InvalidVsan(0)));
    }

    #[test]
    fn brocade_accepts_any_vsan() {
        let options = GenerateOptions {
            vendor: Vendor::Brocade,
            ..GenerateOptions::default()
        };
        let generation = generate(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[target("T1", "50:00:00:00:00:00:00:01")],
            &options,
        )
        .expect("brocade");
        assert_eq!(generation.configuration.zoneset_name(), "cfg");
        assert!(generation.rollback.is_none());
    }

    #[test]
    fn fabric_filter_can_empty_a_side() {
        let options = GenerateOptions {
            vsan: 10,
            fabric_filter: Some("B".into()),
            ..GenerateOptions::default()
        };
        let err = generate(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[target("T1", "50:00:00:00:00:00:00:01")],
            &options,
        )
        .expect_err("filtered out");
        assert_eq!(err.to_string(), "no initiators in fabric B");
    }

    #[test]
    fn repeated_zone_names_are_reported_once() {
        let mut t2 = target("T2", "50:00:00:00:00:00:00:02");
        t2.group = Some("ARR".into());
        let pairs = vec![
            SelectedPair {
                initiator: "H1".into(),
                targets: vec!["T2".into()],
            },
            SelectedPair {
                initiator: "H1".into(),
                targets: vec!["T2".into()],
            },
            SelectedPair {
                initiator: "H1".into(),
                targets: vec!["T2".into()],
            },
        ];
        let options = GenerateOptions {
            vsan: 10,
            ..GenerateOptions::default()
        };
        let generation = generate_from_pairs(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[t2],
            &pairs,
            &options,
        )
        .expect("pairs");
        assert_eq!(
            generation.warnings,
            vec![Warning::DuplicateZoneName {
                zone: "T2__H1".into()
            }]
        );
    }

    #[test]
    fn diff_zones_need_no_vsan() {
        let zones = build_for_diff(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[target("T1", "50:00:00:00:00:00:00:01")],
            None,
            &GenerateOptions::default(),
        )
        .expect("vsan 0 is fine for a diff");
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name(), "T1__H1");
    }

    #[test]
    fn diff_zones_still_need_both_sides() {
        let err = build_for_diff(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[],
            None,
            &GenerateOptions::default(),
        )
        .expect_err("no targets");
        assert!(matches!(err, GenerateError::NoTargets { fabric: None }));
    }

    #[test]
    fn rollback_only_when_requested() {
        let options = GenerateOptions {
            vsan: 10,
            rollback: true,
            ..GenerateOptions::default()
        };
        let generation = generate(
            &[initiator("H1", "21:00:00:00:00:00:00:01")],
            &[target("T1", "50:00:00:00:00:00:00:01")],
            &options,
        )
        .expect("cisco");
        let rollback = generation.rollback.expect("rollback requested");
        assert!(rollback.config.contains("no zone name T1__H1 vsan 10"));
        assert!(rollback.csv.starts_with("Type;Name;VSAN\n"));
    }
}
