use std::fs;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use zone_core::{build_for_diff, reconcile, Warning};
use zone_designer::loader::{load_initiators, load_pairs, load_targets, read_text};
use zone_designer::report::{render_diff, render_summary, render_warnings};
use zone_designer::settings::discover;

use crate::cli::{DiffArgs, OutputFormat};

pub fn run_diff(args: DiffArgs) -> Result<()> {
    if args.plain || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let settings = discover(args.generation.config.as_deref())?;
    let options = args.generation.resolve(&settings);
    let initiators = load_initiators(&args.generation.initiators)?;
    let targets = load_targets(&args.generation.targets, options.mode)?;
    print_warnings(&initiators.warnings);
    print_warnings(&targets.warnings);

    let pairs = args.pairs.as_deref().map(load_pairs).transpose()?;
    let zones = build_for_diff(
        &initiators.entries,
        &targets.entries,
        pairs.as_deref(),
        &options,
    )
    .context("failed to build zones")?;
    let existing = read_text(&args.existing)?;
    let reconciliation = reconcile(&zones, &existing);
    print_warnings(&reconciliation.warnings);
    tracing::info!(
        existing = %args.existing.display(),
        added = reconciliation.summary.added,
        removed = reconciliation.summary.removed,
        modified = reconciliation.summary.modified,
        "reconciled zones"
    );

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&reconciliation)?;
        fs::write(report_path, json)
            .with_context(|| format!("failed to write report file {}", report_path.display()))?;
    }

    if args.summary {
        println!("{}", render_summary(&reconciliation.entries));
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_diff(&reconciliation.entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reconciliation)?),
    }

    Ok(())
}

fn print_warnings(warnings: &[Warning]) {
    if !warnings.is_empty() {
        eprintln!("{}", render_warnings(warnings));
    }
}
