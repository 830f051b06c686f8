use anyhow::{bail, Context, Result};
use serde::Serialize;
use zone_core::{raw_entries, validate, EndpointKind, SourceFormat, Warning};
use zone_designer::loader::read_text;
use zone_designer::report::render_warnings;

use crate::cli::{KindArg, OutputFormat, ValidateArgs};

#[derive(Debug, Serialize)]
struct ValidationReport {
    file: String,
    entries: usize,
    errors: usize,
    warnings: usize,
    findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct Finding {
    code: &'static str,
    severity: &'static str,
    message: String,
}

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let format = SourceFormat::from_path(&args.file);
    let entries = raw_entries(&text, format, endpoint_kind(args.kind))
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let findings = validate(&entries);
    let errors = findings.iter().filter(|w| is_error(w)).count();
    let warnings = findings.len() - errors;

    match args.format {
        OutputFormat::Text => {
            if !findings.is_empty() {
                println!("{}", render_warnings(&findings));
            }
            println!(
                "{}: {} entries, {} errors, {} warnings",
                args.file.display(),
                entries.len(),
                errors,
                warnings
            );
        }
        OutputFormat::Json => {
            let report = ValidationReport {
                file: args.file.display().to_string(),
                entries: entries.len(),
                errors,
                warnings,
                findings: findings
                    .iter()
                    .map(|w| Finding {
                        code: w.code(),
                        severity: if is_error(w) { "error" } else { "warning" },
                        message: w.to_string(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if errors > 0 {
        bail!("validation failed: {errors} errors");
    }
    if args.strict && warnings > 0 {
        bail!("validation failed in strict mode: {warnings} warnings");
    }
    Ok(())
}

/// Unusual NAA prefixes are advisory; everything else blocks generation.
fn is_error(warning: &Warning) -> bool {
    !matches!(warning, Warning::UnusualNaa { .. })
}

fn endpoint_kind(kind: KindArg) -> EndpointKind {
    match kind {
        KindArg::Auto => EndpointKind::Auto,
        KindArg::Initiators => EndpointKind::Initiators,
        KindArg::Targets => EndpointKind::Targets,
    }
}
