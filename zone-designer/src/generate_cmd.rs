use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zone_core::selector::filter_fabric;
use zone_core::{
    generate, generate_from_pairs, GenerateOptions, Generation, InitiatorEndpoint, TargetEndpoint,
    Warning, ZoneMode,
};
use zone_designer::loader::{load_initiators, load_pairs, load_targets};
use zone_designer::report::{render_config, render_warnings};
use zone_designer::settings::discover;
use zone_designer::summary::{count_groups, render_preview, GenerationSummary};

use crate::cli::GenerateArgs;
use crate::path_guard::ensure_output_not_input;

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    if args.plain || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let settings = discover(args.generation.config.as_deref())?;
    let mut options = args.generation.resolve(&settings);
    options.rollback |= args.rollback;

    let initiators = load_initiators(&args.generation.initiators)?;
    let targets = load_targets(&args.generation.targets, options.mode)?;
    print_warnings(&initiators.warnings);
    print_warnings(&targets.warnings);

    let generation = match &args.pairs {
        Some(path) => {
            let pairs = load_pairs(path)?;
            generate_from_pairs(&initiators.entries, &targets.entries, &pairs, &options)
        }
        None => generate(&initiators.entries, &targets.entries, &options),
    }
    .context("failed to generate zoning")?;
    print_warnings(&generation.warnings);

    let summary = summarize(&generation, &initiators.entries, &targets.entries, &options);
    if args.dry {
        println!("{}", summary.render());
        println!();
        println!("{}", render_preview(generation.configuration.zones()));
        return Ok(());
    }

    let config = format!("{}\n{}\n", generation.config, summary.render());
    match &args.output {
        Some(out_path) => {
            guard(out_path, &args)?;
            fs::write(out_path, &config)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            tracing::info!(path = %out_path.display(), "wrote configuration");
        }
        None => println!("{}", render_config(&config, options.vendor)),
    }

    if let Some(csv_path) = &args.csv {
        guard(csv_path, &args)?;
        fs::write(csv_path, &generation.csv)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
    }

    if let Some(rollback) = &generation.rollback {
        let dir = args
            .rollback_dir
            .clone()
            .or(settings.rollback_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        write_file(&dir.join("rollback.cfg"), &rollback.config)?;
        write_file(&dir.join("rollback.csv"), &rollback.csv)?;
        tracing::info!(dir = %dir.display(), "wrote rollback files");
    }

    Ok(())
}

fn summarize(
    generation: &Generation,
    initiators: &[InitiatorEndpoint],
    targets: &[TargetEndpoint],
    options: &GenerateOptions,
) -> GenerationSummary {
    let fabric = options.fabric_filter.as_deref();
    let targets = filter_fabric(targets, fabric);
    let groups =
        (options.mode == ZoneMode::Many).then(|| count_groups(&targets, options.group_merge));
    GenerationSummary {
        vendor: options.vendor,
        mode: options.mode,
        initiators: filter_fabric(initiators, fabric).len(),
        targets: targets.len(),
        groups,
        zones: generation.configuration.zones().len(),
        zoneset: generation.configuration.zoneset_name(),
    }
}

fn guard(output: &Path, args: &GenerateArgs) -> Result<()> {
    let mut inputs = vec![
        args.generation.initiators.as_path(),
        args.generation.targets.as_path(),
    ];
    if let Some(pairs) = &args.pairs {
        inputs.push(pairs.as_path());
    }
    ensure_output_not_input(output, &inputs)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn print_warnings(warnings: &[Warning]) {
    if !warnings.is_empty() {
        eprintln!("{}", render_warnings(warnings));
    }
}
