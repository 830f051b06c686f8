use std::fs;

use anyhow::{bail, Context, Result};
use zone_designer::loader::read_text;
use zone_designer::migrate::{detect_kind, migrate, MigrationKind};
use zone_designer::report::render_warnings;

use crate::cli::{KindArg, MigrateArgs};
use crate::path_guard::ensure_output_not_input;

pub fn run_migrate(args: MigrateArgs) -> Result<()> {
    let kind = match args.kind {
        KindArg::Initiators => MigrationKind::Initiators,
        KindArg::Targets => MigrationKind::Targets,
        KindArg::Auto => match detect_kind(&args.input) {
            Some(kind) => kind,
            None => bail!(
                "cannot tell whether {} holds initiators or targets; pass --kind",
                args.input.display()
            ),
        },
    };

    ensure_output_not_input(&args.output, &[&args.input])?;
    let text = read_text(&args.input)?;
    let migration = migrate(&text, kind)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    if !migration.warnings.is_empty() {
        eprintln!("{}", render_warnings(&migration.warnings));
    }
    fs::write(&args.output, &migration.yaml)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "migrated {} {} to {}",
        migration.count,
        match kind {
            MigrationKind::Initiators => "initiators",
            MigrationKind::Targets => "targets",
        },
        args.output.display()
    );
    Ok(())
}
