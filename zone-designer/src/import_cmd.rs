use anyhow::Result;
use zone_core::import_zones;
use zone_designer::loader::read_text;
use zone_designer::report::render_warnings;

use crate::cli::{ImportArgs, OutputFormat};

pub fn run_import(args: ImportArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let imported = import_zones(&text);
    if !imported.warnings.is_empty() {
        eprintln!("{}", render_warnings(&imported.warnings));
    }
    let grammar = imported
        .grammar
        .map_or_else(|| "unrecognized".to_string(), |g| g.to_string());
    tracing::info!(%grammar, zones = imported.zones.len(), "imported zones");

    match args.format {
        OutputFormat::Text => {
            println!("grammar: {grammar}");
            println!("zones: {}", imported.zones.len());
            for zone in &imported.zones {
                println!("{} [{}]", zone.name(), zone.member_aliases().join(", "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&imported)?),
    }
    Ok(())
}
