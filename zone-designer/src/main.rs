use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod diff_cmd;
mod generate_cmd;
mod import_cmd;
mod migrate_cmd;
mod path_guard;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate_cmd::run_generate(args),
        Command::Diff(args) => diff_cmd::run_diff(args),
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Import(args) => import_cmd::run_import(args),
        Command::Migrate(args) => migrate_cmd::run_migrate(args),
    }
}

/// Logs go to stderr so generated configuration on stdout stays clean.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
