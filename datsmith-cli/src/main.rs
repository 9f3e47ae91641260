//! datsmith CLI
//!
//! Command-line interface for reconciling ROM catalog (DAT) files.

mod cli_types;
mod commands;
mod error;
mod settings;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
pub(crate) use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        };
    }

    let ctx = Context::new(&cli, Settings::load()?);
    match cli.command {
        Commands::Merge { inputs, name, output } => {
            commands::merge::run_merge(&ctx, &inputs.inputs, &name, &output)
        }
        Commands::Dedup { inputs, output } => commands::merge::run_dedup(&ctx, &inputs.inputs, &output),
        Commands::Diff { mode } => commands::diff::run_diff(&ctx, mode),
        Commands::Replace {
            reverse,
            base,
            fields,
            inputs,
            output,
        } => commands::replace::run_replace(&ctx, reverse, &base, &fields, &inputs.inputs, &output),
        Commands::Split { mode } => commands::split::run_split(&ctx, mode),
        Commands::Stats { inputs, csv } => commands::stats::run_stats(&inputs.inputs, csv, ctx.quiet),
        Commands::Config { .. } => Ok(()),
    }
}

/// `--quiet` shows warnings and errors only; `--verbose` adds debug output
/// with timestamps. `RUST_LOG` still overrides per module.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    builder.init();
}

/// Blank line in the info stream.
pub(crate) fn log_blank() {
    log::info!("");
}
