use std::path::PathBuf;

use crate::CliError;
use crate::cli_types::OutputArgs;

use super::{Context, display_name, load_inputs, report, unzip};

/// Merge all inputs into one catalog.
pub(crate) fn run_merge(
    ctx: &Context,
    inputs: &[PathBuf],
    name: &str,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let (headers, records) = unzip(load_inputs(inputs, ctx.quiet)?);
    let reconciler = ctx.reconciler(&records);
    let merged = reconciler.merge(records);
    report(name, &merged);
    ctx.write_output(output, name, &headers[0], merged)
}

/// Deduplicate each input on its own.
pub(crate) fn run_dedup(ctx: &Context, inputs: &[PathBuf], output: &OutputArgs) -> Result<(), CliError> {
    let catalogs = load_inputs(inputs, ctx.quiet)?;
    for (path, catalog) in inputs.iter().zip(catalogs) {
        let reconciler = ctx.reconciler(std::slice::from_ref(&catalog.records));
        let deduped = reconciler.dedup(catalog.records);
        let name = format!("{}.dedup", display_name(path));
        report(&name, &deduped);
        ctx.write_output(output, &name, &catalog.header, deduped)?;
    }
    Ok(())
}
