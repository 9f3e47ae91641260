use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datsmith_core::Record;
use datsmith_dat::CatalogHeader;

use crate::CliError;
use crate::cli_types::{DiffMode, OutputArgs};

use super::{Context, display_name, load_inputs, report, unzip};

pub(crate) fn run_diff(ctx: &Context, mode: DiffMode) -> Result<(), CliError> {
    match mode {
        DiffMode::Dupes { inputs, output } => {
            let (headers, records) = unzip(load_inputs(&inputs.inputs, ctx.quiet)?);
            let dupes = ctx.reconciler(&records).diff_duplicates(records);
            report("dupes", &dupes);
            ctx.write_output(&output, "dupes", &headers[0], dupes)
        }
        DiffMode::NoDupes { inputs, output } => {
            let (headers, records) = unzip(load_inputs(&inputs.inputs, ctx.quiet)?);
            let unique = ctx.reconciler(&records).diff_no_duplicates(records);
            report("nodupes", &unique);
            ctx.write_output(&output, "nodupes", &headers[0], unique)
        }
        DiffMode::Individuals { inputs, output } => {
            let (headers, records) = unzip(load_inputs(&inputs.inputs, ctx.quiet)?);
            let outputs = ctx.reconciler(&records).diff_individuals(records);
            write_each(ctx, &output, &inputs.inputs, &headers, outputs, "unique")
        }
        DiffMode::Cascade { inputs, output } => {
            let (headers, records) = unzip(load_inputs(&inputs.inputs, ctx.quiet)?);
            let outputs = ctx.reconciler(&records).diff_cascade(&records);
            // The first input passes through untouched.
            write_each(ctx, &output, &inputs.inputs[1..], &headers[1..], outputs[1..].to_vec(), "cascade")
        }
        DiffMode::ReverseCascade { inputs, output } => {
            let (headers, records) = unzip(load_inputs(&inputs.inputs, ctx.quiet)?);
            let mut outputs = ctx.reconciler(&records).diff_reverse_cascade(&records);
            let last = outputs.len() - 1;
            outputs.truncate(last);
            write_each(ctx, &output, &inputs.inputs[..last], &headers[..last], outputs, "cascade")
        }
        DiffMode::Against { base, inputs, output } => {
            let mut all = vec![base];
            all.extend(inputs.inputs.iter().cloned());
            let (mut headers, mut records) = unzip(load_inputs(&all, ctx.quiet)?);
            let reconciler = ctx.reconciler(&records);
            let base_records = records.remove(0);
            headers.remove(0);
            let outputs = reconciler.diff_against_base(&base_records, &records);
            write_each(ctx, &output, &inputs.inputs, &headers, outputs, "new")
        }
    }
}

/// Write one output per input, named `<input stem>.<suffix>`.
fn write_each(
    ctx: &Context,
    output: &OutputArgs,
    paths: &[PathBuf],
    headers: &[CatalogHeader],
    outputs: Vec<Vec<Record>>,
    suffix: &str,
) -> Result<(), CliError> {
    for ((path, header), records) in paths.iter().zip(headers).zip(outputs) {
        let name = format!("{}.{suffix}", display_name(path));
        if records.is_empty() {
            log::info!(
                "  {}: {}",
                name.if_supports_color(Stdout, |t| t.bold()),
                "nothing left, not written".if_supports_color(Stdout, |t| t.dimmed()),
            );
            continue;
        }
        report(&name, &records);
        ctx.write_output(output, &name, header, records)?;
    }
    Ok(())
}
