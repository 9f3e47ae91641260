use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datsmith_dat::ReplaceField;

use crate::CliError;
use crate::cli_types::OutputArgs;

use super::{Context, display_name, load_inputs, report, unzip};

/// Replace fields of each input from matching items in the base catalogs.
pub(crate) fn run_replace(
    ctx: &Context,
    reverse: bool,
    bases: &[PathBuf],
    fields: &[ReplaceField],
    inputs: &[PathBuf],
    output: &OutputArgs,
) -> Result<(), CliError> {
    let field_list: Vec<String> = fields.iter().map(ToString::to_string).collect();
    log::info!(
        "Replacing {} from {} base catalog(s){}",
        field_list.join(", ").if_supports_color(Stdout, |t| t.cyan()),
        bases.len(),
        if reverse { " (last match wins)" } else { "" },
    );

    let mut all: Vec<PathBuf> = bases.to_vec();
    all.extend(inputs.iter().cloned());
    let (headers, mut records) = unzip(load_inputs(&all, ctx.quiet)?);
    let reconciler = ctx.reconciler(&records);
    let working = records.split_off(bases.len());

    for ((path, header), input) in inputs.iter().zip(&headers[bases.len()..]).zip(working) {
        let replaced = if reverse {
            reconciler.reverse_base_replace(input, &records, fields)
        } else {
            reconciler.base_replace(input, &records, fields)
        };
        let name = format!("{}.replaced", display_name(path));
        report(&name, &replaced);
        ctx.write_output(output, &name, header, replaced)?;
    }
    Ok(())
}
