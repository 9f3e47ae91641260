use std::path::PathBuf;

use datsmith_core::Record;
use datsmith_dat::{
    CatalogHeader, split_by_extension, split_by_hash, split_by_kind, split_by_level, split_by_size,
};

use crate::CliError;
use crate::cli_types::{OutputArgs, SplitMode};

use super::{Context, display_name, load_inputs, report};

pub(crate) fn run_split(ctx: &Context, mode: SplitMode) -> Result<(), CliError> {
    match mode {
        SplitMode::Extension { a, b, inputs, output } => {
            for_each_input(ctx, &inputs.inputs, |stem, header, records| {
                let split = split_by_extension(records, &a, &b);
                let parts = vec![
                    (format!("{stem}.{}", a.join("-")), split.a),
                    (format!("{stem}.{}", b.join("-")), split.b),
                    (format!("{stem}.other"), split.rest),
                ];
                write_parts(ctx, &output, header, parts)
            })
        }
        SplitMode::Hash { inputs, output } => {
            for_each_input(ctx, &inputs.inputs, |stem, header, records| {
                let parts = split_by_hash(records)
                    .into_iter()
                    .map(|(tier, records)| (format!("{stem}.{tier}"), records))
                    .collect();
                write_parts(ctx, &output, header, parts)
            })
        }
        SplitMode::Level { short, inputs, output } => {
            for_each_input(ctx, &inputs.inputs, |stem, header, records| {
                let parts = split_by_level(records, short)
                    .into_iter()
                    .map(|(level, records)| {
                        let level = if level.is_empty() {
                            "root".to_string()
                        } else {
                            level.replace('/', " - ")
                        };
                        (format!("{stem}.{level}"), records)
                    })
                    .collect();
                write_parts(ctx, &output, header, parts)
            })
        }
        SplitMode::Type { inputs, output } => {
            for_each_input(ctx, &inputs.inputs, |stem, header, records| {
                let split = split_by_kind(records);
                let parts = vec![
                    (format!("{stem}.roms"), split.roms),
                    (format!("{stem}.disks"), split.disks),
                    (format!("{stem}.other"), split.other),
                ];
                write_parts(ctx, &output, header, parts)
            })
        }
        SplitMode::Size { radix, inputs, output } => {
            for_each_input(ctx, &inputs.inputs, |stem, header, records| {
                let split = split_by_size(records, radix);
                let parts = vec![
                    (format!("{stem}.below-{radix}"), split.below),
                    (format!("{stem}.{radix}-and-above"), split.at_or_above),
                ];
                write_parts(ctx, &output, header, parts)
            })
        }
    }
}

/// Splits never compare records, so every input is handled on its own.
fn for_each_input<F>(ctx: &Context, inputs: &[PathBuf], mut split: F) -> Result<(), CliError>
where
    F: FnMut(&str, &CatalogHeader, Vec<Record>) -> Result<(), CliError>,
{
    let catalogs = load_inputs(inputs, ctx.quiet)?;
    for (path, catalog) in inputs.iter().zip(catalogs) {
        split(&display_name(path), &catalog.header, catalog.records)?;
    }
    Ok(())
}

/// Write the non-empty parts.
fn write_parts(
    ctx: &Context,
    output: &OutputArgs,
    header: &CatalogHeader,
    parts: Vec<(String, Vec<Record>)>,
) -> Result<(), CliError> {
    for (name, records) in parts {
        if records.is_empty() {
            log::debug!("{name}: empty, skipped");
            continue;
        }
        report(&name, &records);
        ctx.write_output(output, &name, header, records)?;
    }
    Ok(())
}
