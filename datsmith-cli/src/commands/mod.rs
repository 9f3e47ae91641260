pub(crate) mod config;
pub(crate) mod diff;
pub(crate) mod merge;
pub(crate) mod replace;
pub(crate) mod split;
pub(crate) mod stats;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datsmith_core::Record;
use datsmith_core::util::format_bytes;
use datsmith_dat::{
    Catalog, CatalogFormat, CatalogHeader, CatalogStats, KeyKind, ReconcileOptions, Reconciler,
    load_catalog, save_catalog, select_key_kind,
};

use crate::CliError;
use crate::cli_types::OutputArgs;
use crate::settings::{KeyChoice, Settings};
use crate::spinner::LoadSpinner;

/// Options resolved from flags and the settings file.
pub(crate) struct Context {
    pub key: KeyChoice,
    pub case_sensitive: bool,
    pub parallel: bool,
    pub output_dir: Option<PathBuf>,
    pub quiet: bool,
}

impl Context {
    pub(crate) fn new(cli: &crate::cli_types::Cli, settings: Settings) -> Self {
        Self {
            key: cli.key.or(settings.key).unwrap_or_default(),
            case_sensitive: cli.case_sensitive || settings.case_sensitive,
            parallel: cli.parallel || settings.parallel,
            output_dir: settings.output_dir,
            quiet: cli.quiet,
        }
    }

    /// Build a reconciler, resolving `auto` against the loaded inputs.
    pub(crate) fn reconciler(&self, inputs: &[Vec<Record>]) -> Reconciler {
        let key = match self.key {
            KeyChoice::Fixed(key) => key,
            KeyChoice::Auto => {
                let key = select_key_kind(inputs);
                log::debug!("auto-selected key: {key}");
                key
            }
        };
        if key == KeyKind::Machine {
            log::info!(
                "{}",
                "No digest shared by all inputs; matching by machine name".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
        Reconciler::new(
            ReconcileOptions::new()
                .key(key)
                .case_sensitive(self.case_sensitive)
                .parallel(self.parallel),
        )
    }

    fn output_dir(&self, output: &OutputArgs) -> PathBuf {
        output
            .out
            .clone()
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Write `records` as `<out>/<name>.<ext>` and report it.
    pub(crate) fn write_output(
        &self,
        output: &OutputArgs,
        name: &str,
        template: &CatalogHeader,
        records: Vec<Record>,
    ) -> Result<(), CliError> {
        if output.format == CatalogFormat::ClrMamePro {
            return Err(CliError::usage("ClrMamePro output is not supported; use xml or json"));
        }
        let path = self
            .output_dir(output)
            .join(format!("{name}.{}", output.format.extension()));
        let header = CatalogHeader {
            name: name.to_string(),
            description: name.to_string(),
            ..template.clone()
        };
        let count = records.len();
        save_catalog(&path, &Catalog::new(header, records), output.format)?;
        log::info!(
            "{} {} ({} items)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            count,
        );
        Ok(())
    }
}

/// Load every catalog in order. Source indices follow argument order.
pub(crate) fn load_inputs(paths: &[PathBuf], quiet: bool) -> Result<Vec<Catalog>, CliError> {
    let spinner = LoadSpinner::new(quiet);
    let mut catalogs = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        spinner.set_message(format!("Reading {}", path.display()));
        let catalog = match load_catalog(path, index) {
            Ok(catalog) => catalog,
            Err(source) => {
                spinner.finish();
                return Err(CliError::Load {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        log::debug!(
            "{}: {} records",
            path.display(),
            catalog.records.len()
        );
        catalogs.push(catalog);
    }
    spinner.finish();

    for (path, catalog) in paths.iter().zip(&catalogs) {
        report(&display_name(path), &catalog.records);
    }
    Ok(catalogs)
}

/// Split loaded catalogs into headers and record lists.
pub(crate) fn unzip(catalogs: Vec<Catalog>) -> (Vec<CatalogHeader>, Vec<Vec<Record>>) {
    catalogs
        .into_iter()
        .map(|c| (c.header, c.records))
        .unzip()
}

/// File stem used to name outputs derived from `path`.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One summary line for a record collection.
pub(crate) fn report(label: &str, records: &[Record]) {
    let stats = CatalogStats::from_records(records);
    log::info!(
        "  {}: {} items in {} machines, {}",
        label.if_supports_color(Stdout, |t| t.bold()),
        stats.records,
        stats.machines,
        format_bytes(stats.total_size),
    );
}
