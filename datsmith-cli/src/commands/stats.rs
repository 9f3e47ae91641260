use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datsmith_core::util::format_bytes;
use datsmith_core::{DigestKind, ItemKind};
use datsmith_dat::CatalogStats;
use datsmith_dat::stats::write_csv;

use crate::CliError;

use super::{display_name, load_inputs};

pub(crate) fn run_stats(inputs: &[PathBuf], csv: bool, quiet: bool) -> Result<(), CliError> {
    let catalogs = load_inputs(inputs, quiet)?;
    let rows: Vec<(String, CatalogStats)> = inputs
        .iter()
        .zip(&catalogs)
        .map(|(path, catalog)| (display_name(path), CatalogStats::from_records(&catalog.records)))
        .collect();

    if csv {
        write_csv(std::io::stdout().lock(), &rows)?;
        return Ok(());
    }

    for ((label, stats), catalog) in rows.iter().zip(&catalogs) {
        crate::log_blank();
        log::info!(
            "{} {}",
            label.if_supports_color(Stdout, |t| t.bold()),
            format!("[{}]", catalog.header.name).if_supports_color(Stdout, |t| t.cyan()),
        );
        log::info!("  Items:          {:>8}", stats.records);
        log::info!("  Machines:       {:>8}", stats.machines);
        log::info!("  ROMs:           {:>8}", stats.count(ItemKind::Rom));
        log::info!("  Disks:          {:>8}", stats.count(ItemKind::Disk));
        log::info!("  Media:          {:>8}", stats.count(ItemKind::Media));
        log::info!("  Total size:     {:>8}", format_bytes(stats.total_size));
        log::info!(
            "  Status:         {} good, {} verified, {} baddump, {} nodump",
            stats.good,
            stats.verified,
            stats.bad_dump,
            stats.no_dump,
        );
        let coverage: Vec<String> = DigestKind::ALL
            .iter()
            .filter(|kind| stats.digest_count(**kind) > 0)
            .map(|kind| format!("{} {}", kind.name(), stats.digest_count(*kind)))
            .collect();
        if coverage.is_empty() {
            log::info!(
                "  Digests:        {}",
                "none".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!("  Digests:        {}", coverage.join(", "));
        }
    }
    Ok(())
}
