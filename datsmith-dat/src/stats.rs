//! Record counts used to report on inputs and outputs of an operation.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use serde::Serialize;

use datsmith_core::{DigestKind, DumpStatus, DupeType, ItemKind, Record};

use crate::error::DatError;

/// Summary of one record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub machines: usize,
    pub by_kind: BTreeMap<ItemKind, usize>,
    /// Records disclosing each digest.
    pub by_digest: BTreeMap<DigestKind, usize>,
    pub good: usize,
    pub bad_dump: usize,
    pub no_dump: usize,
    pub verified: usize,
    /// Sum of known sizes, saturating at `u64::MAX`.
    pub total_size: u64,
    pub internal_dupes: usize,
    pub external_dupes: usize,
}

impl CatalogStats {
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self {
            records: records.len(),
            ..Default::default()
        };
        let mut machines: HashSet<&str> = HashSet::new();

        for record in records {
            machines.insert(record.machine.name.as_str());
            *stats.by_kind.entry(record.kind()).or_default() += 1;

            if let Some(digests) = record.digests() {
                for kind in digests.populated() {
                    *stats.by_digest.entry(kind).or_default() += 1;
                }
                stats.total_size = stats.total_size.saturating_add(digests.size().unwrap_or(0));
            }

            match record.status {
                DumpStatus::Good => stats.good += 1,
                DumpStatus::BadDump => stats.bad_dump += 1,
                DumpStatus::NoDump => stats.no_dump += 1,
                DumpStatus::Verified => stats.verified += 1,
                DumpStatus::None => {}
            }

            if record.dupe.contains(DupeType::EXTERNAL) {
                stats.external_dupes += 1;
            } else if record.dupe.contains(DupeType::INTERNAL) {
                stats.internal_dupes += 1;
            }
        }

        stats.machines = machines.len();
        stats
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn digest_count(&self, kind: DigestKind) -> usize {
        self.by_digest.get(&kind).copied().unwrap_or(0)
    }
}

/// One CSV row per labelled collection.
#[derive(Serialize)]
struct StatsRow<'a> {
    catalog: &'a str,
    records: usize,
    machines: usize,
    roms: usize,
    disks: usize,
    media: usize,
    crc: usize,
    md5: usize,
    sha1: usize,
    sha256: usize,
    sha384: usize,
    sha512: usize,
    spamsum: usize,
    good: usize,
    baddump: usize,
    nodump: usize,
    verified: usize,
    total_size: u64,
    internal_dupes: usize,
    external_dupes: usize,
}

/// Write labelled stats as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, rows: &[(String, CatalogStats)]) -> Result<(), DatError> {
    let mut csv = csv::Writer::from_writer(writer);
    for (label, s) in rows {
        csv.serialize(StatsRow {
            catalog: label,
            records: s.records,
            machines: s.machines,
            roms: s.count(ItemKind::Rom),
            disks: s.count(ItemKind::Disk),
            media: s.count(ItemKind::Media),
            crc: s.digest_count(DigestKind::Crc32),
            md5: s.digest_count(DigestKind::Md5),
            sha1: s.digest_count(DigestKind::Sha1),
            sha256: s.digest_count(DigestKind::Sha256),
            sha384: s.digest_count(DigestKind::Sha384),
            sha512: s.digest_count(DigestKind::Sha512),
            spamsum: s.digest_count(DigestKind::SpamSum),
            good: s.good,
            baddump: s.bad_dump,
            nodump: s.no_dump,
            verified: s.verified,
            total_size: s.total_size,
            internal_dupes: s.internal_dupes,
            external_dupes: s.external_dupes,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
