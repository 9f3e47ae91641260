//! Single-collection partitions. No duplicate detection is involved.

use std::collections::BTreeMap;
use std::fmt;

use datsmith_core::util::{file_extension, split_level};
use datsmith_core::{DigestKind, DumpStatus, ItemKind, Record};

/// Output of [`split_by_extension`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSplit {
    /// Records whose extension is in the first list.
    pub a: Vec<Record>,
    /// Records whose extension is in the second list (and not the first).
    pub b: Vec<Record>,
    /// Everything else, including records without an extension.
    pub rest: Vec<Record>,
}

/// Partition by item-name extension.
///
/// Extensions match case-insensitively, with or without a leading dot.
pub fn split_by_extension(records: Vec<Record>, ext_a: &[String], ext_b: &[String]) -> ExtensionSplit {
    let normalize = |list: &[String]| -> Vec<String> {
        list.iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .collect()
    };
    let ext_a = normalize(ext_a);
    let ext_b = normalize(ext_b);

    let mut split = ExtensionSplit::default();
    for record in records {
        match file_extension(&record.name) {
            Some(ext) if ext_a.contains(&ext) => split.a.push(record),
            Some(ext) if ext_b.contains(&ext) => split.b.push(record),
            _ => split.rest.push(record),
        }
    }
    split
}

/// Best digest a record discloses, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashTier {
    NoDump,
    Sha512,
    Sha384,
    Sha256,
    Sha1,
    Md5,
    Crc,
    None,
}

impl HashTier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoDump => "nodump",
            Self::Sha512 => "sha512",
            Self::Sha384 => "sha384",
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Crc => "crc",
            Self::None => "nohash",
        }
    }

    /// Tier of `record`. `nodump` outranks any digest.
    pub fn of(record: &Record) -> Self {
        if record.status == DumpStatus::NoDump {
            return Self::NoDump;
        }
        let Some(digests) = record.digests() else {
            return Self::None;
        };
        let ranked = [
            (DigestKind::Sha512, Self::Sha512),
            (DigestKind::Sha384, Self::Sha384),
            (DigestKind::Sha256, Self::Sha256),
            (DigestKind::Sha1, Self::Sha1),
            (DigestKind::Md5, Self::Md5),
            (DigestKind::Crc32, Self::Crc),
        ];
        ranked
            .into_iter()
            .find(|(kind, _)| digests.has(*kind))
            .map(|(_, tier)| tier)
            .unwrap_or(Self::None)
    }
}

impl fmt::Display for HashTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Partition by [`HashTier`]. Only non-empty tiers appear.
pub fn split_by_hash(records: Vec<Record>) -> BTreeMap<HashTier, Vec<Record>> {
    let mut tiers: BTreeMap<HashTier, Vec<Record>> = BTreeMap::new();
    for record in records {
        tiers.entry(HashTier::of(&record)).or_default().push(record);
    }
    tiers
}

/// Partition by the directory part of hierarchical machine names.
///
/// Keys are the `/`-joined parent path (`""` for top-level machines). With
/// `short_names`, each record's machine is renamed to its leaf segment.
pub fn split_by_level(records: Vec<Record>, short_names: bool) -> BTreeMap<String, Vec<Record>> {
    let mut levels: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for mut record in records {
        let (level, leaf) = split_level(&record.machine.name);
        if short_names {
            let leaf = leaf.to_string();
            record.machine.name = leaf;
        }
        levels.entry(level).or_default().push(record);
    }
    levels
}

/// Output of [`split_by_kind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSplit {
    pub roms: Vec<Record>,
    pub disks: Vec<Record>,
    pub other: Vec<Record>,
}

/// Partition ROMs from disks; every other kind goes to `other`.
pub fn split_by_kind(records: Vec<Record>) -> KindSplit {
    let mut split = KindSplit::default();
    for record in records {
        match record.kind() {
            ItemKind::Rom => split.roms.push(record),
            ItemKind::Disk => split.disks.push(record),
            _ => split.other.push(record),
        }
    }
    split
}

/// Output of [`split_by_size`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeSplit {
    pub below: Vec<Record>,
    pub at_or_above: Vec<Record>,
}

/// Partition by a size radix: strictly smaller than `radix` goes to
/// `below`, the rest to `at_or_above`. Unknown sizes count as zero.
pub fn split_by_size(records: Vec<Record>, radix: u64) -> SizeSplit {
    let mut split = SizeSplit::default();
    for record in records {
        if record.size().unwrap_or(0) < radix {
            split.below.push(record);
        } else {
            split.at_or_above.push(record);
        }
    }
    split
}

#[cfg(test)]
#[path = "tests/split_tests.rs"]
mod tests;
