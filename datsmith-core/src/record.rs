use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::digest::DigestSet;
use crate::dupe::DupeType;
use crate::error::DigestError;
use crate::machine::Machine;

/// Which input catalog a record came from.
///
/// Two sources are the same source iff their indices match; the label is
/// informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    /// Position of the catalog in the caller's input list.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Source {
    pub fn new(index: usize) -> Self {
        Self { index, name: None }
    }

    pub fn named(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: Some(name.into()),
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Source {}

impl Hash for Source {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Dump status a catalog declares for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpStatus {
    #[default]
    None,
    Good,
    BadDump,
    /// Known to exist but never dumped; usually carries no digests.
    NoDump,
    Verified,
}

impl DumpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Good => "good",
            Self::BadDump => "baddump",
            Self::NoDump => "nodump",
            Self::Verified => "verified",
        }
    }
}

impl FromStr for DumpStatus {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "good" => Ok(Self::Good),
            "baddump" => Ok(Self::BadDump),
            "nodump" => Ok(Self::NoDump),
            "verified" => Ok(Self::Verified),
            other => Err(DigestError::unknown_keyword(other)),
        }
    }
}

impl fmt::Display for DumpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload for a ROM image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rom {
    pub digests: DigestSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bios: Option<String>,
}

/// Kind-specific payload for a disk image (CHD).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub digests: DigestSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Kind-specific payload for a media image (AaruFormat).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub digests: DigestSet,
}

/// A selectable BIOS revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiosSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// A regional release of the owning machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// The kind of a record together with its kind-specific fields.
///
/// Only ROMs, disks and media carry digests; the auxiliary kinds describe
/// metadata and never match anything by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Rom(Rom),
    Disk(Disk),
    Media(Media),
    Sample,
    Archive,
    BiosSet(BiosSet),
    Release(Release),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Rom(_) => ItemKind::Rom,
            Self::Disk(_) => ItemKind::Disk,
            Self::Media(_) => ItemKind::Media,
            Self::Sample => ItemKind::Sample,
            Self::Archive => ItemKind::Archive,
            Self::BiosSet(_) => ItemKind::BiosSet,
            Self::Release(_) => ItemKind::Release,
        }
    }
}

/// Fieldless discriminant of [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Rom,
    Disk,
    Media,
    Sample,
    Archive,
    BiosSet,
    Release,
}

impl ItemKind {
    /// Element name used by Logiqx-style catalogs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Rom => "rom",
            Self::Disk => "disk",
            Self::Media => "media",
            Self::Sample => "sample",
            Self::Archive => "archive",
            Self::BiosSet => "biosset",
            Self::Release => "release",
        }
    }

    pub fn carries_digests(&self) -> bool {
        matches!(self, Self::Rom | Self::Disk | Self::Media)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One content item of a catalog, placed in its machine.
///
/// The item kind is fixed at construction. The reconciliation engine only
/// ever changes [`dupe`](Self::dupe) and fills unknown digest slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(flatten)]
    item: Item,
    #[serde(default)]
    pub status: DumpStatus,
    pub machine: Machine,
    pub source: Source,
    #[serde(default, skip_serializing_if = "DupeType::is_empty")]
    pub dupe: DupeType,
    /// Name of the parent-set item this one is merged from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_tag: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, item: Item) -> Self {
        Self {
            name: name.into(),
            item,
            status: DumpStatus::None,
            machine: Machine::default(),
            source: Source::default(),
            dupe: DupeType::NONE,
            merge_tag: None,
        }
    }

    pub fn rom(name: impl Into<String>, digests: DigestSet) -> Self {
        Self::new(
            name,
            Item::Rom(Rom {
                digests,
                ..Default::default()
            }),
        )
    }

    pub fn disk(name: impl Into<String>, digests: DigestSet) -> Self {
        Self::new(
            name,
            Item::Disk(Disk {
                digests,
                ..Default::default()
            }),
        )
    }

    pub fn media(name: impl Into<String>, digests: DigestSet) -> Self {
        Self::new(name, Item::Media(Media { digests }))
    }

    pub fn with_status(mut self, status: DumpStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = machine;
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_merge_tag(mut self, tag: impl Into<String>) -> Self {
        self.merge_tag = Some(tag.into());
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind()
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Digests of this record, or `None` for kinds that carry none.
    pub fn digests(&self) -> Option<&DigestSet> {
        match &self.item {
            Item::Rom(rom) => Some(&rom.digests),
            Item::Disk(disk) => Some(&disk.digests),
            Item::Media(media) => Some(&media.digests),
            _ => None,
        }
    }

    /// Mutable digests. The kind itself can never be swapped through this.
    pub fn digests_mut(&mut self) -> Option<&mut DigestSet> {
        match &mut self.item {
            Item::Rom(rom) => Some(&mut rom.digests),
            Item::Disk(disk) => Some(&mut disk.digests),
            Item::Media(media) => Some(&mut media.digests),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.digests().and_then(DigestSet::size)
    }

    pub fn has_any_digest(&self) -> bool {
        self.digests().is_some_and(DigestSet::has_any_digest)
    }

    pub fn has_zero_digest(&self) -> bool {
        self.digests().is_some_and(DigestSet::has_zero_digest)
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
