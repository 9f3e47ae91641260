//! Field-level replacement from matched records in base collections.

use std::fmt;
use std::str::FromStr;

use datsmith_core::Record;

use crate::bucket::BucketIndex;
use crate::classify::is_duplicate;
use crate::engine::Reconciler;
use crate::error::DatError;

/// A field that base-replace may copy from a matched base record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceField {
    ItemName,
    /// Every digest the base record discloses.
    Digests,
    Size,
    Status,
    MergeTag,
    MachineName,
    MachineDescription,
    MachineCloneOf,
    MachineRomOf,
    MachineSampleOf,
    MachineType,
}

impl ReplaceField {
    pub const ALL: [ReplaceField; 11] = [
        Self::ItemName,
        Self::Digests,
        Self::Size,
        Self::Status,
        Self::MergeTag,
        Self::MachineName,
        Self::MachineDescription,
        Self::MachineCloneOf,
        Self::MachineRomOf,
        Self::MachineSampleOf,
        Self::MachineType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemName => "name",
            Self::Digests => "digests",
            Self::Size => "size",
            Self::Status => "status",
            Self::MergeTag => "merge",
            Self::MachineName => "machine",
            Self::MachineDescription => "description",
            Self::MachineCloneOf => "cloneof",
            Self::MachineRomOf => "romof",
            Self::MachineSampleOf => "sampleof",
            Self::MachineType => "type",
        }
    }
}

impl fmt::Display for ReplaceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReplaceField {
    type Err = DatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| DatError::invalid_dat(format!("Unknown replace field: {s}")))
    }
}

impl Reconciler {
    /// Copy `fields` into each working record from its first duplicate,
    /// searching `bases` in order. Duplicate flags are left untouched.
    pub fn base_replace(
        &self,
        working: Vec<Record>,
        bases: &[Vec<Record>],
        fields: &[ReplaceField],
    ) -> Vec<Record> {
        self.replace_from(working, bases, fields, false)
    }

    /// Like [`base_replace`](Self::base_replace) but the last duplicate
    /// across `bases` wins.
    pub fn reverse_base_replace(
        &self,
        working: Vec<Record>,
        bases: &[Vec<Record>],
        fields: &[ReplaceField],
    ) -> Vec<Record> {
        self.replace_from(working, bases, fields, true)
    }

    fn replace_from(
        &self,
        mut working: Vec<Record>,
        bases: &[Vec<Record>],
        fields: &[ReplaceField],
        last_wins: bool,
    ) -> Vec<Record> {
        let indexes: Vec<BucketIndex<'_>> = bases
            .iter()
            .map(|base| BucketIndex::from_records(base, self.options.key, self.options.case_sensitive))
            .collect();

        let mut replaced = 0usize;
        for record in &mut working {
            let found = find_base(&indexes, record, last_wins);
            if let Some(base) = found {
                apply_fields(record, base, fields);
                replaced += 1;
            }
        }

        log::debug!(
            "replace: {replaced} of {} records matched a base record",
            working.len()
        );
        working
    }
}

/// First (or last) base record duplicating `probe`, bases in order.
fn find_base<'a>(indexes: &[BucketIndex<'a>], probe: &Record, last_wins: bool) -> Option<&'a Record> {
    if last_wins {
        indexes.iter().rev().find_map(|index| {
            index
                .candidates(probe)
                .iter()
                .rev()
                .find(|base| is_duplicate(base, probe))
                .copied()
        })
    } else {
        indexes.iter().find_map(|index| {
            index
                .candidates(probe)
                .iter()
                .find(|base| is_duplicate(base, probe))
                .copied()
        })
    }
}

/// Copy the listed fields from `base` into `target`.
///
/// Optional base values only overwrite when the base actually has one.
fn apply_fields(target: &mut Record, base: &Record, fields: &[ReplaceField]) {
    for field in fields {
        match field {
            ReplaceField::ItemName => target.name = base.name.clone(),
            ReplaceField::Digests => {
                if let (Some(into), Some(from)) = (target.digests_mut(), base.digests()) {
                    for kind in from.populated() {
                        if let Some(bytes) = from.get(kind) {
                            into.replace(kind, bytes);
                        }
                    }
                }
            }
            ReplaceField::Size => {
                if let (Some(size), Some(into)) = (base.size(), target.digests_mut()) {
                    into.replace_size(Some(size));
                }
            }
            ReplaceField::Status => target.status = base.status,
            ReplaceField::MergeTag => {
                if base.merge_tag.is_some() {
                    target.merge_tag = base.merge_tag.clone();
                }
            }
            ReplaceField::MachineName => {
                if !base.machine.name.is_empty() {
                    target.machine.name = base.machine.name.clone();
                }
            }
            ReplaceField::MachineDescription => {
                if base.machine.description.is_some() {
                    target.machine.description = base.machine.description.clone();
                }
            }
            ReplaceField::MachineCloneOf => {
                if base.machine.clone_of.is_some() {
                    target.machine.clone_of = base.machine.clone_of.clone();
                }
            }
            ReplaceField::MachineRomOf => {
                if base.machine.rom_of.is_some() {
                    target.machine.rom_of = base.machine.rom_of.clone();
                }
            }
            ReplaceField::MachineSampleOf => {
                if base.machine.sample_of.is_some() {
                    target.machine.sample_of = base.machine.sample_of.clone();
                }
            }
            ReplaceField::MachineType => target.machine.machine_type = base.machine.machine_type,
        }
    }
}

#[cfg(test)]
#[path = "tests/replace_tests.rs"]
mod tests;
