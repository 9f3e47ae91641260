//! Merge-with-dedup and the diffs built on its bookkeeping.

use std::collections::HashMap;

use rayon::prelude::*;

use datsmith_core::Record;

use crate::bucket;
use crate::classify::{classify, is_duplicate};
use crate::engine::Reconciler;
use crate::fill::fill_missing;

/// A record tagged with its position in the concatenated input.
type Placed = (usize, Record);

impl Reconciler {
    /// Concatenate `inputs` in order and collapse duplicates.
    ///
    /// Within each bucket the first occurrence of a content item is kept;
    /// later duplicates are dropped after their classification has been
    /// OR-ed into the kept record and their extra digests copied into it.
    /// Output keeps input order.
    pub fn merge(&self, inputs: Vec<Vec<Record>>) -> Vec<Record> {
        let records: Vec<Record> = inputs.into_iter().flatten().collect();
        self.dedup(records)
    }

    /// Collapse duplicates within a single collection.
    pub fn dedup(&self, records: Vec<Record>) -> Vec<Record> {
        let total = records.len();
        let buckets = bucket::group(&records, self.options.key, self.options.case_sensitive);
        let bucket_count = buckets.len();

        let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
        let work: Vec<Vec<Placed>> = buckets
            .iter()
            .map(|b| {
                b.members
                    .iter()
                    .filter_map(|&i| slots[i].take().map(|r| (i, r)))
                    .collect()
            })
            .collect();

        let kept: Vec<Vec<Placed>> = if self.options.parallel {
            work.into_par_iter().map(dedup_bucket).collect()
        } else {
            work.into_iter().map(dedup_bucket).collect()
        };

        let mut placed: Vec<Placed> = kept.into_iter().flatten().collect();
        placed.sort_unstable_by_key(|(pos, _)| *pos);

        log::debug!(
            "dedup by {}: {} records in {} buckets -> {} kept",
            self.options.key,
            total,
            bucket_count,
            placed.len()
        );

        placed.into_iter().map(|(_, r)| r).collect()
    }

    /// Merged records that were matched against another source.
    pub fn diff_duplicates(&self, inputs: Vec<Vec<Record>>) -> Vec<Record> {
        self.merge(inputs)
            .into_iter()
            .filter(|r| r.dupe.is_external())
            .collect()
    }

    /// Merged records never matched against another source.
    pub fn diff_no_duplicates(&self, inputs: Vec<Vec<Record>>) -> Vec<Record> {
        self.merge(inputs)
            .into_iter()
            .filter(|r| !r.dupe.is_external())
            .collect()
    }

    /// Like [`diff_no_duplicates`](Self::diff_no_duplicates), split back into
    /// one collection per input (same order as `inputs`).
    pub fn diff_individuals(&self, inputs: Vec<Vec<Record>>) -> Vec<Vec<Record>> {
        let mut slot_of: HashMap<usize, usize> = HashMap::new();
        for (slot, input) in inputs.iter().enumerate() {
            for record in input {
                slot_of.entry(record.source.index).or_insert(slot);
            }
        }

        let mut outputs: Vec<Vec<Record>> = vec![Vec::new(); inputs.len()];
        for record in self.diff_no_duplicates(inputs) {
            if let Some(&slot) = slot_of.get(&record.source.index) {
                outputs[slot].push(record);
            }
        }
        outputs
    }
}

/// Keep-first dedup of one bucket. Touches only records it owns.
///
/// Filling can give two kept records a digest in common, so the bucket is
/// settled until no kept pair matches; a second run is then a no-op.
fn dedup_bucket(members: Vec<Placed>) -> Vec<Placed> {
    let mut kept: Vec<Placed> = Vec::with_capacity(members.len());
    for incoming in members {
        absorb(&mut kept, incoming);
    }
    while let Some(j) = (1..kept.len()).find(|&j| {
        kept[..j]
            .iter()
            .any(|(_, existing)| is_duplicate(existing, &kept[j].1))
    }) {
        let late = kept.remove(j);
        absorb(&mut kept, late);
    }
    kept
}

/// Fold `incoming` into its first duplicate in `kept`, or keep it.
fn absorb(kept: &mut Vec<Placed>, (pos, mut incoming): Placed) {
    match kept
        .iter_mut()
        .find(|(_, existing)| is_duplicate(existing, &incoming))
    {
        Some((_, existing)) => {
            let dupe = classify(existing, &incoming);
            existing.dupe |= dupe;
            incoming.dupe |= dupe;
            fill_missing(existing, &incoming);
        }
        None => kept.push((pos, incoming)),
    }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
