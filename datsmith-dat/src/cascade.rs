//! Ordered diffs: each input is filtered against what came before it
//! (cascade), after it (reverse cascade), or a fixed base.

use datsmith_core::Record;

use crate::bucket::BucketIndex;
use crate::classify::is_duplicate;
use crate::engine::Reconciler;

impl Reconciler {
    /// Filter every input against the union of all earlier inputs.
    ///
    /// The first input is emitted whole. Each later input keeps only the
    /// records with no duplicate in the accumulated set, and then joins
    /// that set in full, so its filtered-out records still shadow later
    /// inputs.
    pub fn diff_cascade(&self, inputs: &[Vec<Record>]) -> Vec<Vec<Record>> {
        let seen = BucketIndex::new(self.options.key, self.options.case_sensitive);
        let (outputs, seen) = inputs.iter().enumerate().fold(
            (Vec::with_capacity(inputs.len()), seen),
            |(mut outputs, mut seen), (i, input)| {
                let kept: Vec<Record> = if i == 0 {
                    input.clone()
                } else {
                    unseen(input, &seen)
                };
                log::debug!(
                    "cascade input {i}: {} of {} records kept",
                    kept.len(),
                    input.len()
                );
                outputs.push(kept);
                seen.extend(input);
                (outputs, seen)
            },
        );
        log::debug!("cascade finished with {} buckets seen", seen.bucket_count());
        outputs
    }

    /// Cascade in reverse input order: later inputs own shared items.
    ///
    /// Outputs are returned at the positions of their inputs.
    pub fn diff_reverse_cascade(&self, inputs: &[Vec<Record>]) -> Vec<Vec<Record>> {
        let reversed: Vec<Vec<Record>> = inputs.iter().rev().cloned().collect();
        let mut outputs = self.diff_cascade(&reversed);
        outputs.reverse();
        outputs
    }

    /// Filter each input independently against one fixed base.
    pub fn diff_against_base(&self, base: &[Record], inputs: &[Vec<Record>]) -> Vec<Vec<Record>> {
        let index = BucketIndex::from_records(base, self.options.key, self.options.case_sensitive);
        inputs.iter().map(|input| unseen(input, &index)).collect()
    }
}

/// Records of `input` with no duplicate among their bucket candidates.
fn unseen(input: &[Record], seen: &BucketIndex<'_>) -> Vec<Record> {
    input
        .iter()
        .filter(|record| {
            !seen
                .candidates(record)
                .iter()
                .any(|candidate| is_duplicate(candidate, record))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tests/cascade_tests.rs"]
mod tests;
