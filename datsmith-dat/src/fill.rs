//! Gap filling between confirmed duplicates.

use datsmith_core::Record;

/// Copy every digest (and the size) `source` knows and `target` does not.
///
/// Populated slots in `target` are never touched. Returns the number of
/// slots filled. Records whose kind carries no digests are left alone.
pub fn fill_missing(target: &mut Record, source: &Record) -> usize {
    let Some(from) = source.digests() else {
        return 0;
    };
    let Some(into) = target.digests_mut() else {
        return 0;
    };

    let mut filled = 0;
    for kind in from.populated() {
        if let Some(bytes) = from.get(kind) {
            if into.insert_if_missing(kind, bytes) {
                filled += 1;
            }
        }
    }
    if let Some(size) = from.size() {
        if into.insert_size_if_missing(size) {
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
#[path = "tests/fill_tests.rs"]
mod tests;
