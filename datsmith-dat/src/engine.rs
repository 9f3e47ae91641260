//! Reconciliation entry point: options plus the operation set.
//!
//! Every operation is a pure transformation from ordered input collections
//! to new output collections. Input order is significant: it defines
//! which record survives a merge, which catalog "owns" an item in a
//! cascade, and which base wins a replace.

use datsmith_core::{DigestKind, Record};

use crate::bucket::KeyKind;

/// Options that control how records are bucketed and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Bucketing key. Pick the most discriminating digest every input
    /// discloses (see [`select_key_kind`]).
    pub key: KeyKind,

    /// Compare machine names case-sensitively when bucketing by machine.
    pub case_sensitive: bool,

    /// Process merge buckets on the rayon thread pool. Output is identical
    /// to the sequential run.
    pub parallel: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            key: KeyKind::Digest(DigestKind::Crc32),
            case_sensitive: false,
            parallel: false,
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: KeyKind) -> Self {
        self.key = key;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Runs set operations over record collections.
///
/// Merge-style operations live in `merge`, ordered diffs in `cascade`,
/// field replacement in `replace`.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    pub options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }
}

/// Strongest digest, preferred first, considered by [`select_key_kind`].
const KEY_PREFERENCE: [DigestKind; 6] = [
    DigestKind::Sha512,
    DigestKind::Sha384,
    DigestKind::Sha256,
    DigestKind::Sha1,
    DigestKind::Md5,
    DigestKind::Crc32,
];

/// Choose the most discriminating digest disclosed by every record that
/// has any digest at all, across all inputs.
///
/// Falls back to [`KeyKind::Machine`] when no single algorithm is shared
/// (or no record carries a digest).
pub fn select_key_kind(inputs: &[Vec<Record>]) -> KeyKind {
    let mut hashed = inputs
        .iter()
        .flatten()
        .filter_map(Record::digests)
        .filter(|d| d.has_any_digest())
        .peekable();
    if hashed.peek().is_none() {
        return KeyKind::Machine;
    }

    let mut candidates: Vec<DigestKind> = KEY_PREFERENCE.to_vec();
    for digests in hashed {
        candidates.retain(|kind| digests.has(*kind));
        if candidates.is_empty() {
            return KeyKind::Machine;
        }
    }
    KeyKind::Digest(candidates[0])
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
