//! Candidate grouping: records are only ever compared within a bucket.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use datsmith_core::{DigestError, DigestKind, Record};

/// What drives bucketing for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyKind {
    /// One digest algorithm; records lacking it share the sentinel bucket.
    Digest(DigestKind),
    /// Machine identity.
    Machine,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digest(kind) => f.write_str(kind.attribute()),
            Self::Machine => f.write_str("machine"),
        }
    }
}

impl From<KeyKind> for String {
    fn from(key: KeyKind) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for KeyKind {
    type Error = DigestError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for KeyKind {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "machine" | "game" => Ok(Self::Machine),
            other => other.parse().map(Self::Digest),
        }
    }
}

/// Bucket key of `record` for `key`.
///
/// For a digest key the key is the digest's text, or the algorithm's
/// sentinel when the record lacks it, so every record without the digest
/// still lands in one shared bucket together with explicit empty-content
/// records. Kinds that carry no digests fall back to the machine key.
pub fn bucket_key(record: &Record, key: KeyKind, case_sensitive: bool, include_source: bool) -> String {
    match (key, record.digests()) {
        (KeyKind::Digest(kind), Some(digests)) => digests
            .text(kind)
            .unwrap_or_else(|| kind.sentinel_text().to_string()),
        _ => machine_key(record, case_sensitive, include_source),
    }
}

fn machine_key(record: &Record, case_sensitive: bool, include_source: bool) -> String {
    let name = record.machine.display_name();
    let name = if case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    };
    if include_source {
        format!("{:010}-{name}", record.source.index)
    } else {
        name
    }
}

/// One bucket: a key and the positions of its members in the input slice,
/// in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: String,
    pub members: Vec<usize>,
}

/// Group `records` by key in a single pass.
///
/// Buckets come back in order of first appearance and members keep input
/// order; cascade and first-match semantics depend on both.
pub fn group(records: &[Record], key: KeyKind, case_sensitive: bool) -> Vec<Bucket> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let k = bucket_key(record, key, case_sensitive, false);
        match positions.get(&k) {
            Some(&b) => buckets[b].members.push(i),
            None => {
                positions.insert(k.clone(), buckets.len());
                buckets.push(Bucket {
                    key: k,
                    members: vec![i],
                });
            }
        }
    }

    buckets
}

/// A growable lookup of already placed records by bucket key.
///
/// Used by the cascade and base-replace operations, where one side is a
/// fixed or accumulating reference set and the other side is probed
/// against it.
pub struct BucketIndex<'a> {
    key: KeyKind,
    case_sensitive: bool,
    by_key: HashMap<String, Vec<&'a Record>>,
}

impl<'a> BucketIndex<'a> {
    pub fn new(key: KeyKind, case_sensitive: bool) -> Self {
        Self {
            key,
            case_sensitive,
            by_key: HashMap::new(),
        }
    }

    /// Build an index over a whole collection.
    pub fn from_records(records: &'a [Record], key: KeyKind, case_sensitive: bool) -> Self {
        let mut index = Self::new(key, case_sensitive);
        index.extend(records);
        index
    }

    pub fn insert(&mut self, record: &'a Record) {
        let k = bucket_key(record, self.key, self.case_sensitive, false);
        self.by_key.entry(k).or_default().push(record);
    }

    pub fn extend(&mut self, records: &'a [Record]) {
        for record in records {
            self.insert(record);
        }
    }

    /// Records sharing `probe`'s bucket, in insertion order.
    pub fn candidates(&self, probe: &Record) -> &[&'a Record] {
        let k = bucket_key(probe, self.key, self.case_sensitive, false);
        self.by_key.get(&k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct buckets.
    pub fn bucket_count(&self) -> usize {
        self.by_key.len()
    }
}

#[cfg(test)]
#[path = "tests/bucket_tests.rs"]
mod tests;
