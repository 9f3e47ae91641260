//! Content identity between two records under partial digest coverage.

use datsmith_core::{DumpStatus, DupeType, ItemKind, Record};

/// Whether `a` and `b` describe the same content.
///
/// Only digests both records disclose are compared: a digest present on
/// one side and missing on the other is no evidence either way, and no
/// overlap at all is never treated as a match. The one exception is two
/// same-named `nodump` entries with no digests, which describe the same
/// absent content.
pub fn is_duplicate(a: &Record, b: &Record) -> bool {
    if a.kind() != b.kind() {
        return false;
    }

    if a.status == DumpStatus::NoDump
        && b.status == DumpStatus::NoDump
        && a.name == b.name
        && !a.has_any_digest()
        && !b.has_any_digest()
    {
        return true;
    }

    let (Some(da), Some(db)) = (a.digests(), b.digests()) else {
        return false;
    };

    let mut compared = 0;
    for kind in da.common_kinds(db) {
        if da.get(kind) != db.get(kind) {
            return false;
        }
        compared += 1;
    }
    if compared == 0 {
        return false;
    }

    if a.kind() == ItemKind::Rom {
        match (da.size(), db.size()) {
            (None, None) => {}
            (Some(x), Some(y)) if x == y => {}
            _ => return false,
        }
    }

    true
}

/// Relationship of `incoming` to an already placed duplicate `existing`.
///
/// Externality carries forward: once `existing` has been flagged external,
/// every later match against it is external as well, even from the same
/// source. Call only when [`is_duplicate`] holds.
pub fn classify(existing: &Record, incoming: &Record) -> DupeType {
    let external =
        incoming.source != existing.source || existing.dupe.contains(DupeType::EXTERNAL);
    let full_match = existing.machine.name == incoming.machine.name && existing.name == incoming.name;

    let origin = if external {
        DupeType::EXTERNAL
    } else {
        DupeType::INTERNAL
    };
    let depth = if full_match {
        DupeType::ALL
    } else {
        DupeType::HASH
    };
    origin | depth
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
