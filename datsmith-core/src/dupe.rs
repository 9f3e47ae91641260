use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// How a record relates to the duplicates it was matched against.
///
/// A single classification is exactly one of [`INTERNAL`](Self::INTERNAL)
/// or [`EXTERNAL`](Self::EXTERNAL), combined with exactly one of
/// [`ALL`](Self::ALL) or [`HASH`](Self::HASH). A record matched several
/// times accumulates the OR of every classification it took part in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DupeType(u8);

impl DupeType {
    /// No duplicate found.
    pub const NONE: Self = Self(0);
    /// Counterpart came from the same source.
    pub const INTERNAL: Self = Self(1 << 0);
    /// Counterpart came from a different source, or was itself external.
    pub const EXTERNAL: Self = Self(1 << 1);
    /// Matched on digests only; item or machine name differ.
    pub const HASH: Self = Self(1 << 2);
    /// Matched on digests, item name and machine name.
    pub const ALL: Self = Self(1 << 3);

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_external(self) -> bool {
        self.contains(Self::EXTERNAL)
    }
}

impl BitOr for DupeType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DupeType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DupeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let names = [
            (Self::INTERNAL, "Internal"),
            (Self::EXTERNAL, "External"),
            (Self::HASH, "Hash"),
            (Self::ALL, "All"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&parts.join("|"))
    }
}
