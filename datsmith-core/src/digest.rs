use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use crate::error::DigestError;

/// Digest algorithms a catalog may disclose for an item.
///
/// Declaration order is also the "weakest to strongest" order used when
/// picking a bucketing key or a split tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    /// CRC-32 (4 bytes)
    Crc32,
    /// MD5 (16 bytes)
    Md5,
    /// SHA-1 (20 bytes)
    Sha1,
    /// SHA-256 (32 bytes)
    Sha256,
    /// SHA-384 (48 bytes)
    Sha384,
    /// SHA-512 (64 bytes)
    Sha512,
    /// SpamSum fuzzy hash (variable-length text)
    SpamSum,
}

impl DigestKind {
    pub const ALL: [DigestKind; 7] = [
        Self::Crc32,
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::SpamSum,
    ];

    /// Human-readable algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => "CRC-32",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::SpamSum => "SpamSum",
        }
    }

    /// Attribute name used by Logiqx/ClrMamePro catalogs (`crc`, `sha1`, ...).
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Crc32 => "crc",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::SpamSum => "spamsum",
        }
    }

    /// Fixed byte length of the digest, or `None` for the fuzzy hash.
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            Self::Crc32 => Some(4),
            Self::Md5 => Some(16),
            Self::Sha1 => Some(20),
            Self::Sha256 => Some(32),
            Self::Sha384 => Some(48),
            Self::Sha512 => Some(64),
            Self::SpamSum => None,
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }

    /// The reserved sentinel for this algorithm: the digest of empty content.
    ///
    /// Used for bucket-key derivation of records lacking this digest and to
    /// detect placeholder "empty file" entries. Never stored implicitly.
    pub fn sentinel(&self) -> &'static [u8] {
        &SENTINELS[self.slot()]
    }

    /// Text form of [`sentinel`](Self::sentinel).
    pub fn sentinel_text(&self) -> &'static str {
        &SENTINEL_TEXT[self.slot()]
    }

    /// Render digest bytes as text: lowercase hex, or the raw text for SpamSum.
    pub fn render(&self, bytes: &[u8]) -> String {
        match self {
            Self::SpamSum => String::from_utf8_lossy(bytes).into_owned(),
            _ => hex::encode(bytes),
        }
    }

    /// Parse digest text into bytes.
    ///
    /// Hex digests are case-insensitive and left-padded with zeros when
    /// shorter than the algorithm's width (some catalogs drop leading zeros
    /// from CRCs). SpamSum text is taken verbatim.
    pub fn parse(&self, text: &str) -> Result<Vec<u8>, DigestError> {
        let trimmed = text.trim();
        let Some(len) = self.byte_len() else {
            return Ok(trimmed.as_bytes().to_vec());
        };

        let width = len * 2;
        if trimmed.len() > width {
            return Err(DigestError::TooLong {
                kind: self.name(),
                expected: width,
                actual: trimmed.len(),
            });
        }
        let padded = format!("{trimmed:0>width$}");
        hex::decode(padded.to_ascii_lowercase()).map_err(|_| DigestError::InvalidHex {
            kind: self.name(),
            text: trimmed.to_string(),
        })
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestKind {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "crc" | "crc32" => Ok(Self::Crc32),
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "spamsum" | "ssdeep" => Ok(Self::SpamSum),
            _ => Err(DigestError::UnknownKind(s.to_string())),
        }
    }
}

static SENTINELS: LazyLock<[Vec<u8>; 7]> = LazyLock::new(|| {
    [
        crc32fast::hash(b"").to_be_bytes().to_vec(),
        md5::compute(b"").0.to_vec(),
        sha1::Sha1::digest(b"").to_vec(),
        sha2::Sha256::digest(b"").to_vec(),
        sha2::Sha384::digest(b"").to_vec(),
        sha2::Sha512::digest(b"").to_vec(),
        b"3::".to_vec(),
    ]
});

static SENTINEL_TEXT: LazyLock<[String; 7]> =
    LazyLock::new(|| DigestKind::ALL.map(|kind| kind.render(kind.sentinel())));

/// The digests and size a catalog disclosed for one content item.
///
/// Every slot is independent: a missing slot means "unknown", never zero.
/// Once a slot holds a value it is never altered; only empty slots may be
/// filled later (see [`insert_if_missing`](Self::insert_if_missing)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DigestSetRepr", into = "DigestSetRepr")]
pub struct DigestSet {
    size: Option<u64>,
    slots: [Option<Vec<u8>>; 7],
}

impl DigestSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_digest(mut self, kind: DigestKind, bytes: impl Into<Vec<u8>>) -> Self {
        self.slots[kind.slot()] = Some(bytes.into());
        self
    }

    /// Set a digest from its text form. Adapter-side convenience.
    pub fn with_hex(self, kind: DigestKind, text: &str) -> Result<Self, DigestError> {
        let bytes = kind.parse(text)?;
        Ok(self.with_digest(kind, bytes))
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn get(&self, kind: DigestKind) -> Option<&[u8]> {
        self.slots[kind.slot()].as_deref()
    }

    /// Text form of a digest, if present.
    pub fn text(&self, kind: DigestKind) -> Option<String> {
        self.get(kind).map(|bytes| kind.render(bytes))
    }

    pub fn has(&self, kind: DigestKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// True if at least one digest slot is populated. Size does not count.
    pub fn has_any_digest(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// True if any populated digest equals its algorithm's sentinel.
    pub fn has_zero_digest(&self) -> bool {
        self.populated()
            .any(|kind| self.get(kind) == Some(kind.sentinel()))
    }

    /// Algorithms with a value in this set, weakest first.
    pub fn populated(&self) -> impl Iterator<Item = DigestKind> + '_ {
        DigestKind::ALL.into_iter().filter(|kind| self.has(*kind))
    }

    pub fn populated_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Algorithms populated in both `self` and `other`.
    pub fn common_kinds<'a>(&'a self, other: &'a DigestSet) -> impl Iterator<Item = DigestKind> + 'a {
        self.populated().filter(|kind| other.has(*kind))
    }

    /// Store `bytes` in `kind`'s slot only if the slot is unknown.
    ///
    /// Returns true if the slot was filled.
    pub fn insert_if_missing(&mut self, kind: DigestKind, bytes: &[u8]) -> bool {
        let slot = &mut self.slots[kind.slot()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(bytes.to_vec());
        true
    }

    /// Store `size` only if the size is unknown. Returns true if it was filled.
    pub fn insert_size_if_missing(&mut self, size: u64) -> bool {
        if self.size.is_some() {
            return false;
        }
        self.size = Some(size);
        true
    }

    /// Overwrite a digest slot unconditionally.
    ///
    /// Only for explicit caller-requested field replacement; duplicate
    /// merging goes through [`insert_if_missing`](Self::insert_if_missing).
    pub fn replace(&mut self, kind: DigestKind, bytes: &[u8]) {
        self.slots[kind.slot()] = Some(bytes.to_vec());
    }

    pub fn replace_size(&mut self, size: Option<u64>) {
        self.size = size;
    }
}

/// Text-keyed serde form of [`DigestSet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DigestSetRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crc32: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha384: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha512: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spamsum: Option<String>,
}

impl From<DigestSet> for DigestSetRepr {
    fn from(set: DigestSet) -> Self {
        Self {
            size: set.size,
            crc32: set.text(DigestKind::Crc32),
            md5: set.text(DigestKind::Md5),
            sha1: set.text(DigestKind::Sha1),
            sha256: set.text(DigestKind::Sha256),
            sha384: set.text(DigestKind::Sha384),
            sha512: set.text(DigestKind::Sha512),
            spamsum: set.text(DigestKind::SpamSum),
        }
    }
}

impl TryFrom<DigestSetRepr> for DigestSet {
    type Error = DigestError;

    fn try_from(repr: DigestSetRepr) -> Result<Self, Self::Error> {
        let mut set = DigestSet {
            size: repr.size,
            ..Default::default()
        };
        let texts = [
            (DigestKind::Crc32, repr.crc32),
            (DigestKind::Md5, repr.md5),
            (DigestKind::Sha1, repr.sha1),
            (DigestKind::Sha256, repr.sha256),
            (DigestKind::Sha384, repr.sha384),
            (DigestKind::Sha512, repr.sha512),
            (DigestKind::SpamSum, repr.spamsum),
        ];
        for (kind, text) in texts {
            if let Some(text) = text {
                set.slots[kind.slot()] = Some(kind.parse(&text)?);
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
#[path = "tests/digest_tests.rs"]
mod tests;
