//! Identity reconciliation over DAT catalogs: duplicate detection under
//! partial digest coverage, and the merge/diff/replace/split operations
//! built on it. Catalog adapters for Logiqx XML, ClrMamePro and JSON live
//! alongside.

pub mod bucket;
pub mod cascade;
pub mod catalog;
pub mod classify;
pub mod clrmamepro;
pub mod engine;
pub mod error;
pub mod fill;
pub mod logiqx;
pub mod merge;
pub mod replace;
pub mod split;
pub mod stats;

pub use bucket::{Bucket, BucketIndex, KeyKind, bucket_key, group};
pub use catalog::{
    Catalog, CatalogFormat, CatalogHeader, load_catalog, parse_catalog, save_catalog, write_catalog,
};
pub use classify::{classify, is_duplicate};
pub use engine::{ReconcileOptions, Reconciler, select_key_kind};
pub use error::DatError;
pub use fill::fill_missing;
pub use replace::ReplaceField;
pub use split::{
    ExtensionSplit, HashTier, KindSplit, SizeSplit, split_by_extension, split_by_hash,
    split_by_kind, split_by_level, split_by_size,
};
pub use stats::CatalogStats;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
