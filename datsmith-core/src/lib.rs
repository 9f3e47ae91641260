//! Canonical catalog model shared by the reconciliation engine and the
//! catalog adapters: digests, machines, records and duplicate flags.

pub mod digest;
pub mod dupe;
pub mod error;
pub mod machine;
pub mod record;
pub mod util;

pub use digest::{DigestKind, DigestSet};
pub use dupe::DupeType;
pub use error::DigestError;
pub use machine::{DEFAULT_MACHINE_NAME, Machine, MachineType};
pub use record::{BiosSet, Disk, DumpStatus, Item, ItemKind, Media, Record, Release, Rom, Source};
