//! Common utilities and types shared across opcheck crates.

pub mod error;
pub mod fs;

pub use error::{Error, Result};
pub use fs::{EntryKind, Filesystem, MemFs, OsFs};
