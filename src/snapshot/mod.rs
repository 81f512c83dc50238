//! Snapshot Module
//!
//! On-disk format of the backing file. Every mutation rewrites the whole file.
//!
//! ## Responsibilities
//! - Encode the full record sequence into one self-describing blob
//! - CRC32 checksum for corruption detection
//! - Atomic replace of the backing file (temp file + rename)
//! - Decode and validate a snapshot on load
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ Header (26 bytes, little-endian)                                │
//! │ ┌──────────┬───────────┬──────────────┬──────────────┬────────┐ │
//! │ │Magic (4) │Version (2)│Record cnt (8)│Payload len(8)│ CRC (4)│ │
//! │ └──────────┴───────────┴──────────────┴──────────────┴────────┘ │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Payload: bincode-encoded sequence of records                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod format;
mod reader;
mod writer;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use format::{decode, encode, SnapshotHeader, HEADER_SIZE, MAGIC, VERSION};
pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;

/// Suffix of the in-flight file renamed over the snapshot
pub const TMP_SUFFIX: &str = ".tmp";

/// Suffix given to a quarantined corrupt snapshot
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// `path` with `suffix` appended to its file name
///
/// "data/users.snap" + ".tmp" → "data/users.snap.tmp"
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
