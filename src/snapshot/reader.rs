//! Snapshot Reader
//!
//! Loads and validates a snapshot file.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::{decode, SnapshotHeader, HEADER_SIZE};

/// Reads full snapshots
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read every record stored at `path`
    ///
    /// Returns:
    /// - `Ok(Some(records))` — valid snapshot
    /// - `Ok(None)` — no file at `path`
    /// - `Err(_)` — unreadable or corrupt file
    pub fn read<R: DeserializeOwned>(path: &Path) -> Result<Option<Vec<R>>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        decode(&bytes).map(Some)
    }

    /// Read only the header, without decoding records
    pub fn read_header(path: &Path) -> Result<Option<SnapshotHeader>> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut buf = Vec::with_capacity(HEADER_SIZE);
        file.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut buf)?;

        SnapshotHeader::parse(&buf).map(Some)
    }
}
