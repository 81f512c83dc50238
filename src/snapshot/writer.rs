//! Snapshot Writer
//!
//! Replaces the backing file with a fresh snapshot.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::config::SyncStrategy;
use crate::error::Result;

use super::{encode, sibling_path, TMP_SUFFIX};

/// Writes full snapshots
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Write `records` as the new content of `path`
    ///
    /// Steps:
    /// 1. Encode the whole sequence
    /// 2. Write it to `{path}.tmp` (fsync if `EveryWrite`)
    /// 3. Rename the temp file over `path`
    /// 4. fsync the parent directory if `EveryWrite` (unix), so the rename
    ///    itself survives power loss. The new snapshot is already in place at
    ///    this point, so a failure here is logged, not returned.
    ///
    /// A reader sees either the previous snapshot or the new one, never a
    /// partial write. Returns the number of bytes written.
    pub fn write<R: Serialize>(path: &Path, records: &[R], sync: SyncStrategy) -> Result<u64> {
        let bytes = encode(records)?;

        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = sibling_path(path, TMP_SUFFIX);
        let written = Self::write_tmp(&tmp_path, &bytes, sync)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(Into::into));

        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        if sync == SyncStrategy::EveryWrite {
            let dir = parent.unwrap_or_else(|| Path::new("."));
            if let Err(err) = Self::sync_dir(dir) {
                warn!(dir = %dir.display(), error = %err, "directory fsync failed after rename");
            }
        }

        Ok(bytes.len() as u64)
    }

    #[cfg(unix)]
    fn sync_dir(dir: &Path) -> std::io::Result<()> {
        fs::File::open(dir)?.sync_all()
    }

    /// Directory handles cannot be synced here; the rename is left to the OS
    #[cfg(not(unix))]
    fn sync_dir(_dir: &Path) -> std::io::Result<()> {
        Ok(())
    }

    fn write_tmp(tmp_path: &Path, bytes: &[u8], sync: SyncStrategy) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(tmp_path)?;

        file.write_all(bytes)?;
        if sync == SyncStrategy::EveryWrite {
            file.sync_all()?;
        }

        Ok(())
    }
}
