//! File-backed store
//!
//! Vec-based record sequence with whole-file snapshot persistence.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::{PersistFailurePolicy, StoreConfig};
use crate::error::{Result, StoreError};
use crate::record::Record;
use crate::snapshot::{sibling_path, SnapshotReader, SnapshotWriter, CORRUPT_SUFFIX};

use super::{LoadOutcome, RecordStore};

/// A record store persisted to a single snapshot file
///
/// ## Concurrency: Serialized Writers / Multiple Readers
///
/// - **Reads** (`read`, `get_all`, `contains`, ...): shared lock on the
///   sequence, many concurrent readers
/// - **Writes** (`create`, `update`, `delete`, `flush`): exclusive lock held
///   across the snapshot rewrite, so one read-modify-persist cycle runs at
///   a time
///
/// Two stores (or two processes) on the same file are not coordinated.
pub struct FileStore<R: Record> {
    /// Store configuration (backing path is fixed here)
    config: StoreConfig,

    /// Records plus dirty flag
    state: RwLock<StoreState<R>>,

    /// What `open` found on disk
    load_outcome: LoadOutcome,
}

struct StoreState<R> {
    /// Records in insertion order, keys unique
    records: Vec<R>,

    /// Set when a tolerated write failure left disk behind memory
    dirty: bool,
}

impl<R: Record> FileStore<R> {
    /// Open a store over `config.path`
    ///
    /// On startup:
    /// 1. Validate the config
    /// 2. Decode the snapshot if the file exists
    /// 3. Start empty if it is missing or corrupt (never an error)
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let (records, load_outcome) = load_or_empty::<R>(&config);

        match &load_outcome {
            LoadOutcome::Loaded { records } => {
                info!(path = %config.path.display(), records, "snapshot loaded")
            }
            LoadOutcome::Missing => {
                info!(path = %config.path.display(), "no snapshot found, starting empty")
            }
            LoadOutcome::Corrupt { reason } => {
                warn!(path = %config.path.display(), %reason, "snapshot unusable, starting empty")
            }
        }

        Ok(Self {
            config,
            state: RwLock::new(StoreState {
                records,
                dirty: false,
            }),
            load_outcome,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StoreConfig::builder().path(path).build())
    }

    /// Insert a copy of `data`
    ///
    /// Fails with `DuplicateKey` if its key is already stored.
    pub fn create(&self, data: &R) -> Result<()> {
        let mut state = self.state.write();

        if position(&state.records, data.key()).is_some() {
            return Err(StoreError::duplicate_key(data.key()));
        }

        state.records.push(data.duplicate());

        self.commit(&mut state, "create", |records| {
            records.pop();
        })
    }

    /// Copy of the record stored under `key`
    pub fn read(&self, key: &R::Key) -> Result<R> {
        let state = self.state.read();

        position(&state.records, key)
            .map(|idx| state.records[idx].duplicate())
            .ok_or_else(|| StoreError::key_not_found(key))
    }

    /// Replace the stored record with the same key as `data`, in place
    pub fn update(&self, data: &R) -> Result<()> {
        let mut state = self.state.write();

        let idx = position(&state.records, data.key())
            .ok_or_else(|| StoreError::key_not_found(data.key()))?;

        let previous = std::mem::replace(&mut state.records[idx], data.duplicate());

        self.commit(&mut state, "update", move |records| {
            records[idx] = previous;
        })
    }

    /// Remove the record stored under `key`
    pub fn delete(&self, key: &R::Key) -> Result<()> {
        let mut state = self.state.write();

        let idx =
            position(&state.records, key).ok_or_else(|| StoreError::key_not_found(key))?;

        let removed = state.records.remove(idx);

        self.commit(&mut state, "delete", move |records| {
            records.insert(idx, removed);
        })
    }

    /// Copies of every record, in insertion order
    pub fn get_all(&self) -> Vec<R> {
        self.state
            .read()
            .records
            .iter()
            .map(Record::duplicate)
            .collect()
    }

    /// Rewrite the snapshot from memory
    ///
    /// Returns the write error regardless of `PersistFailurePolicy`; used to
    /// catch disk up after a tolerated failure.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.state.write();

        let bytes =
            SnapshotWriter::write(&self.config.path, &state.records, self.config.sync_strategy)?;
        state.dirty = false;

        debug!(path = %self.config.path.display(), records = state.records.len(), bytes, "snapshot flushed");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether a record with `key` is stored
    pub fn contains(&self, key: &R::Key) -> bool {
        position(&self.state.read().records, key).is_some()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// True when memory holds changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    /// What `open` found on disk
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Backing snapshot file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Persist the already-mutated sequence, applying the failure policy
    ///
    /// `undo` reverts the mutation; it runs only when the write fails under
    /// `Propagate`.
    fn commit(
        &self,
        state: &mut StoreState<R>,
        op: &'static str,
        undo: impl FnOnce(&mut Vec<R>),
    ) -> Result<()> {
        let path = &self.config.path;

        match SnapshotWriter::write(path, &state.records, self.config.sync_strategy) {
            Ok(bytes) => {
                state.dirty = false;
                debug!(op, path = %path.display(), records = state.records.len(), bytes, "snapshot written");
                Ok(())
            }
            Err(err) => match self.config.persist_failure {
                PersistFailurePolicy::Propagate => {
                    undo(&mut state.records);
                    error!(op, path = %path.display(), error = %err, "snapshot write failed, change rolled back");
                    Err(err)
                }
                PersistFailurePolicy::LogAndContinue => {
                    state.dirty = true;
                    error!(op, path = %path.display(), error = %err, "snapshot write failed, memory ahead of disk");
                    Ok(())
                }
            },
        }
    }
}

impl<R: Record> RecordStore<R> for FileStore<R> {
    fn create(&self, data: &R) -> Result<()> {
        FileStore::create(self, data)
    }

    fn read(&self, key: &R::Key) -> Result<R> {
        FileStore::read(self, key)
    }

    fn update(&self, data: &R) -> Result<()> {
        FileStore::update(self, data)
    }

    fn delete(&self, key: &R::Key) -> Result<()> {
        FileStore::delete(self, key)
    }

    fn get_all(&self) -> Vec<R> {
        FileStore::get_all(self)
    }
}

/// One record per line
impl<R: Record + fmt::Debug> fmt::Display for FileStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.state.read().records {
            writeln!(f, "{:?}", record)?;
        }
        Ok(())
    }
}

/// Index of the record stored under `key` (linear scan)
fn position<R: Record>(records: &[R], key: &R::Key) -> Option<usize> {
    records.iter().position(|record| record.key() == key)
}

/// Load the snapshot at `config.path`, or an empty sequence on any failure
///
/// Only undecodable content is quarantined; an I/O failure leaves the path alone.
fn load_or_empty<R: Record>(config: &StoreConfig) -> (Vec<R>, LoadOutcome) {
    let (reason, decodable) = match SnapshotReader::read::<R>(&config.path) {
        Ok(None) => return (Vec::new(), LoadOutcome::Missing),
        Ok(Some(records)) => match first_duplicate(&records) {
            None => {
                let count = records.len();
                return (records, LoadOutcome::Loaded { records: count });
            }
            Some(key) => (format!("duplicate key {} in snapshot", key), true),
        },
        Err(err @ StoreError::Corrupt(_)) => (err.to_string(), true),
        Err(err) => (err.to_string(), false),
    };

    if config.quarantine_corrupt && decodable {
        quarantine(&config.path);
    }

    (Vec::new(), LoadOutcome::Corrupt { reason })
}

/// Debug form of the first key that appears twice
///
/// Quadratic in the record count, like every other lookup here.
fn first_duplicate<R: Record>(records: &[R]) -> Option<String> {
    records
        .iter()
        .enumerate()
        .find(|(idx, record)| position(&records[..*idx], record.key()).is_some())
        .map(|(_, record)| format!("{:?}", record.key()))
}

/// Move a corrupt snapshot to `{path}.corrupt` so later writes don't clobber it
fn quarantine(path: &Path) {
    let target = sibling_path(path, CORRUPT_SUFFIX);
    match fs::rename(path, &target) {
        Ok(()) => warn!(from = %path.display(), to = %target.display(), "corrupt snapshot quarantined"),
        Err(err) => warn!(path = %path.display(), error = %err, "failed to quarantine corrupt snapshot"),
    }
}
