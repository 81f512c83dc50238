//! Store Module
//!
//! The key-addressed record store.
//!
//! ## Responsibilities
//! - Enforce key uniqueness
//! - Hand out and take in copies only, never live references
//! - Rewrite the whole snapshot after every mutation
//! - Load leniently: a missing or corrupt file starts an empty store

mod file;

pub use file::FileStore;

use crate::error::Result;
use crate::record::Record;

/// The consumer-facing store operations
///
/// Every record crossing this boundary is a fresh copy made with
/// [`Record::duplicate`].
pub trait RecordStore<R: Record> {
    /// Insert a record whose key is not yet stored
    fn create(&self, data: &R) -> Result<()>;

    /// Copy of the record stored under `key`
    fn read(&self, key: &R::Key) -> Result<R>;

    /// Replace the record with the same key, keeping its position
    fn update(&self, data: &R) -> Result<()>;

    /// Remove the record stored under `key`
    fn delete(&self, key: &R::Key) -> Result<()>;

    /// Copies of all records, in insertion order
    fn get_all(&self) -> Vec<R>;
}

/// What opening the backing file found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid snapshot was decoded
    Loaded { records: usize },

    /// No file existed; the store starts empty
    Missing,

    /// The file could not be read or decoded; the store starts empty
    Corrupt { reason: String },
}

impl LoadOutcome {
    /// Whether the store started from stored data
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}
