//! Configuration for SnapStore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Configuration for a single `FileStore` instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing snapshot file. Fixed for the lifetime of the store.
    /// On-disk layout:
    ///   {path}          (current snapshot)
    ///   {path}.tmp      (in-flight rewrite, renamed over {path})
    ///   {path}.corrupt  (quarantined snapshot, if enabled)
    pub path: PathBuf,

    /// Sync strategy: whether to fsync each snapshot before the rename
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Failure Handling
    // -------------------------------------------------------------------------
    /// What a mutation does when the snapshot cannot be written
    pub persist_failure: PersistFailurePolicy,

    /// Move an undecodable snapshot aside instead of overwriting it later
    pub quarantine_corrupt: bool,
}

/// Snapshot sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the snapshot before renaming it into place, then its directory
    /// (safest, slowest)
    EveryWrite,

    /// Leave flushing to the OS page cache
    OsManaged,
}

/// Behavior of a mutation whose snapshot rewrite fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFailurePolicy {
    /// Roll back the in-memory change and return the I/O error
    Propagate,

    /// Log the error, keep the in-memory change and mark the store dirty
    LogAndContinue,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./snapstore.snap"),
            sync_strategy: SyncStrategy::EveryWrite,
            persist_failure: PersistFailurePolicy::Propagate,
            quarantine_corrupt: false,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Reject configurations the store cannot open
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("store path is empty".to_string()));
        }
        if self.path.file_name().is_none() {
            return Err(StoreError::Config(format!(
                "store path {} does not name a file",
                self.path.display()
            )));
        }
        Ok(())
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the backing snapshot file
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the persistence failure policy
    pub fn persist_failure(mut self, policy: PersistFailurePolicy) -> Self {
        self.config.persist_failure = policy;
        self
    }

    /// Move corrupt snapshots aside on open
    pub fn quarantine_corrupt(mut self, enabled: bool) -> Self {
        self.config.quarantine_corrupt = enabled;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
