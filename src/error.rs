//! Error types for SnapStore
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for SnapStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    /// `create` was given a record whose key is already stored
    #[error("Key already in use: {key}")]
    DuplicateKey { key: String },

    /// `read`/`update`/`delete` was given a key that is not stored
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot I/O error: {0}")]
    Persistence(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Snapshot Format Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Snapshot corruption detected: {0}")]
    Corrupt(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Build a `DuplicateKey` error from any debuggable key
    pub fn duplicate_key(key: &impl std::fmt::Debug) -> Self {
        StoreError::DuplicateKey {
            key: format!("{:?}", key),
        }
    }

    /// Build a `KeyNotFound` error from any debuggable key
    pub fn key_not_found(key: &impl std::fmt::Debug) -> Self {
        StoreError::KeyNotFound {
            key: format!("{:?}", key),
        }
    }

    /// True for the two key-related error kinds
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateKey { .. } | StoreError::KeyNotFound { .. }
        )
    }
}
