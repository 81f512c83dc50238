//! # SnapStore
//!
//! A generic, key-addressed record store with:
//! - Create/read/update/delete/list over records with unique keys
//! - Copy-on-access isolation (callers never hold live internal records)
//! - Whole-file snapshot rewrite after every mutation
//! - Lenient loading (missing or corrupt file starts empty)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 RecordStore (create/read/...)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      FileStore<R>                           │
//! │          (RwLock<Vec<R>>, serialized writers)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ every mutation
//!                       ▼
//!               ┌───────────────┐
//!               │   Snapshot    │
//!               │ (tmp+rename)  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use snapstore::{FileStore, Record};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Counter {
//!     name: String,
//!     value: u64,
//! }
//!
//! impl Record for Counter {
//!     type Key = String;
//!     fn key(&self) -> &String {
//!         &self.name
//!     }
//!     fn duplicate(&self) -> Self {
//!         Counter { name: self.name.clone(), value: self.value }
//!     }
//! }
//!
//! let store = FileStore::<Counter>::open_path("counters.snap")?;
//! store.create(&Counter { name: "hits".into(), value: 1 })?;
//! assert_eq!(store.read(&"hits".to_string())?.value, 1);
//! # Ok::<(), snapstore::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod snapshot;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{PersistFailurePolicy, StoreConfig, SyncStrategy};
pub use record::Record;
pub use store::{FileStore, LoadOutcome, RecordStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SnapStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
