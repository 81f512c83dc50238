//! SnapStore CLI
//!
//! Command-line interface over a store of string key/value entries.

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use snapstore::snapshot::SnapshotReader;
use snapstore::{FileStore, PersistFailurePolicy, Record, StoreConfig, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// A key/value entry as stored by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    key: String,
    value: String,
}

impl Record for Entry {
    type Key = String;

    fn key(&self) -> &String {
        &self.key
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// SnapStore CLI
#[derive(Parser, Debug)]
#[command(name = "snapstore-cli")]
#[command(about = "CLI for the SnapStore record store")]
#[command(version)]
struct Args {
    /// Backing snapshot file
    #[arg(short, long, default_value = "./snapstore.snap")]
    file: String,

    /// Skip fsync before renaming each snapshot into place
    #[arg(long)]
    no_sync: bool,

    /// Keep in-memory changes when the snapshot cannot be written
    #[arg(long)]
    tolerate_io_errors: bool,

    /// Move a corrupt snapshot aside instead of starting over it
    #[arg(long)]
    quarantine: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new entry (fails if the key exists)
    Create {
        /// The key to create
        key: String,

        /// The value to store
        value: String,
    },

    /// Read an entry by key
    Read {
        /// The key to read
        key: String,
    },

    /// Update an existing entry
    Update {
        /// The key to update
        key: String,

        /// The new value
        value: String,
    },

    /// Delete an entry
    Delete {
        /// The key to delete
        key: String,
    },

    /// List all entries
    List,

    /// Show snapshot header information
    Info,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> snapstore::Result<()> {
    let config = StoreConfig::builder()
        .path(&args.file)
        .sync_strategy(if args.no_sync {
            SyncStrategy::OsManaged
        } else {
            SyncStrategy::EveryWrite
        })
        .persist_failure(if args.tolerate_io_errors {
            PersistFailurePolicy::LogAndContinue
        } else {
            PersistFailurePolicy::Propagate
        })
        .quarantine_corrupt(args.quarantine)
        .build();

    let open = || -> snapstore::Result<FileStore<Entry>> {
        let store = FileStore::open(config.clone())?;
        tracing::debug!(outcome = ?store.load_outcome(), "store opened");
        Ok(store)
    };

    let store = match args.command {
        Commands::Info => return info(&args.file),
        Commands::Create { key, value } => {
            let store = open()?;
            store.create(&Entry { key, value })?;
            store
        }
        Commands::Read { key } => {
            let store = open()?;
            println!("{}", store.read(&key)?.value);
            store
        }
        Commands::Update { key, value } => {
            let store = open()?;
            store.update(&Entry { key, value })?;
            store
        }
        Commands::Delete { key } => {
            let store = open()?;
            store.delete(&key)?;
            store
        }
        Commands::List => {
            let store = open()?;
            for entry in store.get_all() {
                println!("{}\t{}", entry.key, entry.value);
            }
            store
        }
    };

    if store.is_dirty() {
        tracing::warn!(path = %store.path().display(), "changes were not written to disk");
    }

    Ok(())
}

fn info(file: &str) -> snapstore::Result<()> {
    match SnapshotReader::read_header(Path::new(file))? {
        Some(header) => {
            println!("version:      {}", header.version);
            println!("records:      {}", header.record_count);
            println!("payload:      {} bytes", header.payload_len);
            println!("checksum:     {:#010x}", header.checksum);
        }
        None => println!("no snapshot at {}", file),
    }
    Ok(())
}
