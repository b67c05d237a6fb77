//! Store Module
//!
//! The document store: owns the backing file and the reader/writer lock,
//! and exposes typed CRUD operations per entity kind.
//!
//! ## Responsibilities
//! - Create the backing file on open (optionally resetting it first)
//! - Load and persist whole snapshots under the lock
//! - Run every mutation as a load → mutate → persist cycle
//! - Enforce per-collection invariants (id allocation, email uniqueness,
//!   token expiry)

mod posts;
mod users;
mod tokens;

use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::{LockScope, StoreConfig};
use crate::error::Result;
use crate::snapshot::{Snapshot, SnapshotFile};

/// File-backed document store
///
/// ## Concurrency Model
///
/// A single reader/writer lock guards the backing file:
/// - `load` holds the lock in shared mode; loads run concurrently
/// - `persist` holds it exclusively
///
/// Mutating operations follow `StoreConfig::lock_scope`:
/// - `LockScope::Operation`: the exclusive lock spans the whole cycle, so
///   concurrent writers are serialized and ids are never handed out twice
/// - `LockScope::PerAccess`: `load` and `persist` lock independently. Two
///   writers may load the same snapshot and the second persist silently
///   discards the first writer's change (lost update)
///
/// All calls are synchronous and block the calling thread for the duration
/// of file I/O. Share the store between threads with `Arc<Store>`.
pub struct Store {
    /// Store configuration
    config: StoreConfig,

    /// Backing snapshot document
    file: SnapshotFile,

    /// Guards `file`; carries no data of its own
    lock: RwLock<()>,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Delete the existing file if `reset_on_open` is set
    /// 2. Write an empty snapshot if the file does not exist
    ///
    /// Failure to create the file is returned as `StoreError::Io`.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let file = SnapshotFile::new(&config.path, config.sync_on_write);

        if config.reset_on_open {
            match file.remove() {
                Ok(true) => info!(path = %config.path.display(), "removed existing snapshot file"),
                Ok(false) => debug!(path = %config.path.display(), "no snapshot file to reset"),
                Err(e) => warn!(path = %config.path.display(), error = %e, "could not remove snapshot file"),
            }
        }

        let created = file.ensure()?;

        info!(
            path = %config.path.display(),
            created,
            lock_scope = ?config.lock_scope,
            "document store opened"
        );

        Ok(Self {
            config,
            file,
            lock: RwLock::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = StoreConfig::builder().path(path.as_ref()).build();
        Self::open(config)
    }

    /// Read the whole snapshot (shared lock)
    ///
    /// The snapshot is returned by value; callers never hold a reference
    /// into persisted state.
    pub fn load(&self) -> Result<Snapshot> {
        let _guard = self.lock.read();
        self.read_unlocked()
    }

    /// Replace the whole snapshot (exclusive lock)
    pub fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let _guard = self.lock.write();
        self.write_unlocked(snapshot)
    }

    /// Run one load → mutate → persist cycle
    ///
    /// Nothing is written if `mutate` returns an error.
    pub(crate) fn update<T>(&self, mutate: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        match self.config.lock_scope {
            LockScope::Operation => {
                let _guard = self.lock.write();

                let mut snapshot = self.read_unlocked()?;
                let output = mutate(&mut snapshot)?;
                self.write_unlocked(&snapshot)?;

                Ok(output)
            }
            LockScope::PerAccess => {
                let mut snapshot = self.load()?;
                let output = mutate(&mut snapshot)?;
                self.persist(&snapshot)?;

                Ok(output)
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Private Helpers (caller holds the lock)
    // =========================================================================

    fn read_unlocked(&self) -> Result<Snapshot> {
        self.file.ensure()?;
        self.file.read()
    }

    fn write_unlocked(&self, snapshot: &Snapshot) -> Result<()> {
        self.file.ensure()?;
        self.file.write(snapshot)
    }
}
