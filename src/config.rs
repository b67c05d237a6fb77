//! Configuration for docstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a docstore instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding the whole snapshot as one JSON document
    pub path: PathBuf,

    /// Delete any existing file before opening (debug/test convenience)
    pub reset_on_open: bool,

    /// fsync the snapshot before a write returns
    pub sync_on_write: bool,

    // -------------------------------------------------------------------------
    // Concurrency Configuration
    // -------------------------------------------------------------------------
    /// How long the exclusive lock is held by mutating operations
    pub lock_scope: LockScope,
}

/// Lock scope for mutating operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    /// Exclusive lock held across load → mutate → persist (no lost updates)
    Operation,

    /// `load` and `persist` lock independently; concurrent writers may
    /// overwrite each other's changes
    PerAccess,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./database.json"),
            reset_on_open: false,
            sync_on_write: true,
            lock_scope: LockScope::Operation,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Remove any existing file when the store is opened
    pub fn reset_on_open(mut self, reset: bool) -> Self {
        self.config.reset_on_open = reset;
        self
    }

    /// Toggle fsync on every persist
    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.config.sync_on_write = sync;
        self
    }

    /// Set the lock scope for mutating operations
    pub fn lock_scope(mut self, scope: LockScope) -> Self {
        self.config.lock_scope = scope;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
