//! Snapshot File
//!
//! Reads and writes the backing file. Performs no locking of its own;
//! the store serializes access around these calls.
//!
//! ## Write Path
//! 1. Encode the snapshot
//! 2. Write it to a sibling temp file (fsync if configured)
//! 3. Rename the temp file over the target
//!
//! A failed write therefore leaves either the old or the new content,
//! never a torn file.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::Result;

use super::Snapshot;

/// Handle to the on-disk snapshot document
#[derive(Debug)]
pub struct SnapshotFile {
    /// Target path of the snapshot document
    path: PathBuf,

    /// fsync temp file contents before the rename
    sync_on_write: bool,

    /// Disambiguates temp files of concurrent writers (e.g. two readers
    /// racing to recreate a missing file)
    temp_counter: AtomicU64,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>, sync_on_write: bool) -> Self {
        Self {
            path: path.into(),
            sync_on_write,
            temp_counter: AtomicU64::new(0),
        }
    }

    /// Make sure the file exists, writing an empty snapshot if it does not
    ///
    /// Returns `true` if the file was created by this call.
    pub fn ensure(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.write(&Snapshot::empty())?;
                debug!(path = %self.path.display(), "created empty snapshot file");
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read and decode the whole file
    pub fn read(&self) -> Result<Snapshot> {
        let data = fs::read(&self.path)?;
        let snapshot = Snapshot::decode(&data)?;

        debug!(path = %self.path.display(), bytes = data.len(), "loaded snapshot");
        Ok(snapshot)
    }

    /// Encode and replace the whole file
    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let data = snapshot.encode()?;
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, &data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), bytes = data.len(), "persisted snapshot");
        Ok(())
    }

    /// Delete the file
    ///
    /// Returns `false` if there was nothing to delete.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn write_temp(&self, temp_path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(data)?;

        if self.sync_on_write {
            file.sync_all()?;
        }

        Ok(())
    }

    /// "database.json" → ".database.json.<pid>.<n>.tmp" in the same directory
    fn temp_path(&self) -> PathBuf {
        let seq = self.temp_counter.fetch_add(1, Ordering::Relaxed);

        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or(OsStr::new("snapshot")));
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));

        self.path.with_file_name(name)
    }
}
