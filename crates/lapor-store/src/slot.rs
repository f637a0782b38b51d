//! File-backed string slots, the local analog of the portal's browser storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::StoreError;

/// Durable local storage: one string slot per key, one file per slot.
///
/// Slots are read at startup and rewritten on every relevant mutation, so
/// their contents survive across process restarts. Writes are synchronous on
/// the calling thread.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a slot. `None` when the slot has never been written.
    pub fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite a slot.
    pub fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.slot_path(key), value)?;
        debug!(key, "slot written");
        Ok(())
    }

    /// Delete a slot. Deleting an absent slot is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
