//! # Storage Module
//!
//! The durable key-value substrate shared by the cart store and terminal
//! preferences.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Durable Storage Substrate                       │
//! │                                                                     │
//! │  Fixed keys, string values:                                         │
//! │                                                                     │
//! │    till.cart           ──► JSON mapping id → cart line              │
//! │    till.last_category  ──► last selected catalog tab                │
//! │    till.last_order_ref ──► last completed order reference           │
//! │                                                                     │
//! │  Backends:                                                          │
//! │    FileStore   - one file per key under the terminal data dir       │
//! │    MemoryStore - tests and ephemeral tills                          │
//! │                                                                     │
//! │  Concurrency policy: the store is the only resource shared across   │
//! │  processes (reload, second tab). No locking — last-writer-wins is   │
//! │  the accepted policy.                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StorageResult;

// =============================================================================
// Backend Trait
// =============================================================================

/// A durable string-keyed, string-valued store.
///
/// Deliberately tiny: the engine only ever reads and writes whole values
/// under a handful of fixed keys, mirroring web local storage.
pub trait StorageBackend {
    /// Reads the value under `key`, `None` if absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key` if present; absent keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Shared handles delegate to the wrapped backend.
///
/// Lets the cart store and preferences share one backend within the
/// single-threaded session.
impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// File Store
// =============================================================================

/// File-backed storage: one file per key under a data directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous value intact rather than a truncated one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    /// The directory this store writes under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory storage for tests and ephemeral tills.
///
/// `RefCell` interior mutability matches the engine's single-threaded,
/// run-to-completion execution model; no locking is needed or provided.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_read_write_remove() {
        let store = MemoryStore::new();
        assert!(store.read("k").unwrap().is_none());

        store.write("k", "v1").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v1"));

        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(store.read("k").unwrap().is_none());
        // Removing again is not an error
        store.remove("k").unwrap();
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        store.write("till.cart", "{\"1\":{}}").unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.read("till.cart").unwrap().as_deref(),
            Some("{\"1\":{}}")
        );
    }

    #[test]
    fn test_file_store_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.read("till.cart").unwrap().is_none());
        store.remove("till.cart").unwrap();
    }

    #[test]
    fn test_rc_handle_shares_one_backend() {
        let backend = Rc::new(MemoryStore::new());
        let a = backend.clone();
        let b = backend.clone();

        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").unwrap().as_deref(), Some("v"));
    }
}
