use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// StorageError
///
/// Failure modes of the key/value storage boundary. Callers are expected to
/// recover locally — a failed read clears the dependent state, a failed write
/// is logged and the in-memory state advances anyway.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failure: {0}")]
    Io(#[from] io::Error),
    /// The backend refused the operation outright (mock failure mode, or a
    /// poisoned in-memory map).
    #[error("storage backend unavailable")]
    Unavailable,
}

// 1. StorageProvider Contract

/// StorageProvider
///
/// Defines the abstract contract for the browser-local-storage analogue: a
/// synchronous key/value slot store. This trait allows us to swap the concrete
/// implementation — the file-backed store (FileStorage) in the demo binary and
/// the in-memory mock (MemoryStorage) during testing — without affecting the
/// session store built on top of it.
pub trait StorageProvider: Send + Sync {
    /// Reads the value stored under `key`, or `None` when the slot is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the slot for `key`. Deleting an absent slot is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// StorageState
///
/// The concrete type used to share the storage provider across the application
/// state.
pub type StorageState = Arc<dyn StorageProvider>;

/// sanitize_key
///
/// Utility function to prevent path traversal by removing directory
/// navigation components (e.g., `..`, `.`) from a key before it is turned
/// into a file name.
fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("_")
}

// 2. The Real Implementation (one file per key)

/// FileStorage
///
/// The concrete implementation backing the demo binary: each key becomes one
/// JSON file under a configured directory, mirroring the single-slot layout of
/// the browser's local storage. Reads of an absent file resolve to `None`
/// rather than an error so the startup restore can fail soft.
#[derive(Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Constructs the store rooted at `dir`. The directory is created lazily
    /// on the first write, so constructing against a missing path is cheap.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl StorageProvider for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// 3. The Mock Implementation (For Tests)

/// MemoryStorage
///
/// An in-memory mock of `StorageProvider` used by the test suites. Supports a
/// failing mode so the soft-failure paths of the session store (read errors,
/// write errors) can be exercised without touching the filesystem.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    /// When true, all operations return a simulated failure.
    should_fail: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    /// Seeds a slot directly, bypassing the trait. Used by tests to plant a
    /// persisted identity (or a corrupt payload) ahead of a restore.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_owned(), value.to_owned());
        }
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable);
        }
        let slots = self.slots.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable);
        }
        let mut slots = self.slots.lock().map_err(|_| StorageError::Unavailable)?;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable);
        }
        let mut slots = self.slots.lock().map_err(|_| StorageError::Unavailable)?;
        slots.remove(key);
        Ok(())
    }
}
