//! Backends that hold the raw session record.

use parking_lot::Mutex;
use std::io;
use std::path::{Path, PathBuf};

/// Where the serialized session record lives between runs.
///
/// Implementations deal in opaque strings; encoding, expiry and validity are
/// the [`SessionStore`](super::SessionStore)'s concern.
pub trait SessionStorage: Send + Sync {
    /// The stored record, or `None` if nothing is stored.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace any stored record.
    fn save(&self, record: &str) -> io::Result<()>;

    /// Delete the stored record. Succeeds when nothing is stored.
    fn remove(&self) -> io::Result<()>;
}

/// One JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, record: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, record)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Process-local storage, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw record already stored, as if written by an earlier run.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.record.lock().clone())
    }

    fn save(&self, record: &str) -> io::Result<()> {
        *self.record.lock() = Some(record.to_string());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.record.lock() = None;
        Ok(())
    }
}
