use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Capacity bound on the serialized store (5 MB).
pub const DEFAULT_CAPACITY: usize = 5 * 1024 * 1024;

/// Error type for key-value storage operations
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("storage capacity exceeded ({used} of {limit} bytes)")]
    CapacityExceeded { used: usize, limit: usize },
    #[error("could not write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A synchronous, bounded string key-value store. The persistence adapter
/// and preference adapter are written against this port so they can be
/// tested with an in-memory fake.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
    fn remove(&mut self, key: &str) -> Result<(), KvError>;
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// All keys live in one JSON object file; every mutation rewrites the file
/// atomically. A file that is missing or unreadable opens as an empty store.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    capacity: usize,
}

impl FileKv {
    pub fn open(path: &Path) -> FileKv {
        Self::open_with_capacity(path, DEFAULT_CAPACITY)
    }

    pub fn open_with_capacity(path: &Path, capacity: usize) -> FileKv {
        let entries = fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        FileKv {
            path: path.to_path_buf(),
            entries,
            capacity,
        }
    }

    fn serialized(&self) -> String {
        // BTreeMap keeps the file diff-stable across writes
        serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "{}".to_string())
    }

    fn flush(&self) -> Result<(), KvError> {
        let content = self.serialized();
        if content.len() > self.capacity {
            return Err(KvError::CapacityExceeded {
                used: content.len(),
                limit: self.capacity,
            });
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| KvError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and file in agreement on failure
            match previous {
                Some(old) => {
                    self.entries.insert(key.to_string(), old);
                }
                None => {
                    self.entries.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KvError> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory store for tests. An optional capacity bound (total key+value
/// bytes) makes the quota-exceeded path reachable without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> MemoryKv {
        MemoryKv::default()
    }

    pub fn with_capacity(capacity: usize) -> MemoryKv {
        MemoryKv {
            entries: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        if let Some(limit) = self.capacity {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let used = self.used_bytes() - existing + key.len() + value.len();
            if used > limit {
                return Err(KvError::CapacityExceeded { used, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KvError> {
        self.entries.remove(key);
        Ok(())
    }
}
