//! Shared test utilities for integration tests
//!
//! Provides an in-memory [`FileStore`] that records every write, so tests
//! can assert not just on final file content but on whether a write
//! happened at all.

use async_trait::async_trait;
use bitconf::error::StorageError;
use bitconf::store::FileStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory file store that counts writes per path
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file as if it already existed on disk
    pub fn seed(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Number of writes issued against this path
    pub fn write_count(&self, path: &Path) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_path() == path)
            .count()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn read_text(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
