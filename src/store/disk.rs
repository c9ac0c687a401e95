//! Disk-backed file store
//!
//! `tokio::fs` implementation of [`FileStore`]. Writes land in a sibling
//! temp file first and are renamed into place, so a reader never observes a
//! half-written config.

use crate::error::StorageError;
use crate::store::FileStore;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem-backed [`FileStore`]
#[derive(Debug, Default)]
pub struct DiskFileStore;

impl DiskFileStore {
    pub fn new() -> Self {
        Self
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn read_text(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
            _ => StorageError::IoError(e),
        })
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp = temp_path(path);
        fs::write(&temp, content).await?;
        if let Err(e) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::IoError(e));
        }

        Ok(())
    }
}
