//! Settings Store
//!
//! Persistence for the settings override layer. The disk itself sits behind
//! the [`FileStore`] trait so the merge/render pipeline never touches
//! `tokio::fs` directly and tests can substitute their own store.

pub mod disk;

pub use disk::DiskFileStore;

use crate::error::StorageError;
use crate::settings::{BitcoinSettings, SettingsPatch};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Asynchronous file-store interface
///
/// Text primitives are required; the JSON helpers are provided on top of
/// them so implementations only deal in bytes on disk.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text. A missing file is `NotFound`, anything
    /// else an I/O error.
    async fn read_text(&self, path: &Path) -> Result<String, StorageError>;

    /// Replace the file's content wholesale.
    async fn write_text(&self, path: &Path, content: &str) -> Result<(), StorageError>;

    async fn read_json(&self, path: &Path) -> Result<Value, StorageError> {
        let text = self.read_text(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn write_json(&self, path: &Path, value: &Value) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(value)?;
        self.write_text(path, &text).await
    }
}

/// Store for the persisted settings layer
///
/// Loading always succeeds: any failure to read or parse the layer is
/// treated as "no overrides persisted" and the injected defaults win.
/// Failures to WRITE the layer always propagate.
pub struct SettingsStore {
    files: Arc<dyn FileStore>,
    path: PathBuf,
    defaults: BitcoinSettings,
}

impl SettingsStore {
    pub fn new(files: Arc<dyn FileStore>, path: PathBuf, defaults: BitcoinSettings) -> Self {
        Self {
            files,
            path,
            defaults,
        }
    }

    pub fn defaults(&self) -> &BitcoinSettings {
        &self.defaults
    }

    /// The persisted override layer, or an empty layer when the file is
    /// missing, unreadable, or malformed. A malformed file is logged louder
    /// than a missing one but handled the same way.
    async fn persisted_layer(&self) -> SettingsPatch {
        let value = match self.files.read_json(&self.path).await {
            Ok(value) => value,
            Err(StorageError::NotFound(_)) => {
                debug!(path = %self.path.display(), "no persisted settings layer");
                return SettingsPatch::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "settings layer unreadable, using defaults");
                return SettingsPatch::default();
            }
        };

        match serde_json::from_value(value) {
            Ok(layer) => layer,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "settings layer malformed, using defaults");
                SettingsPatch::default()
            }
        }
    }

    /// Current effective settings: defaults with the persisted layer applied.
    pub async fn load(&self) -> BitcoinSettings {
        self.defaults.apply(&self.persisted_layer().await)
    }

    /// Write a full settings record back as the new persisted layer.
    pub async fn persist(&self, settings: &BitcoinSettings) -> Result<(), StorageError> {
        let value = serde_json::to_value(settings)?;
        self.files.write_json(&self.path, &value).await
    }

    /// Merge a partial update into the current settings and persist the
    /// result, returning the merged record.
    ///
    /// Two overlapping calls race on the read-modify-write; the last writer
    /// to persist wins and may drop the other's update.
    pub async fn merge_and_persist(
        &self,
        patch: &SettingsPatch,
    ) -> Result<BitcoinSettings, StorageError> {
        let merged = self.load().await.apply(patch);
        self.persist(&merged).await?;
        Ok(merged)
    }
}
