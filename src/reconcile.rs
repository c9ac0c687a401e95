//! Config Reconciliation
//!
//! Keeps the two on-disk config artifacts in line with the settings record:
//! the managed file, whose content is always exactly one rendered config,
//! and bitcoind's own config file, in which only the include directive is
//! ours to touch.

use crate::constants::MANAGED_CONF_FILE_NAME;
use crate::error::StorageError;
use crate::render::render_config;
use crate::settings::BitcoinSettings;
use crate::store::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

const INCLUDE_COMMENT: &str =
    "# Load additional configuration file, relative to the data directory.";

/// Reconciles rendered config text against the files on disk
pub struct ConfigReconciler {
    files: Arc<dyn FileStore>,
    managed_path: PathBuf,
    base_path: PathBuf,
}

impl ConfigReconciler {
    pub fn new(files: Arc<dyn FileStore>, managed_path: PathBuf, base_path: PathBuf) -> Self {
        Self {
            files,
            managed_path,
            base_path,
        }
    }

    /// The two-line directive that must appear in the base config file.
    fn include_directive(&self) -> String {
        let base_name = self
            .managed_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| MANAGED_CONF_FILE_NAME.to_string());
        format!("{}\nincludeconf={}", INCLUDE_COMMENT, base_name)
    }

    /// Whether the managed file already holds the rendered text for this
    /// record, byte for byte. An absent file compares as empty. Callers use
    /// this to decide whether the daemon needs a restart.
    pub async fn is_managed_config_up_to_date(
        &self,
        settings: &BitcoinSettings,
    ) -> Result<bool, StorageError> {
        let rendered = render_config(settings);
        let existing = if self.files.exists(&self.managed_path).await {
            self.files.read_text(&self.managed_path).await?
        } else {
            String::new()
        };
        Ok(rendered == existing)
    }

    /// Overwrite the managed file with freshly rendered config text.
    pub async fn write_managed_config(
        &self,
        settings: &BitcoinSettings,
    ) -> Result<(), StorageError> {
        debug!(path = %self.managed_path.display(), "writing managed config");
        self.files
            .write_text(&self.managed_path, &render_config(settings))
            .await
    }

    /// Ensure the base config file includes the managed one.
    ///
    /// A missing file (or `overwrite`) gets exactly the directive. An
    /// existing file that already contains the directive is left alone;
    /// otherwise the directive is prepended and everything the user put
    /// there stays verbatim.
    pub async fn reconcile_base_config(&self, overwrite: bool) -> Result<(), StorageError> {
        let directive = self.include_directive();

        if overwrite || !self.files.exists(&self.base_path).await {
            info!(path = %self.base_path.display(), "writing base config with include directive");
            return self.files.write_text(&self.base_path, &directive).await;
        }

        let existing = self.files.read_text(&self.base_path).await?;
        if existing.contains(&directive) {
            debug!(path = %self.base_path.display(), "base config already includes managed config");
            return Ok(());
        }

        info!(path = %self.base_path.display(), "prepending include directive to base config");
        self.files
            .write_text(&self.base_path, &format!("{}\n{}", directive, existing))
            .await
    }
}
