//! Configuration API
//!
//! Facade over the settings store, renderer, and reconciler. This is the
//! surface an HTTP or CLI layer calls: read the effective settings, apply a
//! partial update, reset to defaults, check whether the on-disk config is
//! current.

use crate::constants::{BASE_CONF_FILE_NAME, MANAGED_CONF_FILE_NAME, SETTINGS_FILE_NAME};
use crate::error::ApiError;
use crate::reconcile::ConfigReconciler;
use crate::settings::{BitcoinSettings, SettingsPatch};
use crate::store::{FileStore, SettingsStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Locations of the three artifacts under a daemon data directory
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Persisted settings layer (JSON)
    pub settings_store: PathBuf,
    /// Config file fully owned by this crate
    pub managed_conf: PathBuf,
    /// bitcoind's own config file, shared with the user
    pub base_conf: PathBuf,
}

impl ConfigPaths {
    /// Standard file names inside a data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            settings_store: data_dir.join(SETTINGS_FILE_NAME),
            managed_conf: data_dir.join(MANAGED_CONF_FILE_NAME),
            base_conf: data_dir.join(BASE_CONF_FILE_NAME),
        }
    }
}

/// Settings management facade
///
/// One instance per config root. No locking: overlapping applies race on
/// the settings read-modify-write and the last writer wins.
pub struct ConfigApi {
    settings: SettingsStore,
    reconciler: ConfigReconciler,
}

impl ConfigApi {
    pub fn new(files: Arc<dyn FileStore>, paths: ConfigPaths) -> Self {
        let settings = SettingsStore::new(
            files.clone(),
            paths.settings_store,
            BitcoinSettings::default(),
        );
        let reconciler = ConfigReconciler::new(files, paths.managed_conf, paths.base_conf);
        Self {
            settings,
            reconciler,
        }
    }

    /// Effective settings: defaults plus whatever layer is persisted.
    pub async fn current_settings(&self) -> BitcoinSettings {
        self.settings.load().await
    }

    /// Apply a partial settings update: persist the merged record, rewrite
    /// the managed config, and make sure the base config includes it.
    pub async fn apply_custom(&self, patch: &SettingsPatch) -> Result<BitcoinSettings, ApiError> {
        self.apply(patch, false).await
    }

    /// Reset everything to defaults. The base config file is rewritten to
    /// the bare include directive, dropping any user additions.
    pub async fn apply_defaults(&self) -> Result<BitcoinSettings, ApiError> {
        let patch = SettingsPatch::from(self.settings.defaults());
        self.apply(&patch, true).await
    }

    async fn apply(
        &self,
        patch: &SettingsPatch,
        overwrite_base: bool,
    ) -> Result<BitcoinSettings, ApiError> {
        let merged = self.settings.load().await.apply(patch);
        info!(network = %merged.network, "applying bitcoind configuration");

        // The three writes are issued together without ordering between
        // them. A crash mid-apply can leave the artifacts inconsistent; the
        // next load re-derives everything from whatever layer survived.
        tokio::try_join!(
            self.settings.persist(&merged),
            self.reconciler.write_managed_config(&merged),
            self.reconciler.reconcile_base_config(overwrite_base),
        )?;

        Ok(merged)
    }

    /// Whether the managed config on disk matches the given record.
    pub async fn check_up_to_date(&self, settings: &BitcoinSettings) -> Result<bool, ApiError> {
        Ok(self
            .reconciler
            .is_managed_config_up_to_date(settings)
            .await?)
    }

    /// Whether the managed config on disk matches the current settings.
    /// `false` means the daemon's config needs regenerating (and the daemon
    /// a restart).
    pub async fn managed_config_up_to_date(&self) -> Result<bool, ApiError> {
        let settings = self.current_settings().await;
        self.check_up_to_date(&settings).await
    }
}
