//! End-to-end tests for the settings apply pipeline
//!
//! Drives the full merge → persist → render → reconcile flow against a real
//! temporary directory.

use bitconf::api::{ConfigApi, ConfigPaths};
use bitconf::settings::{BitcoinSettings, PrunePatch, SettingsPatch};
use bitconf::store::DiskFileStore;
use std::sync::Arc;
use tempfile::TempDir;

fn api_in(dir: &TempDir) -> ConfigApi {
    ConfigApi::new(
        Arc::new(DiskFileStore::new()),
        ConfigPaths::new(dir.path()),
    )
}

fn managed_conf(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("umbrel-bitcoin.conf")).unwrap()
}

#[tokio::test]
async fn test_cache_size_renders_as_mib() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        cache_size_mb: Some(450),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(managed_conf(&dir).contains("dbcache=429"));
}

#[tokio::test]
async fn test_prune_scenario_disables_txindex() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        prune: Some(PrunePatch {
            enabled: Some(true),
            size_gb: Some(300.0),
        }),
        ..Default::default()
    })
    .await
    .unwrap();

    let conf = managed_conf(&dir);
    assert!(conf.contains("prune=286102"));
    assert!(conf.contains("txindex=0"));
    assert!(!conf.contains("txindex=1"));
}

#[tokio::test]
async fn test_managed_config_tracks_latest_apply() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        maxconnections: Some(40),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(api.managed_config_up_to_date().await.unwrap());

    api.apply_custom(&SettingsPatch {
        maxconnections: Some(80),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(api.managed_config_up_to_date().await.unwrap());
    assert!(managed_conf(&dir).contains("maxconnections=80"));
}

#[tokio::test]
async fn test_settings_accumulate_across_applies() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        maxmempool: Some(500),
        ..Default::default()
    })
    .await
    .unwrap();
    api.apply_custom(&SettingsPatch {
        bantime: Some(120),
        ..Default::default()
    })
    .await
    .unwrap();

    let settings = api.current_settings().await;
    assert_eq!(settings.maxmempool, 500);
    assert_eq!(settings.bantime, 120);
}

#[tokio::test]
async fn test_corrupt_settings_store_recovers_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bitcoin-config.json"), "][ not json").unwrap();

    let api = api_in(&dir);
    assert_eq!(api.current_settings().await, BitcoinSettings::default());

    // Applying on top of the corrupt store works and repairs it
    let merged = api
        .apply_custom(&SettingsPatch {
            maxconnections: Some(40),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(merged.maxconnections, 40);
    assert_eq!(api.current_settings().await.maxconnections, 40);
}

#[tokio::test]
async fn test_reset_restores_defaults_and_rewrites_configs() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        cache_size_mb: Some(2000),
        prune: Some(PrunePatch {
            enabled: Some(true),
            size_gb: Some(50.0),
        }),
        ..Default::default()
    })
    .await
    .unwrap();

    api.apply_defaults().await.unwrap();
    assert_eq!(api.current_settings().await, BitcoinSettings::default());
    let conf = managed_conf(&dir);
    assert!(conf.contains("dbcache=429"));
    assert!(conf.contains("txindex=1"));
    assert!(api.managed_config_up_to_date().await.unwrap());
}

#[tokio::test]
async fn test_persisted_layer_is_readable_json() {
    let dir = TempDir::new().unwrap();
    let api = api_in(&dir);

    api.apply_custom(&SettingsPatch {
        network: Some(bitconf::settings::Network::Signet),
        ..Default::default()
    })
    .await
    .unwrap();

    let text = std::fs::read_to_string(dir.path().join("bitcoin-config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["network"], "signet");
    assert_eq!(value["cacheSizeMB"], 450);
}
