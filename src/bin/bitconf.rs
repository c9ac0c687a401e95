//! Bitconf CLI Binary
//!
//! Command-line interface to the settings pipeline: inspect the effective
//! settings, apply partial updates from a JSON file, reset to defaults, and
//! check whether the config on disk is current.

use bitconf::api::{ConfigApi, ConfigPaths};
use bitconf::logging::{init_logging, LoggingConfig};
use bitconf::render::render_config;
use bitconf::settings::SettingsPatch;
use bitconf::store::DiskFileStore;
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bitconf", about = "Settings management for a Bitcoin full node")]
struct Cli {
    /// Data directory holding the settings store and config files
    #[arg(long, env = "BITCONF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (overrides BITCONF_LOG)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective settings as JSON
    Show,
    /// Print the config text that would be written for the current settings
    Render,
    /// Apply a partial settings update from a JSON file
    Apply {
        /// Path to a JSON object with the settings to change
        patch: PathBuf,
    },
    /// Reset all settings to defaults and regenerate both config files
    Reset,
    /// Report whether the managed config file matches the current settings
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if let Some(ref level) = cli.log_level {
        logging_config.level = level.clone();
    }
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let data_dir = match resolve_data_dir(cli.data_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };
    info!(data_dir = %data_dir.display(), "bitconf starting");

    let api = ConfigApi::new(
        Arc::new(DiskFileStore::new()),
        ConfigPaths::new(&data_dir),
    );

    match run(&api, &cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

async fn run(api: &ConfigApi, command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Show => {
            let settings = api.current_settings().await;
            Ok(serde_json::to_string_pretty(&settings)?)
        }
        Command::Render => {
            let settings = api.current_settings().await;
            Ok(render_config(&settings))
        }
        Command::Apply { patch } => {
            let text = tokio::fs::read_to_string(patch).await?;
            let patch: SettingsPatch = serde_json::from_str(&text)?;
            let merged = api.apply_custom(&patch).await?;
            info!("settings applied");
            Ok(serde_json::to_string_pretty(&merged)?)
        }
        Command::Reset => {
            api.apply_defaults().await?;
            Ok("Settings reset to defaults".to_string())
        }
        Command::Status => {
            if api.managed_config_up_to_date().await? {
                Ok("Managed config is up to date".to_string())
            } else {
                Ok("Managed config is stale; run `bitconf apply` or `bitconf reset` to regenerate".to_string())
            }
        }
    }
}

/// Data directory from the flag/env, falling back to the platform data dir.
fn resolve_data_dir(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    ProjectDirs::from("", "", "bitconf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("No data directory given and no home directory found"))
}
