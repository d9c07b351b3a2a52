//! Command implementations for bannerctl CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use bannerctl_core::{Actions, BannerConfig};
use clap::Args;
use serde::Serialize;

pub mod banner;

pub use banner::{run_create, run_delete, run_list, run_resolve, run_show, run_update};

/// Options shared by every banner command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (default: ~/.bannerctl/config.toml)
    #[arg(long, global = true, env = "BANNERCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL (overrides config/environment)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Abort any store operation after this many milliseconds
    /// (overrides BANNERCTL_TIMEOUT_MS and the config file)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl GlobalArgs {
    /// Config file in use: `--config`, `BANNERCTL_CONFIG`, or the default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(BannerConfig::config_path)
    }

    /// Effective configuration: file, then environment, then flags.
    pub fn load_config(&self) -> Result<BannerConfig> {
        let mut config = match &self.config {
            Some(path) => BannerConfig::load_from(path)?,
            None => BannerConfig::load()?,
        };

        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(ms) = self.timeout_ms {
            config.engine.timeout_ms = Some(ms);
        }
        Ok(config)
    }

    /// Build the action façade over PostgreSQL.
    pub fn connect(&self) -> Result<Actions> {
        let config = self.load_config()?;
        Actions::connect(&config).context("Failed to set up database pool")
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
