//! `config` - show or update persisted settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use albumdl_core::app_config::{AppConfig, config_dir};

use super::ProcessExit;

pub fn run(download_dir: Option<PathBuf>, show: bool) -> Result<ProcessExit> {
    let config_dir = config_dir();
    let mut config = AppConfig::load_from(&config_dir);

    let updated = if let Some(dir) = download_dir {
        config.download_dir = dir;
        config
            .save_to(&config_dir)
            .context("cannot write config file")?;
        info!(download_dir = %config.download_dir.display(), "download directory updated");
        true
    } else {
        false
    };

    // Bare `config` with no update behaves like `config --show`.
    if show || !updated {
        println!("Current settings:");
        println!("  config file:  {}", config_dir.join("config.json").display());
        println!("  download dir: {}", config.download_dir.display());
        println!("  children:     {}", config.children.len());
    }

    Ok(ProcessExit::Success)
}
