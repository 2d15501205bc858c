//! `list` - show stored child profiles and their catalog snapshots.

use std::fs;

use anyhow::Result;

use albumdl_core::app_config::{AppConfig, child_data_dir, config_dir};
use albumdl_core::catalog::{CatalogDocument, catalog_stats};

use super::{ProcessExit, select_targets};

pub fn run() -> Result<ProcessExit> {
    let config_dir = config_dir();
    let config = AppConfig::load_from(&config_dir);
    // Reuses the empty-profile error message.
    let targets = select_targets(&config.children, None)?;

    println!("Stored children ({}):", targets.len());
    for (idx, child) in targets {
        let snapshot = child_data_dir(&config_dir, child.child_id).join("list.json");
        let status = match fs::read_to_string(&snapshot) {
            Ok(raw) => serde_json::from_str::<CatalogDocument>(&raw)
                .map(|doc| catalog_stats(&doc).summary())
                .unwrap_or_else(|_| "unreadable catalog snapshot".to_string()),
            Err(_) => "no catalog snapshot (run `albumdl fetch`)".to_string(),
        };
        println!("  {} - {status}", child.label(idx));
    }

    Ok(ProcessExit::Success)
}
