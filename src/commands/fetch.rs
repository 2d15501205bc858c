//! `fetch` - retrieve album catalogs and persist per-child snapshots.

use std::fs;

use anyhow::{Context, Result, bail};
use tracing::info;

use albumdl_core::app_config::{AppConfig, child_data_dir, config_dir};
use albumdl_core::auth::{SessionStore, auth_headers};
use albumdl_core::catalog::{CatalogClient, CatalogDocument, catalog_stats};

use super::{ProcessExit, select_targets};

pub async fn run(index: Option<usize>, page_size: u32) -> Result<ProcessExit> {
    let config_dir = config_dir();
    let Some(cookies) = SessionStore::new(&config_dir).load() else {
        bail!(
            "no stored session; place captured cookies at {}",
            config_dir.join("session.json").display()
        );
    };

    let config = AppConfig::load_from(&config_dir);
    let targets = select_targets(&config.children, index)?;
    let client = CatalogClient::new(auth_headers(&cookies));

    for (idx, child) in targets {
        let label = child.label(idx);
        info!(%label, "fetching album catalog");

        let raw = client
            .fetch_albums_raw(child, page_size)
            .await
            .with_context(|| format!("failed to fetch catalog for {label}"))?;

        let data_dir = child_data_dir(&config_dir, child.child_id);
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("cannot create {}", data_dir.display()))?;
        let snapshot = data_dir.join("list.json");
        fs::write(&snapshot, &raw)
            .with_context(|| format!("cannot write {}", snapshot.display()))?;

        let summary = serde_json::from_str::<CatalogDocument>(&raw)
            .map(|doc| catalog_stats(&doc).summary())
            .unwrap_or_else(|_| "unreadable catalog".to_string());
        info!(%label, path = %snapshot.display(), %summary, "catalog saved");
    }

    Ok(ProcessExit::Success)
}
