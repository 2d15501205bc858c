//! `download` - materialize catalog media as local files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use albumdl_core::app_config::{AppConfig, child_data_dir, config_dir};
use albumdl_core::auth::{SessionStore, auth_headers};
use albumdl_core::catalog::{CatalogDocument, extract_media_items};
use albumdl_core::download::{DownloadEngine, HttpClient, MediaItem};

use super::{ProcessExit, determine_exit_outcome, select_targets};

/// Resolved options for a download run.
#[derive(Debug)]
pub struct DownloadOptions {
    pub index: Option<usize>,
    pub output: Option<PathBuf>,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub dry_run: bool,
    pub quiet: bool,
}

pub async fn run(opts: DownloadOptions) -> Result<ProcessExit> {
    let config_dir = config_dir();
    let config = AppConfig::load_from(&config_dir);
    let targets = select_targets(&config.children, opts.index)?;

    // A missing session still allows downloads of public CDN URLs; the
    // server rejects what actually needs auth.
    let cookies = SessionStore::new(&config_dir).load().unwrap_or_default();
    if cookies.is_empty() {
        warn!("no stored session; downloading without authentication headers");
    }

    let output_base = opts.output.unwrap_or(config.download_dir);
    info!(output = %output_base.display(), "download root");

    let client = HttpClient::with_headers(auth_headers(&cookies), opts.timeout_secs);
    let engine = DownloadEngine::new(opts.concurrency)
        .context("invalid download engine configuration")?;

    let mut total_succeeded = 0usize;
    let mut total_failed = 0usize;

    for (idx, child) in targets {
        let label = child.label(idx);
        let snapshot = child_data_dir(&config_dir, child.child_id).join("list.json");

        let Ok(raw) = fs::read_to_string(&snapshot) else {
            warn!(%label, path = %snapshot.display(), "no catalog snapshot, run `albumdl fetch` first");
            continue;
        };
        let doc: CatalogDocument = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(%label, error = %e, "catalog snapshot is unreadable, re-run `albumdl fetch`");
                continue;
            }
        };

        let items = extract_media_items(&doc);
        if items.is_empty() {
            warn!(%label, "catalog contains no downloadable media");
            continue;
        }
        info!(%label, items = items.len(), "media items found");

        let child_output = output_base.join(child.folder_name());

        if opts.dry_run {
            print_dry_run(&items, &child_output);
            continue;
        }

        let progress = (!opts.quiet).then(|| batch_progress_bar(items.len()));
        let stats = engine
            .run(&client, items, &child_output, progress)
            .await
            .with_context(|| format!("download run failed for {label}"))?;

        info!(
            %label,
            downloaded = stats.completed(),
            skipped = stats.skipped(),
            failed = stats.failed(),
            "child complete"
        );
        total_succeeded += stats.succeeded();
        total_failed += stats.failed();
    }

    if !opts.dry_run {
        info!(
            succeeded = total_succeeded,
            failed = total_failed,
            "all downloads complete"
        );
    }

    Ok(determine_exit_outcome(total_succeeded, total_failed))
}

fn print_dry_run(items: &[MediaItem], child_output: &std::path::Path) {
    for item in items {
        println!("{}", item.full_path(child_output).display());
    }
}

fn batch_progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
