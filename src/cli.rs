//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use albumdl_core::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use albumdl_core::catalog::DEFAULT_PAGE_SIZE;

/// Fetch nursery album catalogs and download attached media.
///
/// albumdl keeps per-child catalog snapshots under its config directory and
/// materializes attached images and videos into date-based folders, skipping
/// files that already exist.
#[derive(Parser, Debug)]
#[command(name = "albumdl")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch album catalogs and store them as per-child snapshots
    Fetch {
        /// Child index as shown by `list` (all children when omitted)
        #[arg(short = 'n', long = "index")]
        index: Option<usize>,

        /// Catalog page size (large enough to fetch everything at once)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },

    /// Download media referenced by the stored catalog snapshots
    Download {
        /// Child index as shown by `list` (all children when omitted)
        #[arg(short = 'n', long = "index")]
        index: Option<usize>,

        /// Download root (defaults to the configured download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-file timeout in seconds (1-3600)
        #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
        timeout: u64,

        /// Maximum concurrent downloads (1-100)
        #[arg(short = 'c', long = "concurrent", default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
        concurrent: u8,

        /// Print resolved file paths without downloading
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stored child profiles and their catalog snapshots
    List,

    /// Show or update persisted settings
    Config {
        /// Set the download root directory
        #[arg(short = 'd', long)]
        download_dir: Option<PathBuf>,

        /// Show current settings
        #[arg(short, long)]
        show: bool,
    },
}
