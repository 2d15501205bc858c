//! CLI entry point for the albumdl tool.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::ProcessExit;
use commands::download::DownloadOptions;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?cli, "CLI arguments parsed");

    match dispatch(cli).await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ProcessExit> {
    match cli.command {
        Commands::Fetch { index, page_size } => commands::fetch::run(index, page_size).await,
        Commands::Download {
            index,
            output,
            timeout,
            concurrent,
            dry_run,
        } => {
            commands::download::run(DownloadOptions {
                index,
                output,
                timeout_secs: timeout,
                concurrency: usize::from(concurrent),
                dry_run,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::List => commands::list::run(),
        Commands::Config { download_dir, show } => commands::config::run(download_dir, show),
    }
}
