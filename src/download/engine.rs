//! Coordinator bounding concurrent transfers and aggregating outcomes.
//!
//! The engine submits every descriptor as its own Tokio task at once; a
//! semaphore admission gate bounds how many transfers are actually in
//! flight. One descriptor's failure never aborts or short-circuits the
//! others - outcomes are folded into counters and returned when every task
//! has finished.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::client::{HttpClient, TransferStatus};
use super::item::MediaItem;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Error type for engine setup and batch-level failures.
///
/// Per-item transfer failures never surface here; they are folded into the
/// failure counter. Only conditions that prevent the run from starting at
/// all are errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The descriptor list was empty; nothing to transfer.
    #[error("no media items to download")]
    EmptyBatch,

    /// The output root could not be created.
    #[error("cannot create output root {path}: {source}")]
    OutputRoot {
        /// The output root path.
        path: std::path::PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Statistics from a transfer batch run.
///
/// Uses atomic counters for thread-safe updates from concurrent transfer
/// tasks. The aggregate sums are order-independent, so completion order
/// between transfers does not matter.
#[derive(Debug, Default)]
pub struct DownloadStats {
    completed: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of transfers that fetched a new file.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Returns the number of transfers short-circuited by an existing file.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Returns the number of failed transfers.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the number of successful outcomes (fetched plus skipped).
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.completed() + self.skipped()
    }

    /// Returns the total number of items processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }

    fn increment_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transfer coordinator with a bounded admission gate.
///
/// # Concurrency Model
///
/// - Every descriptor is submitted as its own Tokio task up front
/// - Each task acquires a semaphore permit before starting its transfer
/// - Permits are released when the task finishes, success or failure (RAII)
/// - The gate is the authoritative limit; the HTTP client's per-host pool
///   cap is a secondary, more permissive bound
///
/// # Failure Isolation
///
/// A timeout or error in one transfer cancels only that transfer's request.
/// All outcomes are collected regardless of individual failures.
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Transfers all items into `output_root`, returning aggregate counts.
    ///
    /// The optional progress bar is advanced once per finished item.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyBatch`] when `items` is empty and
    /// [`EngineError::OutputRoot`] when the output root cannot be created.
    /// Both are setup failures: no transfers have been attempted. Per-item
    /// failures do NOT error this method; they are counted in the stats.
    #[instrument(skip(self, client, items, progress), fields(items = items.len(), output_root = %output_root.display()))]
    pub async fn run(
        &self,
        client: &HttpClient,
        items: Vec<MediaItem>,
        output_root: &Path,
        progress: Option<ProgressBar>,
    ) -> Result<DownloadStats, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        tokio::fs::create_dir_all(output_root)
            .await
            .map_err(|source| EngineError::OutputRoot {
                path: output_root.to_path_buf(),
                source,
            })?;

        info!(items = items.len(), "starting transfer batch");

        let stats = Arc::new(DownloadStats::new());
        let mut handles = Vec::with_capacity(items.len());

        for item in items {
            let semaphore = Arc::clone(&self.semaphore);
            let client = client.clone();
            let stats = Arc::clone(&stats);
            let output_root = output_root.to_path_buf();
            let progress = progress.clone();

            handles.push(tokio::spawn(async move {
                // All tasks are submitted at once; the permit acquired here
                // is what actually bounds in-flight transfers. Dropped on
                // scope exit, success or failure alike.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    warn!(url = %item.url, "semaphore closed, dropping transfer");
                    stats.increment_failed();
                    return;
                };

                match client.transfer(&item, &output_root).await {
                    Ok(TransferStatus::Downloaded { bytes }) => {
                        debug!(filename = %item.filename, bytes, "transfer completed");
                        stats.increment_completed();
                    }
                    Ok(TransferStatus::AlreadyPresent) => {
                        debug!(filename = %item.filename, "already present");
                        stats.increment_skipped();
                    }
                    Err(e) => {
                        warn!(url = %item.url, error = %e, "transfer failed");
                        stats.increment_failed();
                    }
                }

                if let Some(progress) = progress {
                    progress.inc(1);
                }
            }));
        }

        debug!(task_count = handles.len(), "waiting for transfers");

        for handle in handles {
            // Task panics are logged but don't fail the batch.
            if let Err(e) = handle.await {
                warn!(error = %e, "transfer task panicked");
            }
        }

        if let Some(progress) = progress {
            progress.finish_and_clear();
        }

        info!(
            completed = stats.completed(),
            skipped = stats.skipped(),
            failed = stats.failed(),
            "transfer batch complete"
        );

        // All tasks are done, so we should hold the sole reference. If not,
        // rebuild from the atomic values.
        match Arc::try_unwrap(stats) {
            Ok(stats) => Ok(stats),
            Err(arc_stats) => {
                let new_stats = DownloadStats::new();
                new_stats
                    .completed
                    .store(arc_stats.completed(), Ordering::SeqCst);
                new_stats
                    .skipped
                    .store(arc_stats.skipped(), Ordering::SeqCst);
                new_stats.failed.store(arc_stats.failed(), Ordering::SeqCst);
                Ok(new_stats)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_new_valid_concurrency() {
        let engine = DownloadEngine::new(1).unwrap();
        assert_eq!(engine.concurrency(), 1);

        let engine = DownloadEngine::new(20).unwrap();
        assert_eq!(engine.concurrency(), 20);

        let engine = DownloadEngine::new(100).unwrap();
        assert_eq!(engine.concurrency(), 100);
    }

    #[test]
    fn test_engine_new_invalid_concurrency_zero() {
        let result = DownloadEngine::new(0);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_engine_new_invalid_concurrency_too_high() {
        let result = DownloadEngine::new(101);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 101 })
        ));
    }

    #[test]
    fn test_engine_run_empty_batch_errors() {
        let engine = DownloadEngine::new(4).unwrap();
        let client = HttpClient::new();
        let temp = tempfile::TempDir::new().unwrap();

        let result = tokio_test::block_on(engine.run(&client, Vec::new(), temp.path(), None));
        assert!(matches!(result, Err(EngineError::EmptyBatch)));
    }

    #[test]
    fn test_download_stats_default() {
        let stats = DownloadStats::default();
        assert_eq!(stats.completed(), 0);
        assert_eq!(stats.skipped(), 0);
        assert_eq!(stats.failed(), 0);
        assert_eq!(stats.succeeded(), 0);
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_download_stats_increment() {
        let stats = DownloadStats::new();

        stats.increment_completed();
        stats.increment_completed();
        stats.increment_skipped();
        stats.increment_failed();

        assert_eq!(stats.completed(), 2);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.succeeded(), 3);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_download_stats_thread_safe() {
        use std::thread;

        let stats = Arc::new(DownloadStats::new());
        let mut handles = Vec::new();

        for _ in 0..10 {
            let stats = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    stats.increment_completed();
                    stats.increment_skipped();
                    stats.increment_failed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.completed(), 1000);
        assert_eq!(stats.skipped(), 1000);
        assert_eq!(stats.failed(), 1000);
        assert_eq!(stats.total(), 3000);
    }

    #[test]
    fn test_engine_error_display() {
        let error = EngineError::InvalidConcurrency { value: 0 };
        let msg = error.to_string();
        assert!(msg.contains("invalid concurrency"));
        assert!(msg.contains('0'));
    }
}
