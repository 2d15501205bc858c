//! HTTP client wrapper executing single media transfers.
//!
//! One [`HttpClient::transfer`] call drives one descriptor through the full
//! worker sequence: idempotency check, streamed fetch, size verification,
//! cleanup on failure.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, MAX_IDLE_CONNECTIONS_PER_HOST};
use super::error::DownloadError;
use super::item::MediaItem;

/// Outcome of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// The file was fetched and written.
    Downloaded {
        /// Bytes written to disk.
        bytes: u64,
    },
    /// The destination already existed; no network call was made.
    AlreadyPresent,
}

/// HTTP client for streaming media transfers.
///
/// Created once per run and shared across concurrent transfers; the
/// underlying connection pool is reused. Authentication headers are opaque
/// key-value pairs attached verbatim to every request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with default timeouts and no authentication headers.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_headers(HeaderMap::new(), DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with the default header set and an explicit total
    /// per-transfer timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration.
    #[must_use]
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self::with_headers(HeaderMap::new(), timeout_secs)
    }

    /// Creates a client that attaches the given headers to every request,
    /// with an explicit total per-transfer timeout in seconds.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_headers(headers: HeaderMap, timeout_secs: u64) -> Self {
        // Compressed transfer encoding would hide the Content-Length the
        // size verification compares against, so it stays off here.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .default_headers(headers)
            .gzip(false)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Executes one descriptor: idempotency check, streamed fetch, size
    /// verification, cleanup on failure.
    ///
    /// If the destination file already exists the transfer reports
    /// [`TransferStatus::AlreadyPresent`] without touching the network.
    /// Otherwise the response body is streamed to disk in chunks and the
    /// written byte count is compared against the `Content-Length` header
    /// when the server declared a nonzero one.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] on invalid URLs, transport failures,
    /// timeouts, non-2xx responses, local IO errors, and size mismatches.
    /// On any failure after the destination directory exists, the partial
    /// file is deleted best-effort before the error is returned.
    #[instrument(skip(self, item, output_root), fields(url = %item.url, filename = %item.filename))]
    pub async fn transfer(
        &self,
        item: &MediaItem,
        output_root: &Path,
    ) -> Result<TransferStatus, DownloadError> {
        let path = item.full_path(output_root);

        // Idempotency is existence-only, not checksum-based. A file of any
        // size counts as already downloaded.
        if tokio::fs::metadata(&path).await.is_ok() {
            debug!(path = %path.display(), "destination exists, skipping");
            return Ok(TransferStatus::AlreadyPresent);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(parent.to_path_buf(), e))?;
        }

        let url =
            Url::parse(&item.url).map_err(|_| DownloadError::invalid_url(item.url.clone()))?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&item.url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::http_status(
                item.url.clone(),
                response.status().as_u16(),
            ));
        }

        // 0 or absent means "unknown expected size", not "must be empty".
        let expected = parse_content_length(response.headers());

        match stream_to_file(response, &item.url, &path).await {
            Ok(bytes_written) => {
                enforce_expected_size(&path, expected, bytes_written).await?;
                debug!(path = %path.display(), bytes = bytes_written, "transfer complete");
                Ok(TransferStatus::Downloaded {
                    bytes: bytes_written,
                })
            }
            Err(e) => {
                debug!(path = %path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&path).await;
                Err(e)
            }
        }
    }
}

/// Maps a reqwest error to the download taxonomy, promoting timeouts.
fn classify_reqwest_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::network(url, error)
    }
}

/// Reads a nonzero Content-Length from response headers.
fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|&len| len > 0)
}

/// Streams the response body to the destination, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    response: Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(file_path)
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| classify_reqwest_error(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk before the size comparison.
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

/// Verifies the written size against a known expected size.
///
/// On mismatch the destination file is deleted and the transfer fails; a
/// truncated file must never survive looking complete. Unknown expected
/// size passes unconditionally.
async fn enforce_expected_size(
    path: &Path,
    expected: Option<u64>,
    actual: u64,
) -> Result<(), DownloadError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    if expected == actual {
        return Ok(());
    }
    let _ = tokio::fs::remove_file(path).await;
    Err(DownloadError::integrity(
        path.to_path_buf(),
        expected,
        actual,
    ))
}
