//! HTTP client for fetching the album catalog.

use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use tracing::{debug, instrument};

use super::document::CatalogDocument;
use crate::app_config::ChildProfile;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://www.kidsnote.com";

/// Page size large enough to fetch the whole album history in one request.
pub const DEFAULT_PAGE_SIZE: u32 = 10_000;

/// Connect/read budget for the single catalog request.
const CATALOG_TIMEOUT_SECS: u64 = 30;

/// Errors from catalog retrieval.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network-level failure (DNS, connection, TLS, timeout).
    #[error("network error fetching catalog from {url}: {source}")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx API response.
    #[error("HTTP {status} fetching catalog from {url}")]
    HttpStatus {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response body was not a valid catalog document.
    #[error("invalid catalog response: {source}")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the album catalog API.
///
/// Carries the session headers on every request; the headers are treated as
/// an opaque immutable map supplied by the session layer.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client against the production API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(headers: HeaderMap) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, headers)
    }

    /// Creates a client against an explicit API origin (used by tests).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(base_url: impl Into<String>, headers: HeaderMap) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(CATALOG_TIMEOUT_SECS))
            .default_headers(headers)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the raw catalog JSON for a child profile.
    ///
    /// The raw body is what gets persisted to `list.json`; callers parse it
    /// separately when they need the structured document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] on transport failures and
    /// [`CatalogError::HttpStatus`] for non-2xx responses.
    #[instrument(skip(self), fields(child_id = child.child_id))]
    pub async fn fetch_albums_raw(
        &self,
        child: &ChildProfile,
        page_size: u32,
    ) -> Result<String, CatalogError> {
        let url = format!(
            "{}/api/v1_3/children/{}/albums/",
            self.base_url, child.child_id
        );
        debug!(url = %url, page_size, "fetching album catalog");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("tz", "Asia/Seoul".to_string()),
                ("page_size", page_size.to_string()),
                ("center", child.center.to_string()),
                ("cls", child.cls.to_string()),
                ("child", child.child_id.to_string()),
            ])
            .send()
            .await
            .map_err(|source| CatalogError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| CatalogError::Network {
            url: url.clone(),
            source,
        })
    }

    /// Fetches and parses the catalog for a child profile.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`fetch_albums_raw`](Self::fetch_albums_raw)
    /// plus [`CatalogError::Decode`] when the body is not a catalog
    /// document.
    pub async fn fetch_albums(
        &self,
        child: &ChildProfile,
        page_size: u32,
    ) -> Result<CatalogDocument, CatalogError> {
        let raw = self.fetch_albums_raw(child, page_size).await?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Decode { source })
    }
}
