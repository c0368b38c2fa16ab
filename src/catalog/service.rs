//! Cache-backed catalog retrieval
//!
//! The decision policy between disk and network: a fresh cache file is
//! trusted without touching the network, a stale or missing one triggers a
//! fetch, and a failed fetch falls back to whatever cached copy exists. The
//! stale fallback is the only resilience mechanism; there is no retry loop.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, API_BASE_URL};
use crate::cache::{CacheError, CacheStore};
use crate::catalog::model::{annotate, ModelEntry};

/// How long a cached catalog is trusted without a network check
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Errors that can occur when retrieving the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network fetch failed and no cache file exists to fall back on
    #[error("Failed to download data from {url} and no cache is available at {path}: {source}")]
    Download {
        url: String,
        path: PathBuf,
        #[source]
        source: ApiError,
    },

    /// Forced refresh failed; the existing cache is left untouched
    #[error("Failed to refresh models cache: {0}")]
    Refresh(#[source] ApiError),

    /// Cache file I/O or corruption; kept distinct from `Download` so
    /// callers can tell "no data" apart from "corrupt data"
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The fetched document does not have the expected catalog shape
    #[error("Unexpected catalog response shape: {0}")]
    Response(#[source] serde_json::Error),
}

/// Expected shape of the provider's catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    data: Vec<ModelEntry>,
}

/// Retrieves the model catalog, preferring the local cache
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: ApiClient,
    store: CacheStore,
    base_url: String,
    cache_timeout: Duration,
}

impl CatalogService {
    /// Creates a service over the given store, using the production API base
    /// URL and the default one-hour freshness window
    pub fn new(store: CacheStore) -> Self {
        Self {
            client: ApiClient::new(),
            store,
            base_url: API_BASE_URL.to_string(),
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// Overrides the API base URL
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the cache freshness window
    #[allow(dead_code)]
    pub fn with_cache_timeout(mut self, cache_timeout: Duration) -> Self {
        self.cache_timeout = cache_timeout;
        self
    }

    /// The cache store this service reads and writes
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// URL of the model listing endpoint
    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    /// Returns the raw catalog document, from cache or network
    ///
    /// A cache file younger than the freshness window is decoded and returned
    /// without any network call. Otherwise the endpoint is fetched; on
    /// success the raw response is persisted (pretty-printed) and returned.
    /// On a transport or HTTP-status failure an existing cache file of any
    /// age is returned as a stale fallback; with no file the fetch error
    /// surfaces as [`CatalogError::Download`].
    ///
    /// Corrupt cache JSON propagates as a parse error on both the fresh-read
    /// and fallback paths. The cache file is never deleted here.
    pub async fn get(&self, headers: &HeaderMap) -> Result<Value, CatalogError> {
        self.store.ensure_parent()?;

        if self.store.is_fresh(self.cache_timeout) {
            log::debug!("catalog cache hit at {}", self.store.path().display());
            return Ok(self.store.read()?);
        }

        let url = self.models_url();
        match self.client.get_json(&url, headers).await {
            Ok(document) => {
                self.store.write(&document)?;
                Ok(document)
            }
            // A body that failed to decode is not a transport failure; it
            // propagates instead of masking the response behind stale data.
            Err(err @ ApiError::Decode(_)) => Err(CatalogError::Refresh(err)),
            Err(err) => {
                if self.store.exists() {
                    log::warn!(
                        "fetch of {} failed ({}); serving stale cache from {}",
                        url,
                        err,
                        self.store.path().display()
                    );
                    Ok(self.store.read()?)
                } else {
                    Err(CatalogError::Download {
                        url,
                        path: self.store.path().to_path_buf(),
                        source: err,
                    })
                }
            }
        }
    }

    /// Returns the annotated model list, from cache or network
    pub async fn models(&self, headers: &HeaderMap) -> Result<Vec<ModelEntry>, CatalogError> {
        let document = self.get(headers).await?;
        let catalog: CatalogDocument =
            serde_json::from_value(document).map_err(CatalogError::Response)?;
        Ok(annotate(catalog.data))
    }

    /// Forces a network fetch and overwrites the cache
    ///
    /// The cache is not consulted; a fetch failure is an error even when a
    /// cached copy exists, and the existing file is left as it was.
    ///
    /// # Returns
    /// The number of models in the refreshed catalog.
    pub async fn refresh(&self, headers: &HeaderMap) -> Result<usize, CatalogError> {
        let url = self.models_url();
        let document = self
            .client
            .get_json(&url, headers)
            .await
            .map_err(CatalogError::Refresh)?;

        self.store.write(&document)?;
        Ok(model_count(&document))
    }
}

/// Best-effort count of models in a catalog document
pub fn model_count(document: &Value) -> usize {
    document
        .get("data")
        .and_then(Value::as_array)
        .map_or(0, |models| models.len())
}
