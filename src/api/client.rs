//! DigitalOcean inference API client
//!
//! This module provides the network half of the catalog service: a thin
//! reqwest wrapper that retrieves a JSON resource with auth headers, a hard
//! request timeout, and redirect following.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Base URL for the DigitalOcean inference API
pub const API_BASE_URL: &str = "https://inference.do-ai.run/v1";

/// Hard timeout applied to every request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when fetching a resource
///
/// Transport and HTTP-status failures are kept apart from body-decode
/// failures: the catalog service falls back to a stale cache only for the
/// former.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or non-success HTTP status
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for fetching JSON resources from the inference API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new ApiClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new ApiClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a JSON document from `url` with the given headers
    ///
    /// Redirects are followed (reqwest's default policy); the whole request
    /// is bounded by a 30-second timeout. A timeout surfaces as the same
    /// `Request` failure class as any other transport error.
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded response body
    /// * `Err(ApiError)` - If the request, status check, or decoding fails
    pub async fn get_json(&self, url: &str, headers: &HeaderMap) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let document: Value = serde_json::from_str(&text)?;
        Ok(document)
    }
}
