//! Cached access to the server-side team aggregation endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::api::check_response;
use crate::clock::Clock;

use super::MemoryCache;

/// Cache key under which the aggregated payload is stored
pub const AGGREGATE_CACHE_KEY: &str = "team-github-data";

/// Fetches the whole team's GitHub data in one request, behind a `MemoryCache`.
///
/// Unlike per-member enrichment, failures are returned to the caller.
/// Concurrent misses are not de-duplicated; each one issues its own request.
pub struct AggregateClient {
    http: Client,
    endpoint: String,
    cache: MemoryCache<Value>,
}

impl AggregateClient {
    pub fn new(http: Client, endpoint: &str, clock: Arc<dyn Clock>) -> Self {
        Self::with_cache(http, endpoint, MemoryCache::new(clock))
    }

    pub fn with_cache(http: Client, endpoint: &str, cache: MemoryCache<Value>) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            cache,
        }
    }

    pub fn cache(&self) -> &MemoryCache<Value> {
        &self.cache
    }

    /// Return the aggregated team data, from cache when fresh.
    pub async fn fetch_aggregated(&self) -> Result<Value> {
        if let Some(cached) = self.cache.read(AGGREGATE_CACHE_KEY) {
            return Ok(cached);
        }

        debug!(endpoint = %self.endpoint, "Fetching team data from aggregation endpoint");
        let data = match self.request().await {
            Ok(data) => data,
            Err(e) => {
                error!(endpoint = %self.endpoint, error = %e, "Aggregation fetch failed");
                return Err(e);
            }
        };

        self.cache.write(AGGREGATE_CACHE_KEY, data.clone());
        debug!("Cached aggregation response");
        Ok(data)
    }

    async fn request(&self) -> Result<Value> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", self.endpoint))?;

        let response = check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", self.endpoint))
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
