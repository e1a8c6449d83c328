//! API client for the GitHub REST API.
//!
//! Every call here is a read-only GET. The enrichment layer decides what to
//! do with failures; this client only reports them.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{GitHubEvent, GitHubRepo, GitHubUser};

use super::check_response;

// ============================================================================
// Constants
// ============================================================================

/// Public GitHub API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of recent events requested per user
const EVENTS_PER_PAGE: u32 = 10;

/// Number of recently updated repositories requested per user
const REPOS_PER_PAGE: u32 = 5;

/// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("rollcall/", env!("CARGO_PKG_VERSION"));

/// API client for GitHub.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against the public API with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client against an arbitrary API root
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token sent with every request
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Shared connection pool, for callers issuing their own requests
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Data Fetching Methods =====

    /// Fetch a user's public profile
    pub async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        debug!(username, "Fetching GitHub profile");
        self.get(&url).await
    }

    /// Fetch a user's most recent public events, newest first
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<GitHubEvent>> {
        let url = format!(
            "{}/users/{}/events?per_page={}",
            self.base_url, username, EVENTS_PER_PAGE
        );
        self.get(&url).await
    }

    /// Fetch a user's most recently updated repositories
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.base_url, username, REPOS_PER_PAGE
        );
        self.get(&url).await
    }
}
