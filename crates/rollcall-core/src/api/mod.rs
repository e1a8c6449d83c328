//! REST client module for the GitHub API.
//!
//! This module provides the `GitHubClient` used to look up a member's
//! public profile, recent activity, and recently updated repositories.
//!
//! No token is required; when one is configured it is sent as a bearer
//! token to raise the unauthenticated rate limit.

pub mod client;
pub mod error;

pub use client::{GitHubClient, DEFAULT_API_BASE_URL, REQUEST_TIMEOUT_SECS};
pub use error::ApiError;

use anyhow::Result;

/// Check if response is successful, returning an error with body if not.
pub(crate) async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &headers, &body).into())
    }
}
