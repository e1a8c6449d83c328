//! GitHub REST API v3 resources.
//!
//! Only the fields read during enrichment are modelled. Required fields that
//! are missing from a response make the whole lookup fail.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /users/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
}

/// An entry from `GET /users/{username}/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEvent {
    pub created_at: DateTime<Utc>,
}

/// An entry from `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
