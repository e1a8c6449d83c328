//! Roster sources.
//!
//! A roster comes from a remote list, a JSON file, or a fixed in-memory
//! list. When the source yields nothing (or fails) the hardcoded
//! `fallback_roster` is used instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::api::check_response;
use crate::models::{Role, RosterEntry};

#[async_trait]
pub trait RosterSource: Send + Sync {
    /// List roster entries in display order.
    async fn list(&self) -> Result<Vec<RosterEntry>>;
}

/// Roster served as a JSON array over HTTP.
pub struct HttpRosterSource {
    client: Client,
    url: String,
}

impl HttpRosterSource {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn list(&self) -> Result<Vec<RosterEntry>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch roster from {}", self.url))?;

        let response = check_response(response).await?;

        let mut entries: Vec<RosterEntry> = response
            .json()
            .await
            .context("Failed to parse roster response")?;
        sort_by_order(&mut entries);
        Ok(entries)
    }
}

/// Roster stored as a JSON array on disk.
pub struct FileRosterSource {
    path: PathBuf,
}

impl FileRosterSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RosterSource for FileRosterSource {
    async fn list(&self) -> Result<Vec<RosterEntry>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read roster file: {}", self.path.display()))?;
        let mut entries: Vec<RosterEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse roster file: {}", self.path.display()))?;
        sort_by_order(&mut entries);
        Ok(entries)
    }
}

/// Fixed, in-memory roster.
pub struct StaticRoster(pub Vec<RosterEntry>);

#[async_trait]
impl RosterSource for StaticRoster {
    async fn list(&self) -> Result<Vec<RosterEntry>> {
        Ok(self.0.clone())
    }
}

/// Stable sort by `order`; entries without one keep their place after the ordered ones.
fn sort_by_order(entries: &mut [RosterEntry]) {
    entries.sort_by_key(|e| (e.order.is_none(), e.order));
}

/// Obtain the roster, substituting the fallback list when the source is empty or fails.
pub async fn load_roster(source: &dyn RosterSource) -> Vec<RosterEntry> {
    match source.list().await {
        Ok(entries) if !entries.is_empty() => {
            debug!(count = entries.len(), "Roster loaded");
            entries
        }
        Ok(_) => {
            debug!("Roster source is empty, using fallback roster");
            fallback_roster()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load roster, using fallback roster");
            fallback_roster()
        }
    }
}

/// The community's current members, used when no roster is available.
pub fn fallback_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new("swanjith-dev", "Swanjith", "Swanjith", &["Systems", "LINUX", "AI"], Role::Member),
        RosterEntry::new("yogi-blockchain", "Yogeshwara", "Yogeshwara7", &["Blockchain", "Web3", "React"], Role::Member),
        RosterEntry::new("akhilesh-dev", "Akhilesh", "AKill-17", &["Java", "Linux", "Event Management"], Role::Member),
        RosterEntry::new("karthik-dev", "Karthikeya J", "KarthikeyaJ", &["Backend", "Node.js", "APIs"], Role::Member),
        RosterEntry::new("sumanth-dev", "Sumanth L", "Sumanth-l", &["Mobile", "Flutter", "Dart"], Role::Member),
        RosterEntry::new("codene0-dev", "C0deNe0", "C0deNe0", &["Security", "Penetration Testing", "Cybersecurity"], Role::Member),
        RosterEntry::new("srujan-dev", "BN Srujan", "BNsrujan", &["Frontend", "React", "UI/UX"], Role::Member),
        RosterEntry::new("vinith-dev", "Shetty Vinith", "ShettyVinith", &["Full Stack", "JavaScript", "Web Development"], Role::Member),
        RosterEntry::new("dhanraj-dev", "Dhanraj SH", "Dhanraj-SH", &["DevOps", "Cloud", "Infrastructure"], Role::Member),
    ]
}
