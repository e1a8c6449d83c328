use serde::{Deserialize, Serialize};

/// Coarse approximation of how recently someone was active on GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum PresenceStatus {
    Online,
    Coding,
    Away,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Coding => "coding",
            PresenceStatus::Away => "away",
        }
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live data for one member, recomputed on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EnrichmentRecord {
    pub name: String,
    pub status: PresenceStatus,
    pub last_seen: String,
    /// Approximate contribution count, not a real commit total.
    pub commits: u32,
    pub current_project: String,
    pub public_repos: u32,
    pub followers: u32,
    pub bio: Option<String>,
}
