use serde::{Deserialize, Serialize};

use super::{EnrichmentRecord, PresenceStatus};

/// Position a person holds in the community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Role {
    Coordinator,
    CommunityLead,
    Executive,
    SoswcRep,
    Member,
    Alumni,
}

/// Section of the team page a role is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGroup {
    CoreTeam,
    Community,
    Alumni,
}

impl Role {
    /// Core team roles in the order they are listed.
    pub const CORE_TEAM: [Role; 4] = [
        Role::Coordinator,
        Role::CommunityLead,
        Role::Executive,
        Role::SoswcRep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Coordinator => "Coordinator",
            Role::CommunityLead => "Community Lead",
            Role::Executive => "Executive",
            Role::SoswcRep => "SOSWC Rep",
            Role::Member => "Member",
            Role::Alumni => "Alumni",
        }
    }

    pub fn group(&self) -> RoleGroup {
        match self {
            Role::Coordinator | Role::CommunityLead | Role::Executive | Role::SoswcRep => {
                RoleGroup::CoreTeam
            }
            Role::Member => RoleGroup::Community,
            Role::Alumni => RoleGroup::Alumni,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A person on the static roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    /// GitHub login, distinct from `id`.
    pub github_username: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: Role,
    /// Sort key used by remote roster lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl RosterEntry {
    pub fn new(id: &str, name: &str, github_username: &str, skills: &[&str], role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            github_username: github_username.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            avatar_url: None,
            role,
            order: None,
        }
    }
}

/// A roster entry merged with its live enrichment.
///
/// Where both carry a field (`name`), the enrichment value wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DisplayMember {
    pub id: String,
    pub name: String,
    // Roster keys keep their roster spelling
    #[serde(rename = "github_username")]
    pub github_username: String,
    pub skills: Vec<String>,
    #[serde(rename = "avatar_url")]
    pub avatar_url: Option<String>,
    pub role: Role,
    pub status: PresenceStatus,
    pub last_seen: String,
    pub commits: u32,
    pub current_project: String,
    pub public_repos: u32,
    pub followers: u32,
    pub bio: Option<String>,
}

impl DisplayMember {
    pub fn merge(entry: RosterEntry, enrichment: EnrichmentRecord) -> Self {
        Self {
            id: entry.id,
            name: enrichment.name,
            github_username: entry.github_username,
            skills: entry.skills,
            avatar_url: entry.avatar_url,
            role: entry.role,
            status: enrichment.status,
            last_seen: enrichment.last_seen,
            commits: enrichment.commits,
            current_project: enrichment.current_project,
            public_repos: enrichment.public_repos,
            followers: enrichment.followers,
            bio: enrichment.bio,
        }
    }

    pub fn skills_display(&self) -> String {
        if self.skills.is_empty() {
            "-".to_string()
        } else {
            self.skills.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&Role::CommunityLead).unwrap();
        assert_eq!(json, "\"community_lead\"");
        let role: Role = serde_json::from_str("\"soswc_rep\"").unwrap();
        assert_eq!(role, Role::SoswcRep);
        assert!(serde_json::from_str::<Role>("\"overlord\"").is_err());
    }

    #[test]
    fn test_role_groups() {
        for role in Role::CORE_TEAM {
            assert_eq!(role.group(), RoleGroup::CoreTeam);
        }
        assert_eq!(Role::Member.group(), RoleGroup::Community);
        assert_eq!(Role::Alumni.group(), RoleGroup::Alumni);
    }

    #[test]
    fn test_roster_entry_defaults() {
        let json = r#"{"id":"a","name":"Ada","github_username":"ada","role":"member"}"#;
        let entry: RosterEntry = serde_json::from_str(json).unwrap();
        assert!(entry.skills.is_empty());
        assert_eq!(entry.avatar_url, None);
        assert_eq!(entry.order, None);
    }

    #[test]
    fn test_merge_prefers_enrichment_name() {
        let entry = RosterEntry::new("ada-dev", "Ada", "ada", &["Rust"], Role::Executive);
        let enrichment = EnrichmentRecord {
            name: "Ada Lovelace".to_string(),
            status: PresenceStatus::Coding,
            last_seen: "2 hours ago".to_string(),
            commits: 120,
            current_project: "engine".to_string(),
            public_repos: 7,
            followers: 3,
            bio: Some("Analyst".to_string()),
        };

        let member = DisplayMember::merge(entry, enrichment);
        assert_eq!(member.id, "ada-dev");
        assert_eq!(member.name, "Ada Lovelace");
        assert_eq!(member.role, Role::Executive);
        assert_eq!(member.status, PresenceStatus::Coding);
        assert_eq!(member.skills_display(), "Rust");
    }
}
