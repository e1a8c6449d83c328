//! Data models for the team roster.
//!
//! - `RosterEntry`, `Role`: Static roster records
//! - `EnrichmentRecord`, `PresenceStatus`: Live data derived from GitHub
//! - `DisplayMember`: A roster entry merged with its enrichment
//! - GitHub resource types: `GitHubUser`, `GitHubEvent`, `GitHubRepo`

pub mod enrichment;
pub mod github;
pub mod member;

pub use enrichment::{EnrichmentRecord, PresenceStatus};
pub use github::{GitHubEvent, GitHubRepo, GitHubUser};
pub use member::{DisplayMember, Role, RoleGroup, RosterEntry};
