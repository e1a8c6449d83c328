//! Core library for rollcall.
//!
//! This crate loads the community roster, enriches each member with live
//! GitHub profile and activity data, and groups the result for display:
//!
//! - `roster`: Roster sources with a hardcoded fallback list
//! - `api`: GitHub REST client and typed API errors
//! - `enrich`: Per-member enrichment with presence status derivation
//! - `cache`: Time-bounded memory cache around the aggregation endpoint
//! - `team`: Concurrent enrichment fan-out and role grouping into tabs
//! - `clock`, `random`: Injectable time and jitter sources

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod enrich;
pub mod models;
pub mod random;
pub mod roster;
pub mod team;

pub use api::{ApiError, GitHubClient};
pub use cache::{AggregateClient, MemoryCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use enrich::Enricher;
pub use models::{DisplayMember, EnrichmentRecord, PresenceStatus, Role, RosterEntry};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use roster::{fallback_roster, load_roster, FileRosterSource, HttpRosterSource, RosterSource, StaticRoster};
pub use team::{load_team, Section, TeamTab, TeamView};
