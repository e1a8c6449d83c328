//! Team page model: enrichment fan-out, role grouping, and tabs.

use futures::future::join_all;
use serde::Serialize;
use tracing::info;

use crate::enrich::Enricher;
use crate::models::{DisplayMember, Role, RoleGroup, RosterEntry};

const CORE_TEAM_TITLE: &str = "Core Team";
const COMMUNITY_TITLE: &str = "Community Members";
const ALUMNI_TITLE: &str = "Alumni";
const NO_ALUMNI_MESSAGE: &str = "No alumni records yet";

/// Enrich every roster entry concurrently and merge the results, keeping roster order.
pub async fn load_team(roster: Vec<RosterEntry>, enricher: &Enricher) -> Vec<DisplayMember> {
    info!(count = roster.len(), "Fetching GitHub data for team");

    let lookups = roster.into_iter().map(|entry| async move {
        let enrichment = enricher.enrich(&entry.github_username).await;
        DisplayMember::merge(entry, enrichment)
    });

    join_all(lookups).await
}

/// Page tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamTab {
    Current,
    Alumni,
}

impl TeamTab {
    pub const ALL: [TeamTab; 2] = [TeamTab::Current, TeamTab::Alumni];

    pub fn title(&self) -> &'static str {
        match self {
            TeamTab::Current => "Current Team",
            TeamTab::Alumni => "Alumni",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            TeamTab::Current => TeamTab::Alumni,
            TeamTab::Alumni => TeamTab::Current,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        // Two tabs, so both directions land on the other one
        self.next()
    }
}

/// A titled list of members within a tab.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section<'a> {
    pub title: &'static str,
    pub members: &'a [DisplayMember],
}

/// Members partitioned by role group.
#[derive(Debug, Clone, Default)]
pub struct TeamView {
    /// Coordinators, community leads, executives, then SOSWC reps
    pub core_team: Vec<DisplayMember>,
    pub members: Vec<DisplayMember>,
    pub alumni: Vec<DisplayMember>,
}

impl TeamView {
    pub fn new(all: Vec<DisplayMember>) -> Self {
        let mut view = Self::default();
        for member in all {
            match member.role.group() {
                RoleGroup::CoreTeam => view.core_team.push(member),
                RoleGroup::Community => view.members.push(member),
                RoleGroup::Alumni => view.alumni.push(member),
            }
        }
        // Stable, so roster order holds within each role
        view.core_team
            .sort_by_key(|m| Role::CORE_TEAM.iter().position(|r| *r == m.role));
        view
    }

    /// Non-empty sections shown on `tab`, in page order.
    pub fn sections(&self, tab: TeamTab) -> Vec<Section<'_>> {
        let candidates = match tab {
            TeamTab::Current => vec![
                Section { title: CORE_TEAM_TITLE, members: &self.core_team },
                Section { title: COMMUNITY_TITLE, members: &self.members },
            ],
            TeamTab::Alumni => vec![Section { title: ALUMNI_TITLE, members: &self.alumni }],
        };
        candidates.into_iter().filter(|s| !s.members.is_empty()).collect()
    }

    /// Placeholder text for a tab with nothing to show.
    pub fn empty_message(&self, tab: TeamTab) -> Option<&'static str> {
        match tab {
            TeamTab::Alumni if self.alumni.is_empty() => Some(NO_ALUMNI_MESSAGE),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.core_team.len() + self.members.len() + self.alumni.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
