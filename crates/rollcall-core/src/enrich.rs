//! Per-member enrichment from GitHub.
//!
//! `Enricher::enrich` always produces a record. Any failure while talking to
//! GitHub is logged and replaced with a placeholder, so one broken lookup
//! never holds up the rest of the roster.

use std::cmp::Reverse;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::GitHubClient;
use crate::clock::Clock;
use crate::models::{EnrichmentRecord, PresenceStatus};
use crate::random::RandomSource;

// ============================================================================
// Constants
// ============================================================================

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Below this many hours since the last event, a member counts as coding
const CODING_WINDOW_HOURS: i64 = 6;

/// Estimated contributions per public repository
const COMMITS_PER_REPO: u32 = 15;

/// Exclusive upper bound of the jitter added to the estimate
const COMMIT_JITTER: u32 = 100;

const MIN_COMMITS: u32 = 20;
const MAX_COMMITS: u32 = 500;

/// Placeholder contribution range when GitHub is unreachable: [50, 250)
const FALLBACK_COMMITS_BASE: u32 = 50;
const FALLBACK_COMMITS_SPAN: u32 = 200;

const LAST_SEEN_UNKNOWN: &str = "unknown";
const FALLBACK_PROJECT: &str = "open-source";
const NO_PROJECT: &str = "exploring";

/// Builds enrichment records from GitHub profile and activity data.
/// Clone is cheap; all fields are shared.
#[derive(Clone)]
pub struct Enricher {
    api: GitHubClient,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl Enricher {
    pub fn new(api: GitHubClient, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self { api, clock, random }
    }

    /// Look up a handle and derive its enrichment record.
    ///
    /// Never fails: errors produce `fallback_record`.
    pub async fn enrich(&self, handle: &str) -> EnrichmentRecord {
        match self.try_enrich(handle).await {
            Ok(record) => record,
            Err(e) => {
                warn!(handle, error = %e, "Failed to fetch GitHub data, using fallback");
                fallback_record(handle, self.random.as_ref())
            }
        }
    }

    async fn try_enrich(&self, handle: &str) -> Result<EnrichmentRecord> {
        let user = self.api.fetch_user(handle).await?;
        let events = self.api.fetch_events(handle).await?;
        let repos = self.api.fetch_repos(handle).await?;

        let last_activity = events.iter().map(|e| e.created_at).max();
        let (status, last_seen) = derive_presence(last_activity, self.clock.now());

        // Earliest entry wins ties, keeping the API's own ordering
        let current_project = repos
            .iter()
            .min_by_key(|r| Reverse(r.updated_at))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| NO_PROJECT.to_string());

        let commits = estimate_contributions(user.public_repos, self.random.below(COMMIT_JITTER));

        let name = user
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| handle.to_string());

        debug!(handle, %status, %last_seen, commits, "Enriched member");

        Ok(EnrichmentRecord {
            name,
            status,
            last_seen,
            commits,
            current_project,
            public_repos: user.public_repos,
            followers: user.followers,
            bio: user.bio,
        })
    }
}

/// Map the time since the last activity to a status and "last seen" text.
///
/// Hours are floored from the millisecond delta, so exactly one hour is
/// "1 hours ago". Timestamps in the future count as active now.
pub fn derive_presence(
    last_activity: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (PresenceStatus, String) {
    let Some(last_activity) = last_activity else {
        return (PresenceStatus::Away, LAST_SEEN_UNKNOWN.to_string());
    };

    let elapsed_ms = (now - last_activity).num_milliseconds();
    let hours = elapsed_ms.div_euclid(MS_PER_HOUR);
    let days = hours.div_euclid(24);

    if hours < 1 {
        (PresenceStatus::Online, "active now".to_string())
    } else if hours < 24 {
        let status = if hours < CODING_WINDOW_HOURS {
            PresenceStatus::Coding
        } else {
            PresenceStatus::Away
        };
        (status, format!("{} hours ago", hours))
    } else if days < 7 {
        (PresenceStatus::Away, format!("{} days ago", days))
    } else {
        (PresenceStatus::Away, format!("{} weeks ago", days / 7))
    }
}

/// Rough contribution count: 15 per public repo plus jitter, clamped to 20..=500.
pub fn estimate_contributions(public_repos: u32, jitter: u32) -> u32 {
    public_repos
        .saturating_mul(COMMITS_PER_REPO)
        .saturating_add(jitter)
        .clamp(MIN_COMMITS, MAX_COMMITS)
}

/// Placeholder used when GitHub data cannot be fetched.
pub fn fallback_record(handle: &str, random: &dyn RandomSource) -> EnrichmentRecord {
    EnrichmentRecord {
        name: handle.to_string(),
        status: PresenceStatus::Away,
        last_seen: LAST_SEEN_UNKNOWN.to_string(),
        commits: FALLBACK_COMMITS_BASE + random.below(FALLBACK_COMMITS_SPAN),
        current_project: FALLBACK_PROJECT.to_string(),
        public_repos: 0,
        followers: 0,
        bio: None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::{FixedRandom, SeededRandom};
    use chrono::{Duration, TimeZone};
    use std::time::Duration as StdDuration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn presence_after(elapsed: Duration) -> (PresenceStatus, String) {
        derive_presence(Some(now() - elapsed), now())
    }

    // -------------------------------------------------------------------------
    // Presence derivation
    // -------------------------------------------------------------------------

    #[test]
    fn test_presence_without_activity() {
        assert_eq!(
            derive_presence(None, now()),
            (PresenceStatus::Away, "unknown".to_string())
        );
    }

    #[test]
    fn test_presence_under_an_hour() {
        assert_eq!(presence_after(Duration::zero()), (PresenceStatus::Online, "active now".to_string()));
        assert_eq!(
            presence_after(Duration::milliseconds(MS_PER_HOUR - 1)),
            (PresenceStatus::Online, "active now".to_string())
        );
    }

    #[test]
    fn test_presence_exactly_one_hour() {
        assert_eq!(
            presence_after(Duration::hours(1)),
            (PresenceStatus::Coding, "1 hours ago".to_string())
        );
    }

    #[test]
    fn test_presence_coding_window_boundary() {
        assert_eq!(
            presence_after(Duration::hours(6) - Duration::milliseconds(1)),
            (PresenceStatus::Coding, "5 hours ago".to_string())
        );
        assert_eq!(
            presence_after(Duration::hours(6)),
            (PresenceStatus::Away, "6 hours ago".to_string())
        );
        assert_eq!(
            presence_after(Duration::hours(24) - Duration::milliseconds(1)),
            (PresenceStatus::Away, "23 hours ago".to_string())
        );
    }

    #[test]
    fn test_presence_days() {
        assert_eq!(presence_after(Duration::hours(24)), (PresenceStatus::Away, "1 days ago".to_string()));
        assert_eq!(
            presence_after(Duration::days(7) - Duration::milliseconds(1)),
            (PresenceStatus::Away, "6 days ago".to_string())
        );
    }

    #[test]
    fn test_presence_weeks() {
        assert_eq!(presence_after(Duration::days(7)), (PresenceStatus::Away, "1 weeks ago".to_string()));
        assert_eq!(presence_after(Duration::days(13)), (PresenceStatus::Away, "1 weeks ago".to_string()));
        assert_eq!(presence_after(Duration::days(70)), (PresenceStatus::Away, "10 weeks ago".to_string()));
    }

    #[test]
    fn test_presence_future_timestamp() {
        assert_eq!(
            presence_after(Duration::minutes(-30)),
            (PresenceStatus::Online, "active now".to_string())
        );
    }

    // -------------------------------------------------------------------------
    // Contribution estimate and fallback
    // -------------------------------------------------------------------------

    #[test]
    fn test_estimate_contributions_clamps() {
        assert_eq!(estimate_contributions(0, 0), 20);
        assert_eq!(estimate_contributions(0, 19), 20);
        assert_eq!(estimate_contributions(0, 99), 99);
        assert_eq!(estimate_contributions(4, 10), 70);
        assert_eq!(estimate_contributions(40, 0), 500);
        assert_eq!(estimate_contributions(u32::MAX, 99), 500);
    }

    #[test]
    fn test_fallback_record_shape() {
        let record = fallback_record("ghost", &FixedRandom(0));
        assert_eq!(record.name, "ghost");
        assert_eq!(record.status, PresenceStatus::Away);
        assert_eq!(record.last_seen, "unknown");
        assert_eq!(record.commits, 50);
        assert_eq!(record.current_project, "open-source");
        assert_eq!(record.public_repos, 0);
        assert_eq!(record.followers, 0);
        assert_eq!(record.bio, None);

        assert_eq!(fallback_record("ghost", &FixedRandom(u32::MAX)).commits, 249);
    }

    #[test]
    fn test_fallback_commits_in_range() {
        let random = SeededRandom::new(7);
        for _ in 0..200 {
            let commits = fallback_record("ghost", &random).commits;
            assert!((50..250).contains(&commits));
        }
    }

    // -------------------------------------------------------------------------
    // End-to-end against a mock GitHub
    // -------------------------------------------------------------------------

    fn enricher_for(server: &MockServer, jitter: u32) -> Enricher {
        let api = GitHubClient::with_base_url(&server.uri(), StdDuration::from_secs(5)).unwrap();
        Enricher::new(api, Arc::new(ManualClock::new(now())), Arc::new(FixedRandom(jitter)))
    }

    async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_enrich_success() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/octocat", serde_json::json!({
            "login": "octocat",
            "name": "The Octocat",
            "bio": "Mascot",
            "public_repos": 8,
            "followers": 42
        }))
        .await;
        mount_json(&server, "/users/octocat/events", serde_json::json!([
            {"created_at": "2025-06-15T09:30:00Z"},
            {"created_at": "2025-06-14T09:30:00Z"}
        ]))
        .await;
        mount_json(&server, "/users/octocat/repos", serde_json::json!([
            {"name": "spoon-knife", "updated_at": "2025-06-10T00:00:00Z"},
            {"name": "hello-world", "updated_at": "2025-06-01T00:00:00Z"}
        ]))
        .await;

        let record = enricher_for(&server, 30).enrich("octocat").await;
        assert_eq!(record.name, "The Octocat");
        assert_eq!(record.status, PresenceStatus::Coding);
        assert_eq!(record.last_seen, "2 hours ago");
        assert_eq!(record.commits, 8 * 15 + 30);
        assert_eq!(record.current_project, "spoon-knife");
        assert_eq!(record.public_repos, 8);
        assert_eq!(record.followers, 42);
        assert_eq!(record.bio.as_deref(), Some("Mascot"));
    }

    #[tokio::test]
    async fn test_enrich_without_events_or_repos() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/quiet", serde_json::json!({
            "login": "quiet",
            "name": "",
            "bio": null,
            "public_repos": 3,
            "followers": 1
        }))
        .await;
        mount_json(&server, "/users/quiet/events", serde_json::json!([])).await;
        mount_json(&server, "/users/quiet/repos", serde_json::json!([])).await;

        let record = enricher_for(&server, 0).enrich("quiet").await;
        assert_eq!(record.name, "quiet");
        assert_eq!(record.status, PresenceStatus::Away);
        assert_eq!(record.last_seen, "unknown");
        assert_eq!(record.current_project, "exploring");
        // 3 * 15 + 0 = 45, inside the clamp
        assert_eq!(record.commits, 45);
        assert_eq!(record.public_repos, 3);
    }

    #[tokio::test]
    async fn test_enrich_all_calls_failing_returns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let record = enricher_for(&server, 10).enrich("ghost").await;
        assert_eq!(record, fallback_record("ghost", &FixedRandom(10)));
        assert_eq!(record.commits, 60);
    }

    #[tokio::test]
    async fn test_enrich_malformed_profile_returns_fallback() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/odd", serde_json::json!({"login": "odd"})).await;

        let record = enricher_for(&server, 0).enrich("odd").await;
        assert_eq!(record.last_seen, "unknown");
        assert_eq!(record.current_project, "open-source");
    }

    #[tokio::test]
    async fn test_enrich_unreachable_host_returns_fallback() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let api = GitHubClient::with_base_url("http://127.0.0.1:9", StdDuration::from_secs(2)).unwrap();
        let enricher = Enricher::new(api, Arc::new(ManualClock::new(now())), Arc::new(FixedRandom(0)));

        let record = enricher.enrich("offline").await;
        assert_eq!(record.name, "offline");
        assert_eq!(record.status, PresenceStatus::Away);
        assert!((50..250).contains(&record.commits));
    }
}
