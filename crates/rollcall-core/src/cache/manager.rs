use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::clock::Clock;

/// Entries are served for 5 minutes after they are written.
/// Short because the aggregation server keeps its own longer cache.
pub const CACHE_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Keyed memory cache with a fixed entry lifetime.
///
/// Expired entries are dropped lazily, on the read that finds them stale.
/// The lock is never held across an await.
pub struct MemoryCache<T> {
    entries: Mutex<HashMap<String, CachedData<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> MemoryCache<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, Duration::minutes(CACHE_TTL_MINUTES))
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CachedData<T>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the payload for `key` if it is still fresh, evicting it otherwise.
    pub fn read(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut entries = self.entries();

        let fresh = entries.get(key)?.is_fresh(now, self.ttl);
        if fresh {
            debug!(cache = key, "Using memory cache");
            entries.get(key).map(|cached| cached.data.clone())
        } else {
            debug!(cache = key, "Evicting expired cache entry");
            entries.remove(key);
            None
        }
    }

    /// Store `data` under `key` stamped with the current time, replacing any previous entry.
    pub fn write(&self, key: &str, data: T) {
        let cached = CachedData::new(data, self.clock.now());
        self.entries().insert(key.to_string(), cached);
    }

    pub fn invalidate_all(&self) {
        self.entries().clear();
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    fn setup() -> (Arc<ManualClock>, MemoryCache<Vec<u32>>) {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let cache = MemoryCache::new(clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_write_then_read_returns_payload() {
        let (_clock, cache) = setup();
        cache.write("team", vec![1, 2, 3]);
        assert_eq!(cache.read("team"), Some(vec![1, 2, 3]));
        assert_eq!(cache.read("other"), None);
    }

    #[test]
    fn test_write_overwrites_and_restamps() {
        let (clock, cache) = setup();
        cache.write("team", vec![1]);
        clock.advance(Duration::minutes(4));
        cache.write("team", vec![2]);
        clock.advance(Duration::minutes(4));
        assert_eq!(cache.read("team"), Some(vec![2]));
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (clock, cache) = setup();
        cache.write("team", vec![1]);

        clock.advance(Duration::minutes(5) - Duration::milliseconds(1));
        assert_eq!(cache.read("team"), Some(vec![1]));

        clock.advance(Duration::milliseconds(1));
        assert_eq!(cache.read("team"), None);
    }

    #[test]
    fn test_expired_read_evicts() {
        let (clock, cache) = setup();
        cache.write("team", vec![1]);
        clock.advance(Duration::minutes(6));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.read("team"), None);
        assert!(cache.is_empty());

        // Rewinding the clock must not resurrect the entry
        clock.set(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(cache.read("team"), None);
    }

    #[test]
    fn test_invalidate_all() {
        let (_clock, cache) = setup();
        cache.write("a", vec![1]);
        cache.write("b", vec![2]);
        cache.invalidate_all();
        assert_eq!(cache.read("a"), None);
        assert_eq!(cache.read("b"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cached_data_age() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let cached = CachedData::new((), at);
        assert_eq!(cached.age(at + Duration::seconds(90)), Duration::seconds(90));
        assert!(cached.is_fresh(at + Duration::seconds(90), Duration::minutes(5)));
        assert!(!cached.is_fresh(at + Duration::minutes(5), Duration::minutes(5)));
    }
}
