//! Unit tests for the cache-backed fetcher and the store implementations

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use super::*;
use crate::api::{Endpoint, Transport};
use crate::error::YahooError;

/// Transport double: one canned body, a call counter, and a failure switch.
struct FakeTransport {
    body: Value,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FakeTransport {
    fn new(body: Value) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Transport for FakeTransport {
    async fn get(&self, _endpoint: &Endpoint) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(YahooError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "transport down",
            )));
        }
        Ok(self.body.clone())
    }
}

/// Settable clock for deterministic TTL checks.
#[derive(Default)]
struct ManualClock(AtomicU64);

impl ManualClock {
    fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

fn fixture() -> (
    Arc<FakeTransport>,
    Arc<MemoryStore>,
    Arc<ManualClock>,
    CachedFetcher<Arc<FakeTransport>, Arc<MemoryStore>, Arc<ManualClock>>,
) {
    let transport = Arc::new(FakeTransport::new(json!({"fantasy_content": {"ok": true}})));
    let store = Arc::new(MemoryStore::new(16));
    let clock = Arc::new(ManualClock::default());
    let fetcher = CachedFetcher::with_clock(transport.clone(), store.clone(), clock.clone());
    (transport, store, clock, fetcher)
}

const TTL: Duration = Duration::from_secs(300);

#[tokio::test]
async fn test_miss_calls_transport_and_stores() {
    let (transport, store, clock, fetcher) = fixture();
    clock.set(1000);

    let body = fetcher
        .fetch("teams.test", &Endpoint::new("league/test/teams"), TTL)
        .await
        .unwrap();

    assert_eq!(body, json!({"fantasy_content": {"ok": true}}));
    assert_eq!(transport.calls(), 1);

    let entry = store.get("teams.test").unwrap().unwrap();
    assert_eq!(entry.fetched_at, 1000);
    assert_eq!(entry.body, body);
}

#[tokio::test]
async fn test_fresh_hit_skips_transport() {
    let (transport, _store, clock, fetcher) = fixture();
    let endpoint = Endpoint::new("league/test/teams");

    clock.set(1000);
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();

    // One second before expiry: still served from cache.
    clock.set(1000 + TTL.as_secs() - 1);
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_stale_entry_refetches() {
    let (transport, store, clock, fetcher) = fixture();
    let endpoint = Endpoint::new("league/test/teams");

    clock.set(1000);
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();

    // Age == TTL counts as stale.
    clock.set(1000 + TTL.as_secs());
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();
    assert_eq!(transport.calls(), 2);

    // The entry was overwritten with the new timestamp.
    let entry = store.get("teams.test").unwrap().unwrap();
    assert_eq!(entry.fetched_at, 1000 + TTL.as_secs());
}

#[tokio::test]
async fn test_zero_ttl_forces_refetch() {
    let (transport, _store, clock, fetcher) = fixture();
    let endpoint = Endpoint::new("team/test/roster");
    clock.set(1000);

    fetcher
        .fetch("roster.live", &endpoint, Duration::ZERO)
        .await
        .unwrap();
    fetcher
        .fetch("roster.live", &endpoint, Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_distinct_keys_do_not_share_entries() {
    let (transport, _store, clock, fetcher) = fixture();
    clock.set(1000);

    fetcher
        .fetch("teams.a", &Endpoint::new("league/a/teams"), TTL)
        .await
        .unwrap();
    fetcher
        .fetch("teams.b", &Endpoint::new("league/b/teams"), TTL)
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_failure_propagates_and_cache_stays_empty() {
    let (transport, store, clock, fetcher) = fixture();
    clock.set(1000);
    transport.set_fail(true);

    let result = fetcher
        .fetch("teams.test", &Endpoint::new("league/test/teams"), TTL)
        .await;

    assert!(result.is_err());
    assert!(store.get("teams.test").unwrap().is_none());
}

#[tokio::test]
async fn test_failed_refresh_never_serves_stale_entry() {
    let (transport, store, clock, fetcher) = fixture();
    let endpoint = Endpoint::new("league/test/teams");

    clock.set(1000);
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();

    clock.set(1000 + TTL.as_secs() + 1);
    transport.set_fail(true);

    // The expired entry must not be used as a fallback, now or on retry.
    assert!(fetcher.fetch("teams.test", &endpoint, TTL).await.is_err());
    assert!(fetcher.fetch("teams.test", &endpoint, TTL).await.is_err());

    // The stale entry itself was left untouched for a later successful
    // refresh.
    let entry = store.get("teams.test").unwrap().unwrap();
    assert_eq!(entry.fetched_at, 1000);

    transport.set_fail(false);
    fetcher.fetch("teams.test", &endpoint, TTL).await.unwrap();
    let entry = store.get("teams.test").unwrap().unwrap();
    assert_eq!(entry.fetched_at, 1000 + TTL.as_secs() + 1);
}

mod stores {
    use super::*;
    use tempfile::tempdir;

    fn entry(fetched_at: u64) -> CacheEntry {
        CacheEntry {
            body: json!({"fantasy_content": {"league": {"name": "Store Test"}}}),
            fetched_at,
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new(4);
        assert!(store.get("missing").unwrap().is_none());

        store.put("teams.x", entry(42)).unwrap();
        let got = store.get("teams.x").unwrap().unwrap();
        assert_eq!(got.fetched_at, 42);
    }

    #[test]
    fn test_memory_store_lru_eviction() {
        let store = MemoryStore::new(2);
        store.put("a", entry(1)).unwrap();
        store.put("b", entry(2)).unwrap();
        store.put("c", entry(3)).unwrap();

        let (used, capacity) = store.stats();
        assert_eq!(used, 2);
        assert_eq!(capacity, 2);
        assert!(store.get("a").unwrap().is_none());
        assert!(store.get("c").unwrap().is_some());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_root(dir.path());

        assert!(store.get("teams.x").unwrap().is_none());
        store.put("teams.x", entry(7)).unwrap();

        let got = store.get("teams.x").unwrap().unwrap();
        assert_eq!(got.fetched_at, 7);
        assert_eq!(got.body, entry(7).body);
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_root(dir.path());

        // Keys may carry path-hostile characters; they must stay one file
        // under the root.
        store.put("team/423.l.1.t.2/roster;week=3", entry(1)).unwrap();
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        assert!(store
            .get("team/423.l.1.t.2/roster;week=3")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_file_store_treats_corrupt_entry_as_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::with_root(dir.path());

        store.put("teams.x", entry(7)).unwrap();
        // Clobber the file with something that is not a CacheEntry.
        for file in std::fs::read_dir(dir.path()).unwrap() {
            std::fs::write(file.unwrap().path(), "not json").unwrap();
        }

        assert!(store.get("teams.x").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_store_roundtrip() {
        let store = SqliteStore::new_in_memory().unwrap();

        assert!(store.get("teams.x").unwrap().is_none());
        store.put("teams.x", entry(99)).unwrap();

        let got = store.get("teams.x").unwrap().unwrap();
        assert_eq!(got.fetched_at, 99);
        assert_eq!(got.body, entry(99).body);
    }

    #[test]
    fn test_sqlite_store_overwrites_on_put() {
        let store = SqliteStore::new_in_memory().unwrap();

        store.put("teams.x", entry(1)).unwrap();
        store.put("teams.x", entry(2)).unwrap();

        let got = store.get("teams.x").unwrap().unwrap();
        assert_eq!(got.fetched_at, 2);
    }
}
