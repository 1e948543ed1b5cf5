//! TTL-based fetch cache.
//!
//! [`CachedFetcher`] sits between the domain resources and the remote
//! [`Transport`]: a fetch either returns a stored response body that is
//! still fresh or performs exactly one remote call and stores the result.
//! The fetcher is constructed explicitly and passed to domain methods; the
//! store and clock are injectable so TTL behavior is deterministic in tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::{Endpoint, Transport};
use crate::error::Result;

pub mod store;

pub use store::{FileStore, MemoryStore, SqliteStore};

#[cfg(test)]
mod tests;

/// Default entry lifetime for data that changes infrequently.
pub const DEFAULT_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// A cached response body plus its retrieval timestamp (unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: Value,
    pub fetched_at: u64,
}

/// Key-value persistence surface underneath the fetcher.
///
/// Entries are replaced wholesale on refetch; nothing expires them
/// proactively. Staleness is detected lazily by the fetcher on read.
pub trait CacheStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>>;
    fn put(&self, key: &str, entry: CacheEntry) -> Result<()>;
}

impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<()> {
        (**self).put(key, entry)
    }
}

/// Clock used for TTL comparison. Injectable for deterministic tests.
pub trait Clock {
    fn now_unix(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_unix(&self) -> u64 {
        (**self).now_unix()
    }
}

/// Wall-clock time in unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Cache-backed remote fetcher.
pub struct CachedFetcher<T, S, C = SystemClock> {
    transport: T,
    store: S,
    clock: C,
}

impl<T: Transport, S: CacheStore> CachedFetcher<T, S, SystemClock> {
    pub fn new(transport: T, store: S) -> Self {
        Self::with_clock(transport, store, SystemClock)
    }
}

impl<T: Transport, S: CacheStore, C: Clock> CachedFetcher<T, S, C> {
    pub fn with_clock(transport: T, store: S, clock: C) -> Self {
        Self {
            transport,
            store,
            clock,
        }
    }

    /// Return the response body for `key`, from the cache when fresh.
    ///
    /// An entry is fresh while `now - fetched_at < ttl`, so a zero `ttl`
    /// always forces a remote call and cache refresh (live rosters). On a
    /// miss or a stale hit the transport is invoked once and the result is
    /// stored under `key`, overwriting any prior entry.
    ///
    /// Policy: a transport failure always propagates and leaves the cache
    /// untouched. An expired entry is never served as a fallback; a later
    /// retry performs a fresh remote call.
    pub async fn fetch(&self, key: &str, endpoint: &Endpoint, ttl: Duration) -> Result<Value> {
        if let Some(entry) = self.store.get(key)? {
            let age = self.clock.now_unix().saturating_sub(entry.fetched_at);
            if age < ttl.as_secs() {
                debug!(key, age, "serving cached response");
                return Ok(entry.body);
            }
            debug!(key, age, "cached response is stale");
        } else {
            debug!(key, "cache miss");
        }

        let body = self.transport.get(endpoint).await?;
        self.store.put(
            key,
            CacheEntry {
                body: body.clone(),
                fetched_at: self.clock.now_unix(),
            },
        )?;

        Ok(body)
    }
}
