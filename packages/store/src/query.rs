//! # Query cache: explicit `(operation, params) → {status, value, timestamp}` map
//!
//! [`QueryCache`] is the storage half of the synchronization layer. Reads go
//! through [`get_or_fetch`](QueryCache::get_or_fetch): a fresh cached value is
//! served directly, anything else triggers the fetch closure (with the
//! policy's retry count) and stores the result. Writes never touch cached
//! values; they call [`invalidate`](QueryCache::invalidate) with a key prefix
//! so the next read of every matching key goes back to the backend.
//!
//! ## Freshness
//!
//! An entry is served from cache only while its status is
//! [`EntryStatus::Success`] and it is younger than the policy's
//! `stale_time`. A zero `stale_time` therefore means "refetch on every read".
//!
//! ## Retries
//!
//! A failed fetch is retried up to the policy's `retry` count. Attempts are
//! spaced with exponential backoff: `retry_delay`, doubled after every
//! failure and capped at [`QueryPolicy::MAX_RETRY_DELAY`].
//!
//! ## Coalescing
//!
//! Concurrent reads of the same key share one backend call: each key has an
//! async gate, and a caller that waited on the gate reuses the value stored
//! while it waited instead of fetching again.
//!
//! ## Versions
//!
//! Every key carries a version that increases whenever the key is
//! invalidated or the cache is cleared. Views subscribe to it to learn that
//! their data must be re-read.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::{sleep, system_clock, Clock};
use crate::errors::RemoteError;

/// Cache key: operation name followed by its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(operation: &str) -> Self {
        Self(vec![operation.to_string()])
    }

    /// Append a parameter.
    pub fn with(mut self, part: impl fmt::Display) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Staleness and retry settings for one kind of read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_time: Duration,
    /// Extra attempts after the first failure.
    pub retry: u32,
    /// Wait before the first retry; doubles for each one after it.
    pub retry_delay: Duration,
}

impl QueryPolicy {
    pub const DEFAULT_RETRY: u32 = 3;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
    pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

    /// Lists and other plain reads: always refetch, standard retries.
    pub const LIST: Self = Self {
        stale_time: Duration::ZERO,
        retry: Self::DEFAULT_RETRY,
        retry_delay: Self::DEFAULT_RETRY_DELAY,
    };

    /// Role and is-admin checks.
    pub const ADMIN_CHECK: Self = Self {
        stale_time: Duration::from_secs(30),
        retry: 1,
        retry_delay: Self::DEFAULT_RETRY_DELAY,
    };

    pub const GALLERY: Self = Self {
        stale_time: Duration::from_secs(5 * 60),
        retry: Self::DEFAULT_RETRY,
        retry_delay: Self::DEFAULT_RETRY_DELAY,
    };

    /// A missing profile is a value, not a failure, so there is nothing to retry.
    pub const PROFILE: Self = Self {
        stale_time: Duration::ZERO,
        retry: 0,
        retry_delay: Self::DEFAULT_RETRY_DELAY,
    };

    /// Wait before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.retry_delay
            .checked_mul(factor)
            .map_or(Self::MAX_RETRY_DELAY, |delay| delay.min(Self::MAX_RETRY_DELAY))
    }
}

/// What a view sees for one read.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    /// Disabled: the backend connection is not established yet.
    Idle,
    Loading,
    Success(T),
    Error(RemoteError),
}

impl<T> QueryState<T> {
    pub fn from_result(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(value) => QueryState::Success(value),
            Err(err) => QueryState::Error(err),
        }
    }

    /// Idle and loading both render a loading indicator.
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Idle | QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RemoteError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Success(value) => QueryState::Success(f(value)),
            QueryState::Error(err) => QueryState::Error(err),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Success,
    Error,
    Invalidated,
}

type CachedValue = Arc<dyn Any + Send + Sync>;

struct Entry {
    status: EntryStatus,
    value: Option<CachedValue>,
    updated_at: u64,
    /// Successful stores so far.
    generation: u64,
}

#[derive(Default)]
struct Entries {
    entries: HashMap<QueryKey, Entry>,
    versions: HashMap<QueryKey, u64>,
}

struct Inner {
    entries: Mutex<Entries>,
    gates: Mutex<HashMap<QueryKey, Arc<tokio::sync::Mutex<()>>>>,
    clock: Clock,
}

/// Shared query cache. Cloning shares the underlying map.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries().entries.len())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Entries::default()),
                gates: Mutex::new(HashMap::new()),
                clock,
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn gate(&self, key: &QueryKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut gates = self
            .inner
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(gates.entry(key.clone()).or_default())
    }

    fn now(&self) -> u64 {
        (self.inner.clock)()
    }

    /// Serve `key` from cache when fresh, otherwise run `fetch` and cache the result.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetch: F,
    ) -> Result<T, RemoteError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let observed = self.generation(key);
        if let Some(value) = self.fresh::<T>(key, policy.stale_time) {
            debug!(%key, "query cache hit");
            return Ok(value);
        }

        let gate = self.gate(key);
        let _guard = gate.lock().await;

        if self.generation(key) != observed {
            if let Some(value) = self.settled::<T>(key) {
                debug!(%key, "query coalesced with in-flight fetch");
                return Ok(value);
            }
        }

        debug!(%key, "query cache miss, fetching");
        let version = self.version(key);
        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => {
                    self.store(key, value.clone(), version);
                    return Ok(value);
                }
                Err(err) if attempt < policy.retry => {
                    attempt += 1;
                    let delay = policy.backoff(attempt);
                    warn!(%key, attempt, ?delay, error = %err, "query failed, retrying");
                    sleep(delay).await;
                }
                Err(err) => {
                    self.mark(key, EntryStatus::Error);
                    return Err(err);
                }
            }
        }
    }

    /// Cached value for `key`, regardless of freshness.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries()
            .entries
            .get(key)
            .and_then(|entry| entry.value.as_ref())
            .and_then(|value| value.downcast_ref::<T>().cloned())
    }

    pub fn status(&self, key: &QueryKey) -> Option<EntryStatus> {
        self.entries().entries.get(key).map(|entry| entry.status)
    }

    /// Mark every entry under `prefix` as needing a refetch. Returns how many matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut guard = self.entries();
        let Entries { entries, versions } = &mut *guard;
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.status = EntryStatus::Invalidated;
                *versions.entry(key.clone()).or_default() += 1;
                count += 1;
            }
        }
        debug!(%prefix, count, "invalidated queries");
        count
    }

    /// Drop every entry. Used when the session is torn down.
    pub fn clear(&self) {
        let mut guard = self.entries();
        let Entries { entries, versions } = &mut *guard;
        for key in entries.keys() {
            *versions.entry(key.clone()).or_default() += 1;
        }
        entries.clear();
        debug!("query cache cleared");
    }

    /// Invalidation counter for `key`; changes whenever its data must be re-read.
    pub fn version(&self, key: &QueryKey) -> u64 {
        self.entries().versions.get(key).copied().unwrap_or(0)
    }

    fn generation(&self, key: &QueryKey) -> u64 {
        self.entries()
            .entries
            .get(key)
            .map(|entry| entry.generation)
            .unwrap_or(0)
    }

    fn fresh<T: Clone + 'static>(&self, key: &QueryKey, stale_time: Duration) -> Option<T> {
        let now = self.now();
        let entries = self.entries();
        let entry = entries.entries.get(key)?;
        if entry.status != EntryStatus::Success {
            return None;
        }
        let age = now.saturating_sub(entry.updated_at);
        if u128::from(age) >= stale_time.as_millis() {
            return None;
        }
        entry.value.as_ref()?.downcast_ref::<T>().cloned()
    }

    fn settled<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries();
        let entry = entries.entries.get(key)?;
        if entry.status != EntryStatus::Success {
            return None;
        }
        entry.value.as_ref()?.downcast_ref::<T>().cloned()
    }

    fn store<T: Send + Sync + 'static>(&self, key: &QueryKey, value: T, version: u64) {
        let now = self.now();
        let mut guard = self.entries();
        // Invalidated while the fetch was in flight: keep the value but refetch next time.
        let status = if guard.versions.get(key).copied().unwrap_or(0) == version {
            EntryStatus::Success
        } else {
            EntryStatus::Invalidated
        };
        let generation = guard
            .entries
            .get(key)
            .map(|entry| entry.generation + 1)
            .unwrap_or(1);
        guard.entries.insert(
            key.clone(),
            Entry {
                status,
                value: Some(Arc::new(value)),
                updated_at: now,
                generation,
            },
        );
    }

    fn mark(&self, key: &QueryKey, status: EntryStatus) {
        let now = self.now();
        let mut guard = self.entries();
        let entry = guard.entries.entry(key.clone()).or_insert(Entry {
            status,
            value: None,
            updated_at: now,
            generation: 0,
        });
        entry.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn manual_clock() -> (Clock, Arc<AtomicU64>) {
        let now = Arc::new(AtomicU64::new(1_000));
        let handle = Arc::clone(&now);
        (Arc::new(move || handle.load(Ordering::SeqCst)), now)
    }

    #[tokio::test]
    async fn test_fresh_entries_are_served_from_cache() {
        let (clock, now) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        let key = QueryKey::new("gallery");
        let calls = Rc::new(Cell::new(0));

        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                Ok::<_, RemoteError>(vec![1u64, 2, 3])
            }
        };

        let first = cache.get_or_fetch(&key, QueryPolicy::GALLERY, fetch).await.unwrap();
        let second = cache.get_or_fetch(&key, QueryPolicy::GALLERY, fetch).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);

        // Past the five minute window the entry is stale.
        now.fetch_add(5 * 60 * 1000, Ordering::SeqCst);
        cache.get_or_fetch(&key, QueryPolicy::GALLERY, fetch).await.unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_admin_check_is_fresh_for_thirty_seconds() {
        let (clock, now) = manual_clock();
        let cache = QueryCache::with_clock(clock);
        let key = QueryKey::new("admin").with("isCallerAdmin");
        let calls = Rc::new(Cell::new(0));
        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                Ok::<_, RemoteError>(true)
            }
        };

        cache.get_or_fetch(&key, QueryPolicy::ADMIN_CHECK, fetch).await.unwrap();
        now.fetch_add(29_000, Ordering::SeqCst);
        cache.get_or_fetch(&key, QueryPolicy::ADMIN_CHECK, fetch).await.unwrap();
        assert_eq!(calls.get(), 1);

        now.fetch_add(1_000, Ordering::SeqCst);
        cache.get_or_fetch(&key, QueryPolicy::ADMIN_CHECK, fetch).await.unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_zero_stale_time_refetches_every_read() {
        let cache = QueryCache::new();
        let key = QueryKey::new("events").with("upcoming");
        let calls = Rc::new(Cell::new(0));
        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                Ok::<_, RemoteError>(calls.get())
            }
        };

        assert_eq!(cache.get_or_fetch(&key, QueryPolicy::LIST, fetch).await, Ok(1));
        assert_eq!(cache.get_or_fetch(&key, QueryPolicy::LIST, fetch).await, Ok(2));
    }

    #[tokio::test]
    async fn test_invalidate_matches_prefix_only() {
        let cache = QueryCache::new();
        let by_category = QueryKey::new("notices").with("category").with("general");
        let latest = QueryKey::new("notices").with("latest").with(3);
        let gallery = QueryKey::new("gallery");

        for key in [&by_category, &latest, &gallery] {
            cache
                .get_or_fetch(key, QueryPolicy::GALLERY, || async { Ok::<_, RemoteError>(0u8) })
                .await
                .unwrap();
        }

        assert_eq!(cache.invalidate(&QueryKey::new("notices")), 2);
        assert_eq!(cache.status(&by_category), Some(EntryStatus::Invalidated));
        assert_eq!(cache.status(&latest), Some(EntryStatus::Invalidated));
        assert_eq!(cache.status(&gallery), Some(EntryStatus::Success));
        assert_eq!(cache.version(&latest), 1);
        assert_eq!(cache.version(&gallery), 0);
        // The old value stays readable until the refetch lands.
        assert_eq!(cache.peek::<u8>(&latest), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_count_is_honoured() {
        let cache = QueryCache::new();
        let key = QueryKey::new("admin").with("isCallerAdmin");
        let calls = Rc::new(Cell::new(0));
        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                Err::<bool, _>(RemoteError::new("network down"))
            }
        };

        let result = cache.get_or_fetch(&key, QueryPolicy::ADMIN_CHECK, fetch).await;
        assert_eq!(result, Err(RemoteError::new("network down")));
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.status(&key), Some(EntryStatus::Error));

        calls.set(0);
        let profile = QueryKey::new("profile").with("caller");
        let _ = cache.get_or_fetch(&profile, QueryPolicy::PROFILE, fetch).await;
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_after_transient_failure() {
        let cache = QueryCache::new();
        let key = QueryKey::new("contactInfo");
        let calls = Rc::new(Cell::new(0));
        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    Err(RemoteError::new("timeout"))
                } else {
                    Ok("ok".to_string())
                }
            }
        };
        let started = tokio::time::Instant::now();
        let value = cache.get_or_fetch(&key, QueryPolicy::LIST, fetch).await;
        assert_eq!(value.as_deref(), Ok("ok"));
        assert_eq!(calls.get(), 3);
        // One second before the first retry, two before the second.
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = QueryPolicy::LIST;
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(6), QueryPolicy::MAX_RETRY_DELAY);
        assert_eq!(policy.backoff(64), QueryPolicy::MAX_RETRY_DELAY);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("notices").with("latest").with(5);
        let calls = Rc::new(Cell::new(0));
        let fetch = || {
            let calls = Rc::clone(&calls);
            async move {
                calls.set(calls.get() + 1);
                tokio::task::yield_now().await;
                Ok::<_, RemoteError>(vec!["a".to_string()])
            }
        };

        let (a, b) = tokio::join!(
            cache.get_or_fetch(&key, QueryPolicy::LIST, fetch),
            cache.get_or_fetch(&key, QueryPolicy::LIST, fetch),
        );
        assert_eq!(a, b);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_clear_bumps_versions() {
        let cache = QueryCache::new();
        let key = QueryKey::new("profile").with("caller");
        cache
            .get_or_fetch(&key, QueryPolicy::PROFILE, || async {
                Ok::<_, RemoteError>(Option::<String>::None)
            })
            .await
            .unwrap();
        cache.clear();
        assert_eq!(cache.status(&key), None);
        assert_eq!(cache.version(&key), 1);
    }

    #[test]
    fn test_key_display_and_prefix() {
        let key = QueryKey::new("notices").with("category").with("meetings");
        assert_eq!(key.to_string(), "notices/category/meetings");
        assert!(key.starts_with(&QueryKey::new("notices")));
        assert!(!QueryKey::new("notices").starts_with(&key));
    }
}
