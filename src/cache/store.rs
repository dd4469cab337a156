//! Cache Store Module
//!
//! Cache engine combining the key index with the recency list, plus the
//! compaction policy and the public API surface.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::cache::lru::RecencyList;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::sync::{Concurrency, SingleThread, ThreadSafe};

// == Timed LRU Cache ==
/// Bounded in-memory cache with LRU eviction and optional TTL expiration.
///
/// Capacity is an item count fixed at construction; once exceeded, writes
/// evict from the least-recently-used end. With a TTL configured, every
/// touch restamps the entry's expiry and writes also drop entries whose
/// stamp has passed.
///
/// The `S` parameter selects the concurrency guard once, at construction:
/// [`ThreadSafe`] (the default) serializes all operations through a mutex,
/// [`SingleThread`] skips locking and keeps the type out of `Sync`. See
/// [`UnsyncTimedLru`].
///
/// Expired entries are only reclaimed by the compaction pass that runs on
/// `store`; a `fetch` between expiry and the next write still returns the
/// stale value (and, because hits touch, re-freshens it).
pub struct TimedLru<K, V, S: Concurrency = ThreadSafe> {
    config: Config,
    inner: S::Cell<Inner<K, V>>,
}

/// Alias for the no-op-guard variant built with [`TimedLru::unsync`].
pub type UnsyncTimedLru<K, V> = TimedLru<K, V, SingleThread>;

/// State shared behind the concurrency guard: the index and recency list
/// are mutated only inside the critical section.
struct Inner<K, V> {
    /// Key to arena slot, one entry per live key
    index: HashMap<K, usize, RandomState>,
    /// Recency chain over the same entries
    list: RecencyList<K, V>,
    config: Config,
    clock: Arc<dyn Clock>,
}

// == Constructors ==

impl<K, V> TimedLru<K, V, ThreadSafe>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a thread-safe cache using the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a thread-safe cache reading time from `clock`.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(config, clock)
    }
}

impl<K, V> TimedLru<K, V, SingleThread>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a cache without a concurrency guard.
    ///
    /// The resulting type is not `Sync`; sharing it across threads is a
    /// compile error. The choice is fixed for the cache's lifetime.
    pub fn unsync(config: Config) -> Self {
        Self::unsync_with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an unguarded cache reading time from `clock`.
    pub fn unsync_with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(config, clock)
    }
}

// == Public API ==

impl<K, V, S> TimedLru<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: Concurrency,
{
    fn from_parts(config: Config, clock: Arc<dyn Clock>) -> Self {
        debug!(
            max_size = config.max_size(),
            ttl = ?config.ttl(),
            "creating cache"
        );
        Self {
            config,
            inner: S::new_cell(Inner::new(config, clock)),
        }
    }

    // == Store ==
    /// Inserts or updates `key`, promoting it to most-recently-used.
    ///
    /// Runs the compaction pass before returning, so the capacity bound
    /// holds on exit and (with TTL) expired tail entries are dropped.
    /// Returns the value that was stored.
    pub fn store(&self, key: K, value: V) -> V {
        S::with(&self.inner, |inner| inner.store(key, value))
    }

    // == Fetch ==
    /// Returns the value for `key`, promoting the entry on a hit.
    ///
    /// A miss has no side effects. A hit refreshes the entry's expiry when
    /// a TTL is configured; an entry that expired since the last write is
    /// still returned, as only `store` reclaims stale entries.
    pub fn fetch(&self, key: &K) -> Option<V> {
        S::with(&self.inner, |inner| inner.fetch(key))
    }

    // == Delete ==
    /// Removes `key` and returns its value, or `None` if absent.
    pub fn delete(&self, key: &K) -> Option<V> {
        S::with(&self.inner, |inner| inner.delete(key))
    }

    // == Introspection ==
    /// Current number of live entries.
    pub fn len(&self) -> usize {
        S::with(&self.inner, |inner| inner.index.len())
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the live keys, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        S::with(&self.inner, |inner| inner.index.keys().cloned().collect())
    }

    /// Capacity the cache was built with.
    pub fn max_size(&self) -> usize {
        self.config.max_size()
    }

    /// Expiry window the cache was built with, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.config.ttl()
    }

    /// Keys in recency order (head first), asserting the chain invariants
    /// along the way.
    #[cfg(test)]
    pub(crate) fn chain(&self) -> Vec<K> {
        S::with(&self.inner, |inner| inner.chain_keys())
    }
}

// == Engine ==

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(config.max_size(), RandomState::new()),
            list: RecencyList::with_capacity(config.max_size()),
            config,
            clock,
        }
    }

    /// Expiry stamp for an entry touched at `now`.
    fn expiry(&self, now: Instant) -> Option<Instant> {
        self.config.ttl().map(|ttl| now + ttl)
    }

    fn store(&mut self, key: K, value: V) -> V {
        let now = self.clock.now();
        let stored = value.clone();

        let slot = match self.index.get(&key) {
            Some(&slot) => {
                self.list.entry_mut(slot).value = value;
                slot
            }
            None => {
                let slot = self.list.insert(key.clone(), value);
                self.index.insert(key, slot);
                slot
            }
        };

        self.list.touch(slot, self.expiry(now));
        self.compact(now);
        stored
    }

    fn fetch(&mut self, key: &K) -> Option<V> {
        let slot = *self.index.get(key)?;
        let now = self.clock.now();

        self.list.touch(slot, self.expiry(now));
        Some(self.list.entry(slot).value.clone())
    }

    fn delete(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        Some(self.list.remove(slot).value)
    }

    // == Compaction ==
    /// Enforces the capacity bound, then the freshness bound.
    ///
    /// Capacity runs first so an oversized write is always paid for by the
    /// true LRU entry. The expiration loop stops at the first live tail:
    /// every touch restamps expiry while moving the entry headwards, so
    /// stamps never decrease from tail to head.
    fn compact(&mut self, now: Instant) {
        let mut evicted = 0usize;
        while self.index.len() > self.config.max_size() {
            self.evict_tail();
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, "trimmed entries over capacity");
        }

        if self.config.ttl().is_none() {
            return;
        }
        let mut expired = 0usize;
        while let Some(tail) = self.list.tail() {
            if !self.list.entry(tail).is_expired(now) {
                break;
            }
            self.evict_tail();
            expired += 1;
        }
        if expired > 0 {
            trace!(expired, "trimmed expired entries");
        }
    }

    fn evict_tail(&mut self) {
        if let Some(tail) = self.list.tail() {
            let entry = self.list.remove(tail);
            self.index.remove(&entry.key);
        }
    }

    /// Walks head to tail collecting keys, checking every structural
    /// invariant the chain promises: back links match, endpoints have no
    /// outward links, no cycles, the index agrees with the chain, and
    /// (with TTL) expiry stamps never decrease toward the head.
    #[cfg(test)]
    fn chain_keys(&self) -> Vec<K> {
        let mut keys = Vec::new();
        let mut cursor = self.list.head();
        let mut prev_slot: Option<usize> = None;
        let mut prev_stamp: Option<Instant> = None;

        while let Some(slot) = cursor {
            let entry = self.list.entry(slot);
            assert_eq!(entry.prev, prev_slot, "back link mismatch");
            if let (Some(earlier), Some(later)) = (entry.expires_at, prev_stamp) {
                assert!(earlier <= later, "expiry stamps must not grow toward the tail");
            }
            keys.push(entry.key.clone());
            assert!(keys.len() <= self.index.len(), "cycle in recency chain");

            prev_stamp = entry.expires_at;
            prev_slot = Some(slot);
            cursor = entry.next;
        }

        assert_eq!(self.list.tail(), prev_slot, "tail must end the chain");
        assert_eq!(keys.len(), self.index.len(), "index and chain disagree");
        keys
    }
}
