//! Timed LRU - a bounded in-memory cache
//!
//! Keeps a fixed number of entries ordered by recency of use. Writes evict
//! from the least-recently-used end once the cache is over capacity, and
//! with a TTL configured they also drop entries whose expiry has passed.
//! Lookups and writes are O(1) and, by default, safe to call from multiple
//! threads.
//!
//! # Examples
//!
//! ```
//! use timed_lru::{Config, TimedLru};
//!
//! let config = Config::builder().max_size(2).build().unwrap();
//! let cache: TimedLru<&str, u32> = TimedLru::new(config);
//!
//! cache.store("a", 1);
//! cache.store("b", 2);
//! cache.store("c", 3); // evicts "a"
//!
//! assert_eq!(cache.fetch(&"a"), None);
//! assert_eq!(cache.fetch(&"b"), Some(2));
//! ```
//!
//! With expiration, driven here by a manual clock:
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use timed_lru::{Config, ManualClock, TimedLru};
//!
//! let clock = Arc::new(ManualClock::new());
//! let config = Config::builder().max_size(8).ttl_secs(60.0).build().unwrap();
//! let cache: TimedLru<&str, u32> = TimedLru::with_clock(config, clock.clone());
//!
//! cache.store("a", 1);
//! clock.advance(Duration::from_secs(70));
//! cache.store("b", 2); // the write-time compaction drops "a"
//!
//! assert_eq!(cache.len(), 1);
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod sync;

pub use cache::{TimedLru, UnsyncTimedLru};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::ConfigError;
pub use sync::{Concurrency, SingleThread, ThreadSafe};
